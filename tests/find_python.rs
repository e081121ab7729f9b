//! Interpreter discovery against realistic installation layouts.

#[path = "common/prefix.rs"]
mod prefix_support;

use envpy::{InterpreterLocator, Platform, find_python_in_path};
use rstest::{fixture, rstest};

use prefix_support::TempPrefix;

#[fixture]
fn prefix() -> TempPrefix {
    TempPrefix::new()
}

#[rstest]
fn interpreter_path_resolves_to_itself(prefix: TempPrefix) {
    let executable = match Platform::current() {
        Platform::Windows => prefix.stub("python.exe"),
        Platform::Posix | Platform::MacOs => prefix.stub("bin/python3.12"),
    };

    assert_eq!(find_python_in_path(&executable), Some(executable));
}

#[rstest]
fn prefix_resolves_to_interpreter_binary(prefix: TempPrefix) {
    let executable = match Platform::current() {
        Platform::Windows => prefix.stub("python.exe"),
        Platform::Posix | Platform::MacOs => {
            prefix.stub("bin/python");
            prefix.stub("bin/python3.12");
            prefix.stub("bin/python3")
        }
    };

    let found = find_python_in_path(&prefix.root).expect("interpreter below prefix");

    let normalised = found.as_str().replace('\\', "/").to_lowercase();
    let expected = executable.as_str().replace('\\', "/").to_lowercase();
    assert!(
        normalised.starts_with(&expected),
        "{found} should start with {executable}"
    );
}

#[rstest]
fn directory_without_interpreter_resolves_to_none(prefix: TempPrefix) {
    assert_eq!(find_python_in_path(&prefix.root), None);
}

#[rstest]
fn virtualenv_layouts_resolve_per_platform(prefix: TempPrefix) {
    let posix = prefix.stub("venv/bin/python3");
    let windows = prefix.stub("venv/Scripts/python.exe");
    let venv = prefix.root.join("venv");

    assert_eq!(
        InterpreterLocator::for_platform(Platform::Posix).find(&venv),
        Some(posix)
    );
    assert_eq!(
        InterpreterLocator::for_platform(Platform::Windows).find(&venv),
        Some(windows)
    );
}

#[rstest]
fn homebrew_keg_resolves_versioned_binary(prefix: TempPrefix) {
    let python = prefix.stub("opt/python@3.11/bin/python3.11");
    let keg = prefix.root.join("opt/python@3.11");

    let found = InterpreterLocator::for_platform(Platform::MacOs)
        .find(&keg)
        .expect("interpreter in keg");

    assert_eq!(found, python);
    assert!(found.as_str().contains("python@3.11"));
}

/// Asks a `python3` found on `PATH` for its executable and prefix.
#[cfg(unix)]
fn running_interpreter() -> Option<(camino::Utf8PathBuf, camino::Utf8PathBuf)> {
    let output = std::process::Command::new("python3")
        .args(["-c", "import sys; print(sys.executable); print(sys.prefix)"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    let mut lines = stdout.lines().map(str::trim).filter(|line| !line.is_empty());
    let executable = camino::Utf8PathBuf::from(lines.next()?);
    let prefix = camino::Utf8PathBuf::from(lines.next()?);
    Some((executable, prefix))
}

#[cfg(unix)]
#[test]
fn running_interpreter_resolves_from_executable_and_prefix() {
    let Some((executable, prefix)) = running_interpreter() else {
        return;
    };

    assert_eq!(find_python_in_path(&executable), Some(executable.clone()));

    let found = find_python_in_path(&prefix)
        .unwrap_or_else(|| panic!("interpreter below {prefix} (running {executable})"));
    let expected = prefix.join("bin").join("python");
    assert!(
        found.as_str().starts_with(expected.as_str()),
        "{found} should start with {expected}"
    );
}
