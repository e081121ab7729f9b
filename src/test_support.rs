//! Test support utilities shared across unit and integration tests.

use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Guard that holds the env mutex and restores variables on drop.
///
/// Only one guard may be alive per thread; creating a second one while the
/// first is held deadlocks.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    #[must_use]
    pub fn set_vars(pairs: &[(&str, &str)]) -> Self {
        let changes: Vec<(&str, Option<&str>)> = pairs
            .iter()
            .map(|(key, value)| (*key, Some(*value)))
            .collect();
        Self::apply(&changes)
    }

    /// Removes environment variables while holding a global mutex.
    #[must_use]
    pub fn remove_vars(keys: &[&str]) -> Self {
        let changes: Vec<(&str, Option<&str>)> = keys.iter().map(|key| (*key, None)).collect();
        Self::apply(&changes)
    }

    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                changes.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard"
        );

        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut previous = Vec::with_capacity(changes.len());
        for (key, value) in changes {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

/// Writes a stub interpreter at `relative` below `root`, creating parent
/// directories as needed, and returns its full path.
///
/// On Unix the stub is mode `0755` when `executable` is set and `0644`
/// otherwise; elsewhere the flag has no effect.
///
/// # Errors
///
/// Returns any I/O error raised while creating the directories or the file.
pub fn write_stub_interpreter(
    root: &Utf8Path,
    relative: &str,
    executable: bool,
) -> io::Result<Utf8PathBuf> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    if let Some(parent) = Utf8Path::new(relative)
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
    {
        dir.create_dir_all(parent)?;
    }
    dir.write(relative, "#!/bin/sh\nexit 0\n")?;

    let path = root.join(relative);
    set_executable(&path, executable)?;
    Ok(path)
}

#[cfg(unix)]
fn set_executable(path: &Utf8Path, executable: bool) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if executable { 0o755 } else { 0o644 };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_executable(_path: &Utf8Path, _executable: bool) -> io::Result<()> {
    Ok(())
}
