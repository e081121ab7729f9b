//! Binary entry point for the `envpy` CLI.

mod cli;

use std::io::{self, Write};
use std::process;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use envpy::{
    AuthUrlError, ConfigError, EnvpyConfig, InterpreterLocator, Platform, expand_env_vars,
    expand_env_vars_in_auth,
};

use cli::{Cli, Command, FindPythonCommand, LayoutArg};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Url(#[from] AuthUrlError),
    #[error("no interpreter path given: pass PATH or set ENVPY_PYTHON")]
    MissingPath,
    #[error("no Python interpreter found in {0}")]
    NotFound(Utf8PathBuf),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let exit_code = match dispatch(&cli.command, &mut io::stdout()) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init()
        .ok();
}

fn dispatch(command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Expand(args) => writeln!(out, "{}", expand_env_vars(&args.text))?,
        Command::ExpandAuth(args) => writeln!(out, "{}", expand_env_vars_in_auth(&args.url)?)?,
        Command::FindPython(args) => writeln!(out, "{}", find_python(args)?)?,
    }
    Ok(())
}

fn find_python(args: &FindPythonCommand) -> Result<Utf8PathBuf, CliError> {
    let config = EnvpyConfig::load_without_cli_args()?;
    config.validate()?;

    let path = args
        .path
        .as_ref()
        .or(config.python.as_ref())
        .map(Utf8PathBuf::from)
        .ok_or(CliError::MissingPath)?;
    let platform = match args.layout {
        Some(layout) => platform_for(layout),
        None => config.platform()?.unwrap_or_else(Platform::current),
    };

    InterpreterLocator::for_platform(platform)
        .find(&path)
        .ok_or(CliError::NotFound(path))
}

const fn platform_for(layout: LayoutArg) -> Platform {
    match layout {
        LayoutArg::Posix => Platform::Posix,
        LayoutArg::Macos => Platform::MacOs,
        LayoutArg::Windows => Platform::Windows,
    }
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use envpy::test_support::{EnvGuard, write_stub_interpreter};
    use tempfile::TempDir;

    fn run(command: &Command) -> Result<String, CliError> {
        let mut buf = Vec::new();
        dispatch(command, &mut buf)?;
        Ok(String::from_utf8(buf).expect("utf8"))
    }

    #[test]
    fn expand_prints_expanded_text() {
        let _guard = EnvGuard::set_vars(&[("ENVPY_MAIN_TEST_FOO", "hello")]);
        let command = Command::Expand(cli::ExpandCommand {
            text: String::from("${ENVPY_MAIN_TEST_FOO}_$ENVPY_MAIN_TEST_FOO"),
        });

        let output = run(&command).expect("expand succeeds");

        assert_eq!(output, "hello_$ENVPY_MAIN_TEST_FOO\n");
    }

    #[test]
    fn expand_auth_surfaces_malformed_urls() {
        let command = Command::ExpandAuth(cli::ExpandAuthCommand {
            url: String::from("example.org/simple"),
        });

        let err = run(&command).expect_err("missing scheme should fail");

        assert!(
            matches!(err, CliError::Url(AuthUrlError::MissingScheme { .. })),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn find_python_requires_a_path() {
        let _guard = EnvGuard::remove_vars(&["ENVPY_PYTHON", "ENVPY_LAYOUT"]);
        let args = FindPythonCommand {
            path: None,
            layout: None,
        };

        let err = find_python(&args).expect_err("path is required");

        assert!(matches!(err, CliError::MissingPath), "unexpected error: {err}");
    }

    #[test]
    fn find_python_uses_configured_prefix() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir should be utf8: {}", path.display()));
        let python = write_stub_interpreter(&root, "Scripts/python.exe", true)
            .unwrap_or_else(|err| panic!("write stub: {err}"));
        let _guard = EnvGuard::set_vars(&[
            ("ENVPY_PYTHON", root.as_str()),
            ("ENVPY_LAYOUT", "windows"),
        ]);
        let args = FindPythonCommand {
            path: None,
            layout: None,
        };

        let found = find_python(&args).unwrap_or_else(|err| panic!("find python: {err}"));

        assert_eq!(found, python);
    }

    #[test]
    fn cli_name_matches_package_name() {
        use clap::CommandFactory;

        assert_eq!(Cli::command().get_name(), env!("CARGO_PKG_NAME"));
        Cli::command().debug_assert();
    }

    #[test]
    fn platform_for_maps_every_layout() {
        assert_eq!(platform_for(LayoutArg::Posix), Platform::Posix);
        assert_eq!(platform_for(LayoutArg::Macos), Platform::MacOs);
        assert_eq!(platform_for(LayoutArg::Windows), Platform::Windows);
    }

    #[test]
    fn write_error_writes_cli_error() {
        let mut buf = Vec::new();
        let err = CliError::NotFound(Utf8PathBuf::from("/opt/empty"));
        write_error(&mut buf, &err);
        let rendered = String::from_utf8(buf).expect("utf8");
        assert!(
            rendered.contains("no Python interpreter found in /opt/empty"),
            "rendered: {rendered}"
        );
    }
}
