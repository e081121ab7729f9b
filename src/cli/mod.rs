//! Command-line interface definitions for the `envpy` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI for the `envpy` binary.
#[derive(Debug, Parser)]
#[command(
    name = "envpy",
    about = "Expand environment placeholders and locate Python interpreters",
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub(crate) log_level: String,
    /// Subcommand to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Subcommands of the `envpy` binary.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Expand `${NAME}` placeholders in text.
    #[command(name = "expand", about = "Expand ${NAME} placeholders in text")]
    Expand(ExpandCommand),
    /// Expand placeholders in the credentials of a URL.
    #[command(
        name = "expand-auth",
        about = "Expand and percent-encode placeholders in a URL's credentials"
    )]
    ExpandAuth(ExpandAuthCommand),
    /// Locate a Python interpreter from a path or installation prefix.
    #[command(
        name = "find-python",
        about = "Locate a Python interpreter from a path or installation prefix"
    )]
    FindPython(FindPythonCommand),
}

/// Arguments for the `envpy expand` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct ExpandCommand {
    /// Text containing `${NAME}` placeholders.
    pub(crate) text: String,
}

/// Arguments for the `envpy expand-auth` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct ExpandAuthCommand {
    /// URL whose user-info may contain `${NAME}` placeholders.
    pub(crate) url: String,
}

/// Arguments for the `envpy find-python` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct FindPythonCommand {
    /// Interpreter executable or installation prefix. Falls back to the
    /// `python` configuration value (`ENVPY_PYTHON`).
    pub(crate) path: Option<String>,
    /// Probe using another platform's layout instead of the native one.
    #[arg(long, value_enum, value_name = "LAYOUT")]
    pub(crate) layout: Option<LayoutArg>,
}

/// Layout names accepted by `--layout`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum LayoutArg {
    /// `<prefix>/bin/python3`.
    Posix,
    /// POSIX plus framework builds and Homebrew names.
    Macos,
    /// `<prefix>\Scripts\python.exe` or `<prefix>\python.exe`.
    Windows,
}
