//! Environment placeholder expansion and Python interpreter discovery.
//!
//! Two small utilities used by Python package tooling:
//!
//! - [`env`] expands `${NAME}` placeholders in plain strings and in the
//!   user-info of package index URLs, percent-encoding credentials so the URL
//!   stays valid.
//! - [`python`] resolves an interpreter path or installation prefix to the
//!   interpreter executable it names.

pub mod config;
pub mod env;
mod pattern;
pub mod python;
pub mod source;
pub mod test_support;

pub use config::{ConfigError, EnvpyConfig};
pub use env::{
    AuthUrlError, EnvLookup, ProcessEnv, expand_env_vars, expand_env_vars_in_auth,
    expand_env_vars_in_auth_with, expand_env_vars_with,
};
pub use python::{InterpreterLocator, Platform, UnknownPlatform, find_python_in_path};
pub use source::{PackageSource, SourceError};
