//! Environment placeholder expansion.
//!
//! Placeholders take the form `${NAME}`, where `NAME` is made of word
//! characters. Bare `$NAME` and `%NAME%` references are not placeholders and
//! pass through untouched. Substituted values are never rescanned, so a value
//! that itself contains `${...}` is inserted literally.
//!
//! Lookups go through [`EnvLookup`], so callers can expand against the live
//! process environment ([`ProcessEnv`]) or against a fixed mapping.

mod auth;
mod error;


use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::pattern;

pub use auth::{expand_env_vars_in_auth, expand_env_vars_in_auth_with};
pub use error::AuthUrlError;

const PLACEHOLDER_PATTERN: &str = r"\$\{(\w+)\}";

static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();

/// Read-only view of environment variables consulted during expansion.
pub trait EnvLookup {
    /// Returns the value bound to `name`, or `None` when it is unset.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads the process environment on every lookup.
///
/// Nothing is cached, so a variable set between two calls is visible to the
/// second one. Values that are not valid Unicode are treated as unset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// How a substitution is written back into the surrounding text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rendering {
    /// Resolved values are inserted as-is; unresolved tokens stay literal.
    Raw,
    /// Both resolved values and unresolved tokens are percent-encoded for a
    /// URL user-info component.
    UserInfo,
}

/// Expands `${NAME}` placeholders against the process environment.
///
/// Unset variables leave their placeholder in place.
///
/// # Examples
///
/// ```
/// use envpy::expand_env_vars;
///
/// assert_eq!(expand_env_vars("$HOME stays"), "$HOME stays");
/// assert_eq!(expand_env_vars(""), "");
/// ```
#[must_use]
pub fn expand_env_vars(text: &str) -> String {
    expand_env_vars_with(text, &ProcessEnv)
}

/// Expands `${NAME}` placeholders against `env`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use envpy::expand_env_vars_with;
///
/// let env = BTreeMap::from([(String::from("A"), String::from("X"))]);
/// assert_eq!(expand_env_vars_with("${A}_${A}", &env), "X_X");
/// assert_eq!(expand_env_vars_with("${B}", &env), "${B}");
/// ```
#[must_use]
pub fn expand_env_vars_with(text: &str, env: &impl EnvLookup) -> String {
    substitute(text, env, Rendering::Raw)
}

pub(crate) fn substitute(text: &str, env: &impl EnvLookup, rendering: Rendering) -> String {
    let Some(placeholder) = pattern::cached(&PLACEHOLDER, PLACEHOLDER_PATTERN) else {
        return text.to_owned();
    };
    placeholder
        .replace_all(text, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |found| found.as_str());
            let name = caps.get(1).map_or("", |found| found.as_str());
            let replacement = env.lookup(name).map_or_else(
                || {
                    trace!(variable = name, "placeholder left unresolved");
                    token.to_owned()
                },
                |value| {
                    trace!(variable = name, "placeholder resolved");
                    value
                },
            );
            match rendering {
                Rendering::Raw => replacement,
                Rendering::UserInfo => urlencoding::encode(&replacement).into_owned(),
            }
        })
        .into_owned()
}
