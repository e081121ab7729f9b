//! Package index source declarations.
//!
//! Project manifests list index sources as `[[source]]` tables with a name, a
//! URL and an optional `verify_ssl` flag. URLs may carry credentials as
//! `${NAME}` placeholders; they are only expanded when the URL is needed, so
//! the secret never has to be written into the manifest.

use serde::Deserialize;
use thiserror::Error;

use crate::env::{AuthUrlError, EnvLookup, expand_env_vars_in_auth_with};

/// Errors raised while validating or resolving a [`PackageSource`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SourceError {
    /// Raised when the source name is empty or only whitespace.
    #[error("package source name must not be empty")]
    BlankName,
    /// Raised when the source URL is empty or only whitespace.
    #[error("package source `{name}` has an empty url")]
    BlankUrl {
        /// Name of the offending source.
        name: String,
    },
    /// Raised when the source URL cannot be expanded.
    #[error("package source `{name}` has an invalid url: {source}")]
    Url {
        /// Name of the offending source.
        name: String,
        /// Underlying expansion failure.
        #[source]
        source: AuthUrlError,
    },
}

/// One package index declared by a project.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct PackageSource {
    /// Identifier used to refer to the source.
    pub name: String,
    /// Index URL, possibly with placeholders in its user-info.
    pub url: String,
    #[serde(default)]
    verify_ssl: Option<bool>,
}

impl PackageSource {
    /// Declares a source whose TLS verification follows the URL scheme.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            verify_ssl: None,
        }
    }

    /// Overrides whether TLS certificates are verified.
    #[must_use]
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = Some(verify_ssl);
        self
    }

    /// Returns whether TLS certificates are verified for this source.
    ///
    /// Unless set explicitly this is `true` exactly when the URL scheme is
    /// `https`.
    #[must_use]
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl.unwrap_or_else(|| {
            self.url
                .split_once(':')
                .is_some_and(|(scheme, _)| scheme.trim().eq_ignore_ascii_case("https"))
        })
    }

    /// Ensures the name and URL are present after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::BlankName`] or [`SourceError::BlankUrl`].
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.name.trim().is_empty() {
            return Err(SourceError::BlankName);
        }
        if self.url.trim().is_empty() {
            return Err(SourceError::BlankUrl {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Returns the URL with user-info placeholders expanded against `env`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source is invalid or its URL cannot be
    /// expanded.
    pub fn expanded_url(&self, env: &impl EnvLookup) -> Result<String, SourceError> {
        self.validate()?;
        expand_env_vars_in_auth_with(&self.url, env).map_err(|source| SourceError::Url {
            name: self.name.clone(),
            source,
        })
    }
}
