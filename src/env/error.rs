//! Error types for credential expansion in URLs.

use thiserror::Error;

/// Errors raised while expanding placeholders inside a URL's user-info.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AuthUrlError {
    /// Raised when the input does not start with a `scheme:` prefix.
    #[error("`{url}` is not a URL: expected a scheme such as `https:`")]
    MissingScheme {
        /// Input as supplied by the caller.
        url: String,
    },
    /// Raised when the URL is structurally invalid once credentials are
    /// expanded, for example an empty host or a non-numeric port.
    #[error("`{url}` is not a valid URL: {source}")]
    Invalid {
        /// Input as supplied by the caller, before expansion.
        url: String,
        /// Parser diagnostic for the rejected URL.
        #[source]
        source: url::ParseError,
    },
}
