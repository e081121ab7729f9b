//! Lazily compiled regular expressions shared by the matchers.

use std::sync::OnceLock;

use regex::Regex;
use tracing::error;

/// Compiles `pattern` into `cell` on first use and returns the cached value.
///
/// A pattern that fails to compile is logged once and yields `None` on every
/// call, so matchers degrade to "no match" instead of panicking.
pub(crate) fn cached(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: &'static str,
) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            error!(pattern, error = %err, "built-in pattern failed to compile");
            None
        }
    })
    .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    static VALID: OnceLock<Option<Regex>> = OnceLock::new();
    static BROKEN: OnceLock<Option<Regex>> = OnceLock::new();

    #[test]
    fn valid_pattern_is_compiled_once() {
        let first = cached(&VALID, r"^python\d*$").expect("pattern compiles");
        let second = cached(&VALID, r"^python\d*$").expect("pattern compiles");

        assert!(std::ptr::eq(first, second));
        assert!(first.is_match("python3"));
    }

    #[test]
    fn broken_pattern_yields_none() {
        assert!(cached(&BROKEN, r"python(").is_none());
        assert!(cached(&BROKEN, r"python(").is_none());
    }
}
