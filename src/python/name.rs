//! Interpreter file-name recognition.

use std::cmp::Reverse;
use std::sync::OnceLock;

use regex::Regex;

use crate::pattern;

const POSIX_PATTERN: &str = r"^python(?:(?P<version>\d+(?:\.\d+)*)(?P<abi>[dmt]*))?$";
const MACOS_PATTERN: &str = r"^python(?:@?(?P<version>\d+(?:\.\d+)*)(?P<abi>[dmt]*))?$";
const WINDOWS_PATTERN: &str =
    r"(?i)^python(?P<windowed>w)?(?:(?P<version>\d+(?:\.\d+)*)(?P<abi>t)?)?\.exe$";

static POSIX: OnceLock<Option<Regex>> = OnceLock::new();
static MACOS: OnceLock<Option<Regex>> = OnceLock::new();
static WINDOWS: OnceLock<Option<Regex>> = OnceLock::new();

/// File name recognised as a Python interpreter, reduced to its version
/// components (`python3.11` → `[3, 11]`, `python` → `[]`) and whether it
/// names a build variant (`python3.13t`, `python3.12d`, `pythonw.exe`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct InterpreterName {
    version: Vec<u32>,
    variant: bool,
}

impl InterpreterName {
    /// Parses `python`, `python3`, `python3.11` and names carrying ABI flags
    /// such as `python3.7m`, `python3.12d` or `python3.13t`.
    pub(crate) fn parse_posix(file_name: &str) -> Option<Self> {
        Self::parse_with(pattern::cached(&POSIX, POSIX_PATTERN)?, file_name)
    }

    /// Parses the POSIX names plus `python@3.11`.
    ///
    /// Homebrew names its kegs `python@3.11` and some installs link a binary
    /// under the keg name as well, so the `@` form is accepted for files too.
    pub(crate) fn parse_macos(file_name: &str) -> Option<Self> {
        Self::parse_with(pattern::cached(&MACOS, MACOS_PATTERN)?, file_name)
    }

    /// Parses `python.exe`, windowed `pythonw.exe` and versioned
    /// `python3.11.exe`, ignoring case.
    pub(crate) fn parse_windows(file_name: &str) -> Option<Self> {
        Self::parse_with(pattern::cached(&WINDOWS, WINDOWS_PATTERN)?, file_name)
    }

    fn parse_with(regex: &Regex, file_name: &str) -> Option<Self> {
        let caps = regex.captures(file_name)?;
        let version = match caps.name("version") {
            Some(found) => found
                .as_str()
                .split('.')
                .map(str::parse)
                .collect::<Result<Vec<u32>, _>>()
                .ok()?,
            None => Vec::new(),
        };
        let variant = ["abi", "windowed"]
            .iter()
            .any(|group| caps.name(group).is_some_and(|found| !found.as_str().is_empty()));
        Some(Self { version, variant })
    }

    pub(crate) fn version(&self) -> &[u32] {
        &self.version
    }

    /// Whether the name carries ABI flags or the Windows `w` suffix.
    pub(crate) const fn is_variant(&self) -> bool {
        self.variant
    }

    /// Sort key within one tier: newer versions first.
    pub(crate) fn recency(&self) -> Reverse<&[u32]> {
        Reverse(self.version.as_slice())
    }
}

/// POSIX preference: `python3`, then `python3.X`, then `python`, then the
/// remaining majors. Debug, free-threaded and other flagged builds come last.
pub(crate) fn posix_tier(name: &InterpreterName) -> u8 {
    if name.is_variant() {
        return 4;
    }
    match name.version() {
        [3] => 0,
        [3, ..] => 1,
        [] => 2,
        _ => 3,
    }
}

/// Windows preference: `python.exe`, then versioned names, then `pythonw.exe`
/// and other variants.
pub(crate) fn windows_tier(name: &InterpreterName) -> u8 {
    match (name.is_variant(), name.version().is_empty()) {
        (false, true) => 0,
        (false, false) => 1,
        (true, _) => 2,
    }
}
