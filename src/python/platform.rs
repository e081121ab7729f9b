//! Per-platform installation layouts.
//!
//! Each [`Platform`] maps to a layout strategy: a handful of pure functions
//! describing where interpreters live below a prefix, which file names count
//! as interpreters, and what makes a file executable. The locator itself stays
//! platform-agnostic.

use std::fmt;
use std::fs::Metadata;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use super::name::{InterpreterName, posix_tier, windows_tier};

/// Installation layout conventions used when probing for an interpreter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Platform {
    /// Linux and other Unix systems: `<prefix>/bin/python3`.
    Posix,
    /// macOS, including framework builds and Homebrew kegs.
    MacOs,
    /// Windows: `<prefix>\Scripts\python.exe` or `<prefix>\python.exe`.
    Windows,
}

impl Platform {
    /// Returns the layout of the platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Posix
        }
    }

    /// Returns the lowercase name accepted by [`Platform::from_str`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }

    pub(crate) fn strategy(self) -> &'static LayoutStrategy {
        match self {
            Self::Posix => &POSIX,
            Self::MacOs => &MACOS,
            Self::Windows => &WINDOWS,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a layout name is not one of `posix`, `macos` or `windows`.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown platform layout `{value}`: expected posix, macos or windows")]
pub struct UnknownPlatform {
    /// Layout name as supplied.
    pub value: String,
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "posix" | "linux" | "unix" => Ok(Self::Posix),
            "macos" | "darwin" => Ok(Self::MacOs),
            "windows" | "nt" => Ok(Self::Windows),
            _ => Err(UnknownPlatform {
                value: value.to_owned(),
            }),
        }
    }
}

/// Probing rules for one platform.
pub(crate) struct LayoutStrategy {
    /// Directories below a prefix that may hold the interpreter, highest
    /// priority first.
    pub(crate) candidate_dirs: fn(&Utf8Path) -> Vec<Utf8PathBuf>,
    /// Recognises interpreter file names.
    pub(crate) parse_name: fn(&str) -> Option<InterpreterName>,
    /// Preference between recognised names in one directory; lower wins.
    pub(crate) tier: fn(&InterpreterName) -> u8,
    /// Decides whether a file can be run as a program.
    pub(crate) is_executable: fn(&Metadata) -> bool,
}

static POSIX: LayoutStrategy = LayoutStrategy {
    candidate_dirs: posix_dirs,
    parse_name: InterpreterName::parse_posix,
    tier: posix_tier,
    is_executable: has_exec_bit,
};

static MACOS: LayoutStrategy = LayoutStrategy {
    candidate_dirs: macos_dirs,
    parse_name: InterpreterName::parse_macos,
    tier: posix_tier,
    is_executable: has_exec_bit,
};

static WINDOWS: LayoutStrategy = LayoutStrategy {
    candidate_dirs: windows_dirs,
    parse_name: InterpreterName::parse_windows,
    tier: windows_tier,
    is_executable: Metadata::is_file,
};

fn posix_dirs(prefix: &Utf8Path) -> Vec<Utf8PathBuf> {
    vec![prefix.join("bin")]
}

fn macos_dirs(prefix: &Utf8Path) -> Vec<Utf8PathBuf> {
    vec![
        prefix.join("bin"),
        prefix.join("libexec").join("bin"),
        prefix
            .join("Frameworks")
            .join("Python.framework")
            .join("Versions")
            .join("Current")
            .join("bin"),
    ]
}

fn windows_dirs(prefix: &Utf8Path) -> Vec<Utf8PathBuf> {
    vec![prefix.join("Scripts"), prefix.to_path_buf()]
}

#[cfg(unix)]
fn has_exec_bit(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    metadata.is_file() && metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bit(metadata: &Metadata) -> bool {
    metadata.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("posix", Platform::Posix)]
    #[case("Linux", Platform::Posix)]
    #[case("macos", Platform::MacOs)]
    #[case("darwin", Platform::MacOs)]
    #[case(" windows ", Platform::Windows)]
    #[case("nt", Platform::Windows)]
    fn platform_parses_known_names(#[case] value: &str, #[case] expected: Platform) {
        assert_eq!(value.parse::<Platform>(), Ok(expected));
    }

    #[test]
    fn platform_rejects_unknown_names() {
        let err = "beos".parse::<Platform>().expect_err("unknown layout");
        assert!(err.to_string().contains("beos"), "unexpected error: {err}");
    }

    #[test]
    fn platform_display_round_trips_through_from_str() {
        for platform in [Platform::Posix, Platform::MacOs, Platform::Windows] {
            assert_eq!(platform.to_string().parse::<Platform>(), Ok(platform));
        }
    }

    #[test]
    fn windows_probes_scripts_before_prefix() {
        let dirs = (Platform::Windows.strategy().candidate_dirs)(Utf8Path::new("/venv"));
        assert_eq!(
            dirs,
            vec![Utf8PathBuf::from("/venv/Scripts"), Utf8PathBuf::from("/venv")]
        );
    }

    #[test]
    fn macos_probes_framework_layout_after_bin() {
        let dirs = (Platform::MacOs.strategy().candidate_dirs)(Utf8Path::new("/opt/py"));
        assert_eq!(dirs.first(), Some(&Utf8PathBuf::from("/opt/py/bin")));
        assert!(
            dirs.contains(&Utf8PathBuf::from(
                "/opt/py/Frameworks/Python.framework/Versions/Current/bin"
            )),
            "framework layout missing: {dirs:?}"
        );
    }
}
