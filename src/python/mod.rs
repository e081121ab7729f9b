//! Python interpreter discovery.
//!
//! [`find_python_in_path`] accepts either an interpreter executable or an
//! installation prefix (a virtual environment root, `sys.prefix`, a Homebrew
//! keg) and returns the interpreter it names. Lookups never fail: anything the
//! filesystem refuses to answer counts as "not found" and is logged at debug
//! level.

mod name;
mod platform;


use std::fs::Metadata;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::debug;

pub use platform::{Platform, UnknownPlatform};

use name::InterpreterName;
use platform::LayoutStrategy;

/// Finds the interpreter named by `path` using the layout of the current
/// platform.
///
/// `path` may be the interpreter itself or an installation prefix. Relative
/// paths are resolved against the current directory. Symlinks are not
/// resolved, so the result names the binary the way the caller did.
///
/// Returns `None` when `path` does not exist, is not an interpreter, or is a
/// directory without one.
#[must_use]
pub fn find_python_in_path(path: &Utf8Path) -> Option<Utf8PathBuf> {
    InterpreterLocator::new().find(path)
}

/// Resolves interpreter paths using one platform's layout rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InterpreterLocator {
    platform: Platform,
}

impl Default for InterpreterLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterLocator {
    /// Builds a locator for the platform this binary was built for.
    #[must_use]
    pub const fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Builds a locator that applies `platform`'s layout rules.
    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    /// Returns the layout this locator probes.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolves `path` to an interpreter executable.
    ///
    /// A file is accepted when its name is an interpreter name for the
    /// platform and it is executable. A directory is treated as a prefix and
    /// its candidate directories are probed in priority order.
    #[must_use]
    pub fn find(&self, path: &Utf8Path) -> Option<Utf8PathBuf> {
        let strategy = self.platform.strategy();
        let absolute = absolutize(path)?;
        let metadata = match absolute.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!(path = %absolute, error = %err, "interpreter path is not accessible");
                return None;
            }
        };

        if metadata.is_file() {
            return accepts_file(strategy, &absolute, &metadata).then_some(absolute);
        }
        if !metadata.is_dir() {
            return None;
        }

        let found = (strategy.candidate_dirs)(&absolute)
            .iter()
            .find_map(|dir| probe_dir(strategy, dir));
        if found.is_none() {
            debug!(prefix = %absolute, platform = %self.platform, "no interpreter below prefix");
        }
        found
    }
}

fn absolutize(path: &Utf8Path) -> Option<Utf8PathBuf> {
    match std::path::absolute(path) {
        Ok(absolute) => Utf8PathBuf::from_path_buf(absolute)
            .map_err(|non_utf8| {
                debug!(path = %non_utf8.display(), "interpreter path is not valid UTF-8");
            })
            .ok(),
        Err(err) => {
            debug!(path = %path, error = %err, "cannot make interpreter path absolute");
            None
        }
    }
}

fn accepts_file(strategy: &LayoutStrategy, path: &Utf8Path, metadata: &Metadata) -> bool {
    if path.file_name().and_then(strategy.parse_name).is_none() {
        debug!(path = %path, "file name is not a Python interpreter");
        return false;
    }
    let executable = (strategy.is_executable)(metadata);
    if !executable {
        debug!(path = %path, "interpreter file is not executable");
    }
    executable
}

fn probe_dir(strategy: &LayoutStrategy, dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let file_names = match list_file_names(dir) {
        Ok(file_names) => file_names,
        Err(err) => {
            debug!(dir = %dir, error = %err, "skipping candidate directory");
            return None;
        }
    };

    let mut candidates: Vec<(InterpreterName, String)> = file_names
        .into_iter()
        .filter_map(|file_name| {
            (strategy.parse_name)(&file_name).map(|parsed| (parsed, file_name))
        })
        .collect();
    candidates.sort_by(|(left, left_name), (right, right_name)| {
        (strategy.tier)(left)
            .cmp(&(strategy.tier)(right))
            .then_with(|| left.recency().cmp(&right.recency()))
            .then_with(|| left_name.cmp(right_name))
    });

    candidates
        .into_iter()
        .map(|(_, file_name)| dir.join(file_name))
        .find(|candidate| is_runnable(strategy, candidate))
}

fn list_file_names(dir: &Utf8Path) -> io::Result<Vec<String>> {
    let listing = Dir::open_ambient_dir(dir, ambient_authority())?;
    let mut file_names = Vec::new();
    for entry in listing.entries()? {
        match entry.and_then(|found| found.file_name()) {
            Ok(file_name) => file_names.push(file_name),
            Err(err) => debug!(dir = %dir, error = %err, "skipping unreadable directory entry"),
        }
    }
    Ok(file_names)
}

// Interpreters in virtual environments are usually symlinks that leave the
// prefix, so metadata follows links with ambient authority.
fn is_runnable(strategy: &LayoutStrategy, candidate: &Utf8Path) -> bool {
    match candidate.metadata() {
        Ok(metadata) => {
            let runnable = (strategy.is_executable)(&metadata);
            if !runnable {
                debug!(candidate = %candidate, "candidate is not executable");
            }
            runnable
        }
        Err(err) => {
            debug!(candidate = %candidate, error = %err, "candidate is not accessible");
            false
        }
    }
}
