//! Temporary interpreter prefixes for integration tests.

use camino::Utf8PathBuf;
use envpy::test_support::write_stub_interpreter;
use tempfile::TempDir;

pub struct TempPrefix {
    _tmp: TempDir,
    pub root: Utf8PathBuf,
}

impl TempPrefix {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir should be utf8: {}", path.display()));
        Self { _tmp: tmp, root }
    }

    pub fn stub(&self, relative: &str) -> Utf8PathBuf {
        write_stub_interpreter(&self.root, relative, true)
            .unwrap_or_else(|err| panic!("write stub {relative}: {err}"))
    }
}
