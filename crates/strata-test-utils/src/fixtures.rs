//! File fixtures for I/O tests.
//!
//! [`TempFile`] writes its contents to a uniquely named file under the
//! system temp directory and removes it on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// A temporary file removed when dropped.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Create a file holding `contents`. `stem` makes the name readable in
    /// failure output.
    pub fn with_contents(stem: &str, contents: &[u8]) -> io::Result<Self> {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "strata-{stem}-{}-{n}.tmp",
            std::process::id()
        ));
        fs::write(&path, contents)?;
        Ok(Self { path })
    }

    /// A path that is guaranteed not to exist.
    pub fn missing_path(stem: &str) -> PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "strata-missing-{stem}-{}-{n}.tmp",
            std::process::id()
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_round_trip_and_cleanup() {
        let path = {
            let file = TempFile::with_contents("fixture", b"hello").unwrap();
            assert_eq!(fs::read(file.path()).unwrap(), b"hello");
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn missing_path_does_not_exist() {
        assert!(!TempFile::missing_path("nope").exists());
    }
}
