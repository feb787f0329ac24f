//! Error types for reading files into arenas.

use std::fmt;
use std::io;
use std::path::PathBuf;

use strata_arena::ArenaError;

/// Errors that can occur while loading a file into an arena.
#[derive(Debug)]
pub enum IoError {
    /// The file could not be opened, measured or read.
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The arena could not hold the file contents.
    Arena(ArenaError),
    /// The file is larger than this platform can address.
    TooLarge {
        /// The file being read.
        path: PathBuf,
        /// Length reported by the file system.
        len: u64,
    },
    /// The contents are not valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        valid_up_to: usize,
    },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
            Self::Arena(e) => write!(f, "arena error: {e}"),
            Self::TooLarge { path, len } => {
                write!(f, "{} is too large to load ({len} bytes)", path.display())
            }
            Self::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid UTF-8 after byte {valid_up_to}")
            }
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for IoError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
