//! Loading whole files into an arena.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use strata_arena::Arena;

use crate::error::IoError;
use crate::text::ArenaText;

/// Read the whole of `path` into `arena`.
///
/// Allocates `len + 1` bytes so the result is NUL-terminated, then reads
/// exactly `len` bytes. The file length is taken once, up front; a file that
/// shrinks while being read fails with an `UnexpectedEof` I/O error.
///
/// Arena space consumed by a failed read is not returned until the arena
/// is reset. If the arena is too small, the `CapacityExceeded` error names
/// the caller's source location.
#[track_caller]
pub fn read_file(path: impl AsRef<Path>, arena: &mut Arena) -> Result<ArenaText, IoError> {
    let path = path.as_ref();
    let io_err = |source: io::Error| IoError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let file_len = file.metadata().map_err(io_err)?.len();
    let too_large = || IoError::TooLarge {
        path: path.to_path_buf(),
        len: file_len,
    };
    let len = usize::try_from(file_len).map_err(|_| too_large())?;
    let total = len.checked_add(1).ok_or_else(too_large)?;

    let bytes = arena.alloc::<u8>(total)?;
    let buf = arena.get_mut(bytes)?;
    file.read_exact(&mut buf[..len]).map_err(io_err)?;
    Ok(ArenaText::new(bytes, len))
}

/// Read `path` into `arena` and check that it is valid UTF-8.
#[track_caller]
pub fn read_text(path: impl AsRef<Path>, arena: &mut Arena) -> Result<ArenaText, IoError> {
    let text = read_file(path, arena)?;
    text.to_str(arena)?;
    Ok(text)
}
