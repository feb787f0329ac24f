//! Byte strings stored in an arena.

use strata_arena::{Arena, ArenaError, ArenaSlice};

use crate::error::IoError;

/// A length-delimited byte string living in an arena.
///
/// The backing allocation is one byte longer than the text and ends in a
/// NUL, so the contents can be handed unchanged to APIs that expect
/// C strings (shader compilers, for one).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaText {
    /// Allocation including the trailing NUL.
    bytes: ArenaSlice<u8>,
    /// Length excluding the trailing NUL.
    len: usize,
}

impl ArenaText {
    pub(crate) fn new(bytes: ArenaSlice<u8>, len: usize) -> Self {
        debug_assert_eq!(bytes.len(), len + 1);
        Self { bytes, len }
    }

    /// Copy `text` into `arena`, appending a NUL.
    #[track_caller]
    pub fn copy_from(arena: &mut Arena, text: &[u8]) -> Result<Self, ArenaError> {
        let len = text.len();
        let bytes = arena.alloc::<u8>(len + 1)?;
        arena.get_mut(bytes)?[..len].copy_from_slice(text);
        Ok(Self::new(bytes, len))
    }

    /// Length in bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The text without its terminator.
    pub fn as_bytes<'a>(&self, arena: &'a Arena) -> Result<&'a [u8], ArenaError> {
        Ok(&arena.get(self.bytes)?[..self.len])
    }

    /// The text including its trailing NUL.
    pub fn as_bytes_with_nul<'a>(&self, arena: &'a Arena) -> Result<&'a [u8], ArenaError> {
        arena.get(self.bytes)
    }

    /// The text as UTF-8.
    pub fn to_str<'a>(&self, arena: &'a Arena) -> Result<&'a str, IoError> {
        let bytes = self.as_bytes(arena)?;
        std::str::from_utf8(bytes).map_err(|e| IoError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })
    }

    /// Handle to the allocation, terminator included.
    pub fn handle(&self) -> ArenaSlice<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_from_appends_nul() {
        let mut arena = Arena::new(32).unwrap();
        let text = ArenaText::copy_from(&mut arena, b"abc").unwrap();
        assert_eq!(text.len(), 3);
        assert_eq!(text.as_bytes(&arena).unwrap(), b"abc");
        assert_eq!(text.as_bytes_with_nul(&arena).unwrap(), b"abc\0");
        assert_eq!(arena.used(), 4);

        let handle = text.handle();
        assert_eq!(handle.len(), 4);
        assert!(arena.owns(&handle));
        arena.reset().unwrap();
        assert!(!arena.owns(&text.handle()));
    }

    #[test]
    fn empty_text_is_just_a_terminator() {
        let mut arena = Arena::new(8).unwrap();
        let text = ArenaText::copy_from(&mut arena, b"").unwrap();
        assert!(text.is_empty());
        assert_eq!(text.as_bytes_with_nul(&arena).unwrap(), b"\0");
    }

    #[test]
    fn to_str_rejects_invalid_utf8() {
        let mut arena = Arena::new(8).unwrap();
        let text = ArenaText::copy_from(&mut arena, &[b'o', b'k', 0xFF]).unwrap();
        assert!(matches!(
            text.to_str(&arena),
            Err(IoError::InvalidUtf8 { valid_up_to: 2 })
        ));
    }
}
