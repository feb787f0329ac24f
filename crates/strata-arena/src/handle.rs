//! Allocation handles.
//!
//! An [`ArenaSlice`] encodes where an allocation lives inside an arena's
//! block: a byte offset, an element count, the identity of the arena that
//! produced it, and the reset epoch it was allocated in. Handles are plain
//! `Copy` values and never borrow the arena; every access goes back through
//! the arena, which rejects handles that are stale or foreign in O(1).

use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;

/// Typed handle to a run of `T` elements inside an arena.
#[must_use]
pub struct ArenaSlice<T> {
    /// Identity of the arena that produced this handle.
    pub(crate) arena_id: u64,
    /// Arena epoch at allocation time; bumped by every reset and free.
    pub(crate) epoch: u32,
    /// Byte offset from the start of the block.
    pub(crate) offset: usize,
    /// Length in elements.
    pub(crate) len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArenaSlice<T> {
    pub(crate) fn new(arena_id: u64, epoch: u32, offset: usize, len: usize) -> Self {
        Self {
            arena_id,
            epoch,
            offset,
            len,
            _marker: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of the first element from the start of the block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    pub fn byte_len(&self) -> usize {
        self.len * size_of::<T>()
    }

    /// Byte offset one past the last element.
    pub fn end_offset(&self) -> usize {
        self.offset + self.byte_len()
    }

    /// The reset epoch this handle was allocated in.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Handle to the single element at `index`, or `None` past the end.
    pub fn element(&self, index: usize) -> Option<Self> {
        (index < self.len).then(|| {
            Self::new(
                self.arena_id,
                self.epoch,
                self.offset + index * size_of::<T>(),
                1,
            )
        })
    }

    /// Handle to the first `len` elements of this allocation.
    ///
    /// `len` is clamped to the handle's length.
    pub fn prefix(&self, len: usize) -> Self {
        Self::new(self.arena_id, self.epoch, self.offset, len.min(self.len))
    }
}

impl<T> Clone for ArenaSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaSlice<T> {}

impl<T> PartialEq for ArenaSlice<T> {
    fn eq(&self, other: &Self) -> bool {
        self.arena_id == other.arena_id
            && self.epoch == other.epoch
            && self.offset == other.offset
            && self.len == other.len
    }
}

impl<T> Eq for ArenaSlice<T> {}

impl<T> fmt::Debug for ArenaSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaSlice")
            .field("arena_id", &self.arena_id)
            .field("epoch", &self.epoch)
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> fmt::Display for ArenaSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaSlice(arena={}, epoch={}, off={}, len={})",
            self.arena_id, self.epoch, self.offset, self.len
        )
    }
}
