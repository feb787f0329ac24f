//! Growable sequences stored inside an arena.
//!
//! An [`ArenaVec`] is a length/capacity header around an [`ArenaSlice`]
//! buffer. It never owns memory: every operation that touches the elements
//! takes the [`Arena`] the buffer came from. When a push finds the buffer
//! full, a buffer of twice the capacity is bump-allocated, the live
//! elements are copied across, and the old buffer is left behind as dead
//! space until the arena is reset.
//!
//! Because old buffers are never reclaimed, an arena hosting a sequence
//! grown one push at a time to `n` elements needs room for roughly `2n`
//! elements (`1 + 2 + 4 + ... + n`), not `n`.

use std::fmt;
use std::panic::Location;

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::handle::ArenaSlice;
use crate::raw::Pod;

/// A sequence of `T` whose buffer lives in an [`Arena`].
///
/// Deliberately neither `Clone` nor `Copy`: two headers sharing one buffer
/// would append into the same slots.
pub struct ArenaVec<T> {
    /// Current buffer; `None` until the first growth.
    buf: Option<ArenaSlice<T>>,
    /// Number of live elements, always `<= capacity()`.
    len: usize,
}

impl<T: Pod> ArenaVec<T> {
    /// An empty sequence with no buffer. Does not touch any arena.
    pub fn new() -> Self {
        Self { buf: None, len: 0 }
    }

    /// An empty sequence with room for `capacity` elements.
    #[track_caller]
    pub fn with_capacity(arena: &mut Arena, capacity: usize) -> Result<Self, ArenaError> {
        let mut vec = Self::new();
        if capacity > 0 {
            vec.relocate(arena, capacity)?;
        }
        Ok(vec)
    }

    /// Append a zeroed element and return a mutable reference to it.
    ///
    /// Grows the buffer to `max(1, 2 * capacity)` when full. On error the
    /// sequence is left exactly as it was. An exhaustion error names the
    /// caller's source location.
    #[track_caller]
    pub fn push_slot<'a>(&mut self, arena: &'a mut Arena) -> Result<&'a mut T, ArenaError> {
        if self.is_full() {
            self.grow(arena)?;
        }
        let buf = self.live_buffer()?;
        let slot = buf.element(self.len).ok_or(ArenaError::OutOfBounds {
            index: self.len,
            len: buf.len(),
        })?;
        // The slot may hold a popped value; hand it out zeroed like a
        // fresh allocation.
        arena.bytes_mut(slot)?.fill(0);
        let view = arena.get_mut(slot)?;
        self.len += 1;
        Ok(&mut view[0])
    }

    /// Append `value`, returning its index.
    #[track_caller]
    pub fn push(&mut self, arena: &mut Arena, value: T) -> Result<usize, ArenaError> {
        *self.push_slot(arena)? = value;
        Ok(self.len - 1)
    }

    /// Append every element of `values`, growing at most once.
    #[track_caller]
    pub fn extend_from_slice(&mut self, arena: &mut Arena, values: &[T]) -> Result<(), ArenaError> {
        if values.is_empty() {
            return Ok(());
        }
        self.reserve(arena, values.len())?;
        let buf = self.live_buffer()?;
        let start = self.len;
        arena.get_mut(buf)?[start..start + values.len()].copy_from_slice(values);
        self.len += values.len();
        Ok(())
    }

    /// Ensure room for `additional` more elements.
    ///
    /// The target capacity is reached by doubling from the current one, so
    /// the growth law is the same as for repeated pushes; the buffer is
    /// relocated at most once.
    #[track_caller]
    pub fn reserve(&mut self, arena: &mut Arena, additional: usize) -> Result<(), ArenaError> {
        let location = Location::caller();
        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(|| overflow(arena, location))?;
        let mut target = self.capacity();
        if target >= required {
            return Ok(());
        }
        while target < required {
            target = next_capacity(target).ok_or_else(|| overflow(arena, location))?;
        }
        self.relocate(arena, target)
    }

    /// Remove and return the last element.
    pub fn pop(&mut self, arena: &Arena) -> Result<Option<T>, ArenaError> {
        if self.len == 0 {
            return Ok(None);
        }
        let value = arena.get(self.live_buffer()?)?[self.len - 1];
        self.len -= 1;
        Ok(Some(value))
    }

    /// Element at `index`.
    pub fn get(&self, arena: &Arena, index: usize) -> Result<T, ArenaError> {
        if index >= self.len {
            return Err(ArenaError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(arena.get(self.live_buffer()?)?[index])
    }

    /// The live elements.
    pub fn as_slice<'a>(&self, arena: &'a Arena) -> Result<&'a [T], ArenaError> {
        match self.buf {
            None => Ok(&[]),
            Some(buf) => Ok(&arena.get(buf)?[..self.len]),
        }
    }

    /// The live elements, mutably.
    pub fn as_mut_slice<'a>(&self, arena: &'a mut Arena) -> Result<&'a mut [T], ArenaError> {
        match self.buf {
            None => Ok(&mut []),
            Some(buf) => Ok(&mut arena.get_mut(buf)?[..self.len]),
        }
    }

    /// Grow by one doubling step.
    #[track_caller]
    fn grow(&mut self, arena: &mut Arena) -> Result<(), ArenaError> {
        let location = Location::caller();
        let new_capacity =
            next_capacity(self.capacity()).ok_or_else(|| overflow(arena, location))?;
        self.relocate(arena, new_capacity)
    }

    /// Move the live elements into a fresh buffer of `capacity` elements.
    #[track_caller]
    fn relocate(&mut self, arena: &mut Arena, capacity: usize) -> Result<(), ArenaError> {
        // Validate the old buffer before spending arena space on a new one.
        if let Some(old) = self.buf {
            arena.check(&old)?;
        }
        let new_buf = arena.alloc::<T>(capacity)?;
        if let Some(old) = self.buf {
            if self.len > 0 {
                arena.copy_elements(old, new_buf, self.len)?;
            }
            arena.abandon(old.byte_len());
        }
        self.buf = Some(new_buf);
        Ok(())
    }

    fn live_buffer(&self) -> Result<ArenaSlice<T>, ArenaError> {
        self.buf.ok_or(ArenaError::OutOfBounds {
            index: self.len,
            len: 0,
        })
    }
}

impl<T> ArenaVec<T> {
    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of element slots reserved in the arena.
    pub fn capacity(&self) -> usize {
        self.buf.map_or(0, |b| b.len())
    }

    /// Whether the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next push will relocate the buffer.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Drop every element, keeping the buffer.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The whole reserved buffer, including slots past `len()`.
    pub fn buffer(&self) -> Option<ArenaSlice<T>> {
        self.buf
    }

    /// Handle covering exactly the live elements.
    ///
    /// The handle stays valid after the sequence relocates again only for
    /// as long as the arena is not reset; it keeps pointing at the old copy.
    pub fn as_handle(&self) -> Option<ArenaSlice<T>> {
        self.buf.map(|b| b.prefix(self.len))
    }
}

impl<T: Pod> Default for ArenaVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArenaVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaVec")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("buf", &self.buf)
            .finish()
    }
}

/// `max(1, 2 * capacity)`, or `None` on overflow.
fn next_capacity(capacity: usize) -> Option<usize> {
    if capacity == 0 {
        Some(1)
    } else {
        capacity.checked_mul(2)
    }
}

fn overflow(arena: &Arena, location: &'static Location<'static>) -> ArenaError {
    ArenaError::CapacityExceeded {
        requested: usize::MAX,
        remaining: arena.remaining(),
        location,
    }
}
