//! Fixed-capacity bump arena.
//!
//! An [`Arena`] owns a single byte block obtained once at creation. Every
//! allocation advances a cursor past alignment padding and the requested
//! bytes, zero-fills the region, and returns an [`ArenaSlice`] handle. There
//! is no per-allocation metadata and no individual deallocation: memory is
//! reclaimed in bulk with [`Arena::reset`] or released with [`Arena::free`].
//!
//! ```text
//! block:  [ used ............ | pad | new alloc | free ............ ]
//!         0                cursor                                 capacity
//! ```

use std::mem::{align_of, size_of};
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::ArenaSlice;
use crate::raw::{self, Pod};
use crate::stats::ArenaStats;

/// Source of unique arena identities, so handles cannot cross arenas.
static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// A region allocator serving zeroed, aligned memory from one fixed block.
///
/// Allocation, reset and free take `&mut self`; reads of previously
/// allocated data take `&self`. The arena is `Send` but is designed for use
/// from one thread at a time.
pub struct Arena {
    /// Backing block. `None` once the arena has been freed.
    block: Option<Vec<u8>>,
    /// Bump pointer: offset of the next free byte.
    cursor: usize,
    /// Unique identity stamped into every handle.
    id: u64,
    /// Bumped on every effective reset and on free.
    epoch: u32,
    config: ArenaConfig,
    stats: ArenaStats,
}

impl Arena {
    /// Create an arena backed by a block of exactly `capacity` bytes.
    ///
    /// Returns `Err(ArenaError::BackingAllocationFailed)` if the system
    /// allocator cannot supply the block.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(capacity))
    }

    /// Create an arena from a full configuration.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        let mut block = Vec::new();
        block
            .try_reserve_exact(config.capacity)
            .map_err(|_| ArenaError::BackingAllocationFailed {
                requested: config.capacity,
            })?;
        block.resize(config.capacity, 0);

        Ok(Self {
            block: Some(block),
            cursor: 0,
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
            config,
            stats: ArenaStats::default(),
        })
    }

    /// Allocate `count` elements of `size` bytes each, aligned to `align`.
    ///
    /// This is the untyped entry point; the returned handle addresses the
    /// region as bytes (`count * size` of them). The region is zero-filled.
    ///
    /// # Errors
    ///
    /// - `InvalidAlignment` if `align` is not a power of two.
    /// - `ZeroSizedElement` if `size` is zero.
    /// - `CapacityExceeded` if the padded request does not fit in the
    ///   remaining space. The cursor is left untouched and the error carries
    ///   the caller's source location.
    /// - `Freed` if the arena has been freed.
    #[track_caller]
    pub fn alloc_raw(
        &mut self,
        size: usize,
        align: usize,
        count: usize,
    ) -> Result<ArenaSlice<u8>, ArenaError> {
        let offset = self.bump(size, align, count, Location::caller())?;
        Ok(ArenaSlice::new(self.id, self.epoch, offset, count * size))
    }

    /// Allocate `count` zeroed elements of `T` at `T`'s natural alignment.
    #[track_caller]
    pub fn alloc<T: Pod>(&mut self, count: usize) -> Result<ArenaSlice<T>, ArenaError> {
        let offset = self.bump(size_of::<T>(), align_of::<T>(), count, Location::caller())?;
        Ok(ArenaSlice::new(self.id, self.epoch, offset, count))
    }

    /// Allocate room for `values` and copy them in.
    #[track_caller]
    pub fn alloc_copy<T: Pod>(&mut self, values: &[T]) -> Result<ArenaSlice<T>, ArenaError> {
        let handle = self.alloc::<T>(values.len())?;
        self.bytes_mut(handle)?.copy_from_slice(raw::as_bytes(values));
        Ok(handle)
    }

    /// Core bump step shared by every allocation path. Returns the offset of
    /// the aligned, zero-filled region.
    fn bump(
        &mut self,
        size: usize,
        align: usize,
        count: usize,
        location: &'static Location<'static>,
    ) -> Result<usize, ArenaError> {
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }
        if size == 0 {
            return Err(ArenaError::ZeroSizedElement);
        }
        let block = self.block.as_mut().ok_or(ArenaError::Freed)?;

        // Padding is derived from the real address so that alignments larger
        // than the block's own alignment are still honoured.
        let addr = block.as_ptr() as usize + self.cursor;
        let mask = align - 1;
        let padding = align.wrapping_sub(addr & mask) & mask;
        let remaining = block.len() - self.cursor;

        // Compare element counts instead of multiplying, so an absurd
        // `count` cannot overflow.
        let fits = match remaining.checked_sub(padding) {
            Some(available) => count <= available / size,
            None => false,
        };
        if !fits {
            self.stats.failed_allocs += 1;
            return Err(ArenaError::CapacityExceeded {
                requested: count.saturating_mul(size),
                remaining,
                location,
            });
        }

        let start = self.cursor + padding;
        let bytes = count * size;
        let end = start + bytes;
        block[start..end].fill(0);
        self.cursor = end;
        self.stats.record_alloc(padding, bytes, end);
        Ok(start)
    }

    /// Rewind the cursor to the start of the block.
    ///
    /// Every handle allocated before the reset becomes stale and is rejected
    /// by the accessors. The bytes themselves are left as they were unless
    /// `poison_on_reset` is configured. Resetting an arena that holds no
    /// allocations is a no-op.
    pub fn reset(&mut self) -> Result<(), ArenaError> {
        let block = self.block.as_mut().ok_or(ArenaError::Freed)?;
        if self.cursor == 0 {
            return Ok(());
        }
        if self.config.poison_on_reset {
            block[..self.cursor].fill(ArenaConfig::POISON_BYTE);
        }
        self.cursor = 0;
        self.epoch = self.epoch.wrapping_add(1);
        self.stats.reset_count += 1;
        Ok(())
    }

    /// Release the backing block.
    ///
    /// Afterwards every allocation, reset and access fails with
    /// `ArenaError::Freed`. Freeing twice is harmless. Dropping the arena
    /// releases the block as well; `free` only makes it explicit.
    pub fn free(&mut self) {
        if self.block.take().is_some() {
            self.cursor = 0;
            self.epoch = self.epoch.wrapping_add(1);
            self.stats = ArenaStats::default();
        }
    }

    /// Shared view of a typed allocation.
    pub fn get<T: Pod>(&self, handle: ArenaSlice<T>) -> Result<&[T], ArenaError> {
        let bytes = self.bytes(handle)?;
        raw::cast_slice(bytes).ok_or(ArenaError::InvalidAlignment {
            align: align_of::<T>(),
        })
    }

    /// Mutable view of a typed allocation.
    pub fn get_mut<T: Pod>(&mut self, handle: ArenaSlice<T>) -> Result<&mut [T], ArenaError> {
        let bytes = self.bytes_mut(handle)?;
        raw::cast_slice_mut(bytes).ok_or(ArenaError::InvalidAlignment {
            align: align_of::<T>(),
        })
    }

    /// The raw bytes behind any handle.
    pub fn bytes<T>(&self, handle: ArenaSlice<T>) -> Result<&[u8], ArenaError> {
        self.check(&handle)?;
        let block = self.block.as_ref().ok_or(ArenaError::Freed)?;
        block
            .get(handle.offset..handle.end_offset())
            .ok_or(ArenaError::OutOfBounds {
                index: handle.end_offset(),
                len: self.cursor,
            })
    }

    /// Mutable raw bytes behind any handle.
    pub fn bytes_mut<T>(&mut self, handle: ArenaSlice<T>) -> Result<&mut [u8], ArenaError> {
        self.check(&handle)?;
        let cursor = self.cursor;
        let block = self.block.as_mut().ok_or(ArenaError::Freed)?;
        block
            .get_mut(handle.offset..handle.end_offset())
            .ok_or(ArenaError::OutOfBounds {
                index: handle.end_offset(),
                len: cursor,
            })
    }

    /// Copy the first `len` elements of `from` to the start of `to`.
    ///
    /// Both handles must be live; `len` must not exceed either length.
    pub(crate) fn copy_elements<T: Pod>(
        &mut self,
        from: ArenaSlice<T>,
        to: ArenaSlice<T>,
        len: usize,
    ) -> Result<(), ArenaError> {
        self.check(&from)?;
        self.check(&to)?;
        if len > from.len() || len > to.len() {
            return Err(ArenaError::OutOfBounds {
                index: len,
                len: from.len().min(to.len()),
            });
        }
        let block = self.block.as_mut().ok_or(ArenaError::Freed)?;
        let src = from.offset..from.offset + len * size_of::<T>();
        block.copy_within(src, to.offset);
        Ok(())
    }

    /// Record `bytes` of dead space left behind by a relocated buffer.
    pub(crate) fn abandon(&mut self, bytes: usize) {
        self.stats.abandoned_bytes += bytes as u64;
    }

    /// Check that a handle was produced by this arena in the current epoch.
    pub fn check<T>(&self, handle: &ArenaSlice<T>) -> Result<(), ArenaError> {
        if self.block.is_none() {
            return Err(ArenaError::Freed);
        }
        if handle.arena_id != self.id {
            return Err(ArenaError::ForeignHandle);
        }
        if handle.epoch != self.epoch {
            return Err(ArenaError::StaleHandle {
                handle_epoch: handle.epoch,
                current_epoch: self.epoch,
            });
        }
        Ok(())
    }

    /// Whether a handle is still valid for this arena.
    pub fn owns<T>(&self, handle: &ArenaSlice<T>) -> bool {
        self.check(handle).is_ok()
    }

    /// Total size of the backing block in bytes. Zero once freed.
    pub fn capacity(&self) -> usize {
        self.block.as_ref().map_or(0, Vec::len)
    }

    /// Bytes consumed so far, including padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes left between the cursor and the end of the block.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// Whether `free()` has been called.
    pub fn is_freed(&self) -> bool {
        self.block.is_none()
    }

    /// Current reset epoch.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// The configuration this arena was created with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Cumulative allocation counters.
    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    /// Memory held by the backing block in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.block.as_ref().map_or(0, Vec::capacity)
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("epoch", &self.epoch)
            .field("used", &self.cursor)
            .field("capacity", &self.capacity())
            .field("freed", &self.is_freed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_arena_is_empty() {
        let arena = Arena::new(64).unwrap();
        assert_eq!(arena.capacity(), 64);
        assert_eq!(arena.used(), 0);
        assert_eq!(arena.remaining(), 64);
        assert!(!arena.is_freed());
    }

    #[test]
    fn alloc_returns_zeroed_data() {
        let mut arena = Arena::new(128).unwrap();
        let h = arena.alloc::<u32>(10).unwrap();
        let data = arena.get(h).unwrap();
        assert_eq!(data.len(), 10);
        assert!(data.iter().all(|&v| v == 0));
    }

    #[test]
    fn three_ints_then_fourteen_more_fails() {
        let mut arena = Arena::new(64).unwrap();
        let first = arena.alloc::<i32>(3).unwrap();
        assert_eq!(first.len(), 3);
        let after_first = arena.used();
        // A fresh Vec block is at least 4-byte aligned on every supported
        // allocator, so no padding is needed for the first i32 run.
        assert_eq!(after_first, 12);

        let err = arena.alloc::<i32>(14).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::CapacityExceeded {
                requested: 56,
                remaining: 52,
                ..
            }
        ));
        assert_eq!(arena.used(), after_first);
        assert_eq!(arena.stats().failed_allocs, 1);
    }

    #[test]
    fn exact_fit_succeeds_and_one_more_byte_fails() {
        let mut arena = Arena::new(32).unwrap();
        let _full = arena.alloc::<u8>(32).unwrap();
        assert_eq!(arena.remaining(), 0);
        assert!(matches!(
            arena.alloc::<u8>(1),
            Err(ArenaError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn zero_count_alloc_is_valid() {
        let mut arena = Arena::new(16).unwrap();
        let h = arena.alloc::<u64>(0).unwrap();
        assert!(h.is_empty());
        assert!(arena.get(h).unwrap().is_empty());
    }

    #[test]
    fn padding_aligns_following_allocation() {
        let mut arena = Arena::new(64).unwrap();
        let _byte = arena.alloc::<u8>(1).unwrap();
        let h = arena.alloc::<u64>(1).unwrap();
        let ptr = arena.get(h).unwrap().as_ptr() as usize;
        assert_eq!(ptr % align_of::<u64>(), 0);
        assert!(arena.stats().padding_bytes > 0);
    }

    #[test]
    fn raw_alloc_honours_large_alignment() {
        let mut arena = Arena::new(256).unwrap();
        let _prefix = arena.alloc_raw(1, 1, 3).unwrap();
        let h = arena.alloc_raw(4, 64, 2).unwrap();
        assert_eq!(h.len(), 8);
        let ptr = arena.bytes(h).unwrap().as_ptr() as usize;
        assert_eq!(ptr % 64, 0);
    }

    #[test]
    fn invalid_alignment_rejected() {
        let mut arena = Arena::new(64).unwrap();
        assert_eq!(
            arena.alloc_raw(4, 3, 1).unwrap_err(),
            ArenaError::InvalidAlignment { align: 3 }
        );
        assert_eq!(
            arena.alloc_raw(4, 0, 1).unwrap_err(),
            ArenaError::InvalidAlignment { align: 0 }
        );
    }

    #[test]
    fn zero_sized_element_rejected() {
        let mut arena = Arena::new(64).unwrap();
        assert_eq!(
            arena.alloc_raw(0, 1, 10).unwrap_err(),
            ArenaError::ZeroSizedElement
        );
    }

    #[test]
    fn huge_count_does_not_overflow() {
        let mut arena = Arena::new(64).unwrap();
        let err = arena.alloc_raw(8, 8, usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::CapacityExceeded {
                requested: usize::MAX,
                remaining: 64,
                ..
            }
        ));
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn alloc_copy_round_trips() {
        let mut arena = Arena::new(64).unwrap();
        let h = arena.alloc_copy(&[1.5f32, 2.5, 3.5]).unwrap();
        assert_eq!(arena.get(h).unwrap(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn writes_are_visible_through_handle() {
        let mut arena = Arena::new(64).unwrap();
        let h = arena.alloc::<u16>(4).unwrap();
        arena.get_mut(h).unwrap()[2] = 0xBEEF;
        assert_eq!(arena.get(h).unwrap(), &[0, 0, 0xBEEF, 0]);
    }

    #[test]
    fn reset_rewinds_and_invalidates_handles() {
        let mut arena = Arena::new(64).unwrap();
        let h = arena.alloc::<u32>(4).unwrap();
        arena.reset().unwrap();
        assert_eq!(arena.used(), 0);
        assert_eq!(
            arena.get(h).unwrap_err(),
            ArenaError::StaleHandle {
                handle_epoch: 0,
                current_epoch: 1,
            }
        );
    }

    #[test]
    fn reset_on_empty_arena_is_noop() {
        let mut arena = Arena::new(64).unwrap();
        arena.reset().unwrap();
        assert_eq!(arena.epoch(), 0);
        assert_eq!(arena.stats().reset_count, 0);
    }

    #[test]
    fn realloc_after_reset_is_zeroed() {
        let mut arena = Arena::new(64).unwrap();
        let h = arena.alloc::<u8>(16).unwrap();
        arena.get_mut(h).unwrap().fill(0xFF);
        arena.reset().unwrap();
        let h = arena.alloc::<u8>(16).unwrap();
        assert!(arena.get(h).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn exhaustion_reports_the_allocating_call_site() {
        let mut arena = Arena::new(16).unwrap();
        let line = line!() + 1;
        let err = arena.alloc::<u64>(3).unwrap_err();
        match err {
            ArenaError::CapacityExceeded { location, .. } => {
                assert_eq!(location.file(), file!());
                assert_eq!(location.line(), line);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }

        // Copying goes through `alloc` but still reports this file.
        let line = line!() + 1;
        let err = arena.alloc_copy(&[0u32; 5]).unwrap_err();
        let ArenaError::CapacityExceeded { location, .. } = err else {
            panic!("expected CapacityExceeded, got {err:?}");
        };
        assert_eq!((location.file(), location.line()), (file!(), line));
        assert!(err.to_string().contains(&format!("{}:{line}:", file!())));
    }

    #[test]
    fn poison_on_reset_overwrites_dead_bytes() {
        let config = ArenaConfig::new(32).with_poison_on_reset(true);
        let mut arena = Arena::with_config(config).unwrap();
        assert!(arena.config().poison_on_reset);
        assert_eq!(arena.config().capacity, 32);
        let h = arena.alloc::<u8>(8).unwrap();
        arena.get_mut(h).unwrap().fill(1);
        arena.reset().unwrap();
        let block = arena.block.as_ref().unwrap();
        assert!(block[..8].iter().all(|&b| b == ArenaConfig::POISON_BYTE));
        assert!(block[8..].iter().all(|&b| b == 0));

        let h = arena.alloc::<u8>(8).unwrap();
        assert!(arena.get(h).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn free_rejects_further_use() {
        let mut arena = Arena::new(64).unwrap();
        let h = arena.alloc::<u8>(4).unwrap();
        arena.free();
        assert!(arena.is_freed());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.alloc::<u8>(1).unwrap_err(), ArenaError::Freed);
        assert_eq!(arena.reset().unwrap_err(), ArenaError::Freed);
        assert_eq!(arena.get(h).unwrap_err(), ArenaError::Freed);
        // Second free is harmless.
        arena.free();
    }

    #[test]
    fn foreign_handle_rejected() {
        let mut a = Arena::new(64).unwrap();
        let b = Arena::new(64).unwrap();
        let h = a.alloc::<u8>(4).unwrap();
        assert_eq!(b.get(h).unwrap_err(), ArenaError::ForeignHandle);
        assert!(a.owns(&h));
        assert!(!b.owns(&h));
    }

    #[test]
    fn sequential_allocs_dont_overlap() {
        let mut arena = Arena::new(128).unwrap();
        let a = arena.alloc::<u32>(5).unwrap();
        let b = arena.alloc::<u32>(3).unwrap();
        assert!(a.end_offset() <= b.offset());
        assert_eq!(arena.used(), 32);
    }

    #[test]
    fn backing_allocation_failure_is_reported() {
        let err = Arena::new(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            ArenaError::BackingAllocationFailed {
                requested: usize::MAX
            }
        );
    }
}
