//! Allocation counters for an arena.
//!
//! [`ArenaStats`] is updated on every allocation, reset and growth event so
//! callers can size arenas from observed workloads instead of guessing.

/// Cumulative counters describing how an arena has been used.
///
/// Counters survive `reset()`; only `free()` (or dropping the arena)
/// discards them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Number of successful allocations.
    pub alloc_count: u64,
    /// Bytes handed out to callers, excluding alignment padding.
    pub bytes_allocated: u64,
    /// Bytes skipped to satisfy alignment.
    pub padding_bytes: u64,
    /// Bytes left behind as dead space when a sequence outgrew its buffer.
    pub abandoned_bytes: u64,
    /// Number of allocation requests rejected for lack of space.
    pub failed_allocs: u64,
    /// Number of `reset()` calls.
    pub reset_count: u64,
    /// Largest cursor position ever reached, in bytes from the start.
    pub high_water_mark: usize,
}

impl ArenaStats {
    pub(crate) fn record_alloc(&mut self, padding: usize, bytes: usize, cursor: usize) {
        self.alloc_count += 1;
        self.padding_bytes += padding as u64;
        self.bytes_allocated += bytes as u64;
        self.high_water_mark = self.high_water_mark.max(cursor);
    }
}
