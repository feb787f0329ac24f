//! Test utilities and fixtures for Strata development.
//!
//! Kept free of any dependency on the arena crates so that every crate in
//! the workspace, including `strata-arena` itself, can use it as a
//! dev-dependency. Helpers therefore speak in byte ranges and paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::TempFile;

use std::ops::Range;

/// Records the byte ranges handed out by an allocator between resets and
/// checks that none of them overlap.
#[derive(Debug, Default)]
pub struct RangeLog {
    ranges: Vec<Range<usize>>,
}

impl RangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a range. Empty ranges are ignored: they cannot overlap.
    pub fn record(&mut self, range: Range<usize>) {
        if !range.is_empty() {
            self.ranges.push(range);
        }
    }

    /// Forget every recorded range, as after an arena reset.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The first overlapping pair, if any.
    pub fn find_overlap(&self) -> Option<(Range<usize>, Range<usize>)> {
        let mut sorted = self.ranges.clone();
        sorted.sort_by_key(|r| r.start);
        sorted
            .windows(2)
            .find(|w| ranges_overlap(&w[0], &w[1]))
            .map(|w| (w[0].clone(), w[1].clone()))
    }
}

/// Whether two half-open ranges share at least one element.
pub fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Assert every byte in `bytes` is zero, reporting the first offender.
pub fn assert_all_zero(bytes: &[u8]) {
    if let Some(pos) = bytes.iter().position(|&b| b != 0) {
        panic!(
            "expected zero-filled region of {} bytes, found {:#04x} at offset {pos}",
            bytes.len(),
            bytes[pos]
        );
    }
}

/// Whether `addr` is a multiple of `align` (a power of two).
pub fn is_aligned(addr: usize, align: usize) -> bool {
    addr & (align - 1) == 0
}
