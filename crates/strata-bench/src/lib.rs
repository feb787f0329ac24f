//! Benchmark workloads for the Strata arena allocator.
//!
//! - [`mixed_requests`]: a deterministic mix of element sizes, alignments
//!   and counts resembling a frame's worth of scratch allocations.
//! - [`sequence_footprint`]: arena bytes a sequence grown one push at a
//!   time needs, dead buffers included.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_arena::{Arena, ArenaError};

/// One `(size, align, count)` allocation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    pub size: usize,
    pub align: usize,
    pub count: usize,
}

/// Element `(size, align)` pairs drawn by [`mixed_requests`].
const SHAPES: [(usize, usize); 6] = [(1, 1), (2, 2), (4, 4), (8, 8), (12, 4), (16, 16)];

/// `n` requests drawn from common element shapes with 1..=64 elements each.
///
/// Seeded with ChaCha8, so the same seed always replays the same workload.
pub fn mixed_requests(n: usize, seed: u64) -> Vec<Request> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let (size, align) = SHAPES[rng.random_range(0..SHAPES.len())];
            let count = rng.random_range(1..=64);
            Request { size, align, count }
        })
        .collect()
}

/// Replay `requests` against `arena`, resetting whenever it fills up.
///
/// Returns the number of resets performed.
pub fn replay(arena: &mut Arena, requests: &[Request]) -> Result<usize, ArenaError> {
    let mut resets = 0;
    for r in requests {
        match arena.alloc_raw(r.size, r.align, r.count) {
            Ok(_) => {}
            Err(ArenaError::CapacityExceeded { .. }) => {
                arena.reset()?;
                resets += 1;
                let _retry = arena.alloc_raw(r.size, r.align, r.count)?;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(resets)
}

/// Bytes of arena needed to push `len` elements of `elem_size` bytes one
/// at a time into an empty sequence: the sum of every buffer it outgrows
/// plus the final one.
///
/// Returns `None` if that total does not fit in `usize`.
pub fn sequence_footprint(len: usize, elem_size: usize) -> Option<usize> {
    let mut cap = 0usize;
    let mut total = 0usize;
    while cap < len {
        cap = if cap == 0 { 1 } else { cap.checked_mul(2)? };
        total = total.checked_add(cap.checked_mul(elem_size)?)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_arena::ArenaVec;

    #[test]
    fn mixed_requests_are_deterministic() {
        let requests = mixed_requests(256, 7);
        assert_eq!(requests, mixed_requests(256, 7));
        assert_ne!(requests, mixed_requests(256, 8));
        assert!(requests.iter().all(|r| {
            SHAPES.contains(&(r.size, r.align)) && (1..=64).contains(&r.count)
        }));
    }

    #[test]
    fn replay_resets_small_arena() {
        let requests = mixed_requests(200, 3);
        let mut arena = Arena::new(1024).unwrap();
        let resets = replay(&mut arena, &requests).unwrap();
        assert!(resets > 0);
        assert_eq!(arena.stats().reset_count as usize, resets);
    }

    #[test]
    fn footprint_matches_real_growth() {
        let len = 100;
        let mut arena = Arena::new(sequence_footprint(len, 4).unwrap()).unwrap();
        let mut v: ArenaVec<u32> = ArenaVec::new();
        for i in 0..len as u32 {
            v.push(&mut arena, i).unwrap();
        }
        assert_eq!(arena.remaining(), 0);
        assert_eq!(sequence_footprint(3, 4), Some(28));
        assert_eq!(sequence_footprint(0, 4), Some(0));
    }

    #[test]
    fn footprint_overflow_is_none() {
        assert_eq!(sequence_footprint(usize::MAX, 1), None);
        assert_eq!(sequence_footprint(usize::MAX / 4, 8), None);
    }
}
