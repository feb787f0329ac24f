//! Arena-specific error types.

use std::error::Error;
use std::fmt;
use std::panic::Location;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The system allocator could not supply the backing block.
    BackingAllocationFailed {
        /// Size of the block that was requested, in bytes.
        requested: usize,
    },
    /// Not enough room left between the cursor and the end of the block.
    CapacityExceeded {
        /// Number of bytes requested, excluding alignment padding.
        /// Saturates at `usize::MAX` when `count * size` overflows.
        requested: usize,
        /// Bytes remaining between the cursor and the end of the block.
        remaining: usize,
        /// Call site of the allocation that ran out of room.
        location: &'static Location<'static>,
    },
    /// The requested alignment is zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// An allocation was requested for an element size of zero.
    ZeroSizedElement,
    /// The arena's backing block has been released with `free()`.
    Freed,
    /// A handle from before the most recent `reset()`.
    StaleHandle {
        /// The epoch encoded in the handle.
        handle_epoch: u32,
        /// The arena's current epoch.
        current_epoch: u32,
    },
    /// A handle produced by a different arena.
    ForeignHandle,
    /// An element index past the end of a sequence.
    OutOfBounds {
        /// The rejected index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackingAllocationFailed { requested } => {
                write!(f, "could not allocate a {requested} byte arena block")
            }
            Self::CapacityExceeded {
                requested,
                remaining,
                location,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, \
                     {remaining} bytes remaining (at {location})"
                )
            }
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
            Self::ZeroSizedElement => write!(f, "element size must be non-zero"),
            Self::Freed => write!(f, "arena has been freed"),
            Self::StaleHandle {
                handle_epoch,
                current_epoch,
            } => {
                write!(
                    f,
                    "stale handle: epoch {handle_epoch}, arena is at epoch {current_epoch}"
                )
            }
            Self::ForeignHandle => write!(f, "handle belongs to a different arena"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl Error for ArenaError {}
