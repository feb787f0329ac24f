//! Fixed-capacity bump arena with arena-backed growable sequences.
//!
//! An [`Arena`] owns one contiguous block obtained once from the system
//! allocator and serves zero-filled, correctly aligned allocations from it
//! by advancing a cursor. Memory is reclaimed only in bulk: [`Arena::reset`]
//! rewinds the cursor, [`Arena::free`] releases the block.
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── block: Vec<u8>        (fixed capacity, never resized)
//! ├── cursor                (bump pointer, 0 ≤ cursor ≤ capacity)
//! ├── epoch                 (bumped on reset/free, stamped into handles)
//! └── ArenaStats            (cumulative counters)
//!
//! ArenaSlice<T>             (offset + len + arena id + epoch, Copy)
//! ArenaVec<T>               (len + Option<ArenaSlice<T>>, grows by doubling)
//! ```
//!
//! # Handles instead of pointers
//!
//! Allocations are returned as [`ArenaSlice`] handles rather than
//! references, so an arena can hand out any number of them while still
//! being mutated. Every access goes back through the arena, which rejects
//! handles from another arena or from before the latest reset.
//!
//! # Failure
//!
//! Exhaustion is an ordinary [`ArenaError::CapacityExceeded`] result: the
//! arena never grows its block and never returns a partial allocation.
//!
//! # Safety
//!
//! All `unsafe` is confined to `raw.rs`, which reinterprets aligned byte
//! ranges as slices of [`Pod`] types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
mod raw;
pub mod stats;
pub mod vec;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::ArenaSlice;
pub use raw::Pod;
pub use stats::ArenaStats;
pub use vec::ArenaVec;
