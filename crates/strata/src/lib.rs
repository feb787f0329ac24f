//! Strata: fixed-capacity bump arenas and arena-backed growable sequences.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Strata sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let mut arena = Arena::new(256).unwrap();
//!
//! // Typed, zero-filled allocation.
//! let ints = arena.alloc::<i32>(3).unwrap();
//! arena.get_mut(ints).unwrap()[1] = 42;
//! assert_eq!(arena.get(ints).unwrap(), &[0, 42, 0]);
//!
//! // A sequence that grows inside the arena.
//! let mut seq: ArenaVec<u16> = ArenaVec::new();
//! for i in 0..5 {
//!     seq.push(&mut arena, i).unwrap();
//! }
//! assert_eq!(seq.capacity(), 8);
//! assert_eq!(seq.as_slice(&arena).unwrap(), &[0, 1, 2, 3, 4]);
//!
//! // Bulk reclamation invalidates every handle.
//! arena.reset().unwrap();
//! assert!(arena.get(ints).is_err());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `strata-arena` | `Arena`, `ArenaSlice`, `ArenaVec`, config, stats, errors |
//! | [`io`] | `strata-io` | `read_file`, `read_text`, `ArenaText` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena allocator and growable sequences (`strata-arena`).
pub use strata_arena as arena;

/// Loading files into arenas (`strata-io`).
pub use strata_io as io;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use strata_arena::{
        Arena, ArenaConfig, ArenaError, ArenaSlice, ArenaStats, ArenaVec, Pod,
    };
    pub use strata_io::{read_file, read_text, ArenaText, IoError};
}
