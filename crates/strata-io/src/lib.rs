//! Read files into Strata arenas.
//!
//! Loaders for text assets (shader sources, configuration snippets) that
//! only need the bytes for a short while: the contents are placed in an
//! [`Arena`](strata_arena::Arena), used, and reclaimed in bulk by resetting
//! or freeing the arena.
//!
//! ```no_run
//! use strata_arena::Arena;
//! use strata_io::read_text;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut arena = Arena::new(4096)?;
//! let vertex = read_text("shaders/basic.vert", &mut arena)?;
//! let fragment = read_text("shaders/basic.frag", &mut arena)?;
//! let _sources = (vertex.to_str(&arena)?, fragment.to_str(&arena)?);
//! arena.free();
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod file;
pub mod text;

pub use error::IoError;
pub use file::{read_file, read_text};
pub use text::ArenaText;
