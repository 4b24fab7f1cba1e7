//! # gbalz Core
//!
//! Core components shared by the gbalz codec crates.
//!
//! - [`error`]: Error types
//! - [`traits`]: Chunked compression/decompression traits
//! - [`ringbuffer`]: Sliding window history for LZ decompression
//!
//! ## Example
//!
//! ```rust
//! use gbalz_core::RingBuffer;
//!
//! let mut ring = RingBuffer::gba_lz();
//! ring.write_byte(b'A');
//! assert_eq!(ring.read_at_distance(1).unwrap(), b'A');
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod ringbuffer;
pub mod traits;

// Re-exports for convenience
pub use error::{GbaLzError, Result};
pub use ringbuffer::{GBA_LZ_WINDOW, RingBuffer};
pub use traits::{CompressStatus, Compressor, DecompressStatus, Decompressor, FlushMode};
