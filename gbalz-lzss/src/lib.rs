//! # gbalz LZSS
//!
//! Pure Rust implementation of the LZ10/LZ11 compression formats understood
//! by the GBA and NDS BIOS decompression routines.
//!
//! - **LZ10** (tag `0x10`): matches of 3..=18 bytes, 2-byte back-references
//! - **LZ11** (tag `0x11`): matches of 3..=65808 bytes, 2/3/4-byte back-references
//!
//! Both use a 4 KB window. Data written straight to VRAM must be encoded
//! *VRAM-safe*, i.e. without back-references to the immediately preceding
//! byte.
//!
//! ## Example
//!
//! ```rust
//! use gbalz_lzss::{LzMode, decode, encode};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT".repeat(8);
//! let compressed = encode(&data, LzMode::Lz10, true).unwrap();
//! assert_eq!(compressed.len() % 4, 0);
//!
//! let decoded = decode(&compressed, LzMode::Lz10, true).unwrap();
//! assert_eq!(decoded.data, data);
//! assert!(decoded.warnings.is_empty());
//! ```
//!
//! ## Streaming Decompression
//!
//! ```rust
//! use gbalz_lzss::{LzMode, LzssOptions, StreamingLzssDecoder, encode_lz11};
//! use gbalz_core::traits::{DecompressStatus, Decompressor};
//!
//! let compressed = encode_lz11(&[7u8; 500], false).unwrap();
//! let mut decoder = StreamingLzssDecoder::new(LzssOptions::new(LzMode::Lz11));
//! let mut output = vec![0u8; 500];
//!
//! let (_, produced, status) = decoder.decompress(&compressed, &mut output)
//!     .expect("decompression failed");
//! assert_eq!(produced, 500);
//! assert_eq!(status, DecompressStatus::Done);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod header;
pub mod lzss;
pub mod matcher;
pub mod mode;
pub mod streaming;

// Re-exports
pub use decode::{
    DecodeOutput, DecodeWarning, LzssDecoder, decode, decode_auto, decode_lz10, decode_lz11,
    read_tokens,
};
pub use encode::{LzssEncoder, encode, encode_lz10, encode_lz11, write_stream};
pub use header::{LzssHeader, MAX_ENCODE_LEN, max_compressed_size};
pub use lzss::LzssToken;
pub use matcher::{Match, MatchFinder};
pub use mode::{LzMode, LzssOptions, MAX_DISPLACEMENT, MIN_MATCH_LEN};
pub use streaming::{DecoderPhase, LzssCompressor, StreamingLzssDecoder, decode_streaming};
