//! Stream header and padding.
//!
//! Every stream starts with a 32-bit little-endian word: the low byte is the
//! mode tag, the upper 24 bits the decompressed size.
//!
//! ```text
//! +------+-----------+-----------+-----------+
//! | tag  | size[7:0] | size[15:8]| size[23:16]|
//! +------+-----------+-----------+-----------+
//! ```

use crate::mode::LzMode;
use gbalz_core::error::{GbaLzError, Result};

/// Header length in bytes.
pub const HEADER_LEN: usize = 4;

/// Largest input the 24-bit size field can describe.
pub const MAX_ENCODE_LEN: usize = 0x00FF_FFFF;

/// Parsed stream header.
///
/// The size always fits the 24-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzssHeader {
    mode: LzMode,
    size: usize,
}

impl LzssHeader {
    /// Create a header, rejecting sizes the 24-bit field cannot hold.
    pub fn new(mode: LzMode, size: usize) -> Result<Self> {
        if size > MAX_ENCODE_LEN {
            return Err(GbaLzError::input_too_large(size, MAX_ENCODE_LEN));
        }
        Ok(Self { mode, size })
    }

    /// Get the wire format variant.
    pub fn mode(&self) -> LzMode {
        self.mode
    }

    /// Get the declared decompressed size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let Some(bytes) = data.first_chunk::<HEADER_LEN>() else {
            return Err(GbaLzError::invalid_header(format!(
                "need {HEADER_LEN} bytes, got {}",
                data.len()
            )));
        };

        let mode = LzMode::from_tag(bytes[0]).ok_or_else(|| GbaLzError::unknown_tag(bytes[0]))?;
        let size = u32::from_le_bytes(*bytes) as usize >> 8;

        Ok(Self { mode, size })
    }

    /// Parse the header and require a specific mode.
    pub fn parse_expecting(data: &[u8], mode: LzMode) -> Result<Self> {
        let header = Self::parse(data).map_err(|err| match err {
            GbaLzError::UnknownTag { found } => GbaLzError::mode_mismatch(mode.tag(), found),
            other => other,
        })?;

        if header.mode != mode {
            return Err(GbaLzError::mode_mismatch(mode.tag(), header.mode.tag()));
        }

        Ok(header)
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let word = ((self.size as u32) << 8) | u32::from(self.mode.tag());
        word.to_le_bytes()
    }

    /// Append the header to `out`.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }
}

/// Zero-pad `out` to a multiple of 4 bytes.
///
/// The BIOS reads its source in 32-bit words.
pub fn pad_to_word(out: &mut Vec<u8>) {
    let padded = (out.len() + 3) & !3;
    out.resize(padded, 0);
}

/// Worst-case encoded size for an input of `len` bytes.
///
/// Reached when nothing matches: one control byte per eight literals.
pub fn max_compressed_size(len: usize) -> usize {
    let raw = HEADER_LEN + len + len.div_ceil(8);
    (raw + 3) & !3
}
