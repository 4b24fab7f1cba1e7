//! LZ compression mode definitions.
//!
//! The BIOS understands two closely related LZSS variants. Both share the
//! flag-byte group layout and the 4 KB window; they differ in how the match
//! length is stored and therefore in the longest match they can express.

use gbalz_core::error::{GbaLzError, Result};
use std::fmt;

/// Maximum back-reference distance for both modes.
pub const MAX_DISPLACEMENT: usize = 4096;

/// Shortest match the encoder will emit.
pub const MIN_MATCH_LEN: usize = 3;

/// Longest LZ10 match.
pub const LZ10_MAX_MATCH: usize = 18;

/// Longest LZ11 match.
pub const LZ11_MAX_MATCH: usize = 65808;

/// LZ compression mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LzMode {
    /// LZ10: 2-byte matches of 3..=18 bytes (GBA BIOS `LZ77UnComp`).
    #[default]
    Lz10,
    /// LZ11: 2, 3 or 4-byte matches of 3..=65808 bytes (NDS/DSi BIOS).
    Lz11,
}

impl LzMode {
    /// Parse a mode from its header tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x10 => Some(Self::Lz10),
            0x11 => Some(Self::Lz11),
            _ => None,
        }
    }

    /// Detect the mode of a compressed stream from its first byte.
    pub fn detect(data: &[u8]) -> Result<Self> {
        let &tag = data
            .first()
            .ok_or_else(|| GbaLzError::invalid_header("empty stream"))?;
        Self::from_tag(tag).ok_or_else(|| GbaLzError::unknown_tag(tag))
    }

    /// Get the header tag byte.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Lz10 => 0x10,
            Self::Lz11 => 0x11,
        }
    }

    /// Get the maximum match length.
    pub fn max_match(&self) -> usize {
        match self {
            Self::Lz10 => LZ10_MAX_MATCH,
            Self::Lz11 => LZ11_MAX_MATCH,
        }
    }

    /// Get the maximum back-reference distance.
    pub fn max_displacement(&self) -> usize {
        MAX_DISPLACEMENT
    }

    /// Get a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lz10 => "LZ10",
            Self::Lz11 => "LZ11",
        }
    }
}

impl fmt::Display for LzMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoder/decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LzssOptions {
    /// Wire format variant.
    pub mode: LzMode,
    /// Forbid (when encoding) or flag (when decoding) displacement-1 matches.
    ///
    /// The GBA's VRAM only accepts 16-bit writes, so the BIOS VRAM
    /// decompressor cannot copy the byte it has just produced.
    pub vram_safe: bool,
}

impl LzssOptions {
    /// Create options for a mode with VRAM safety off.
    pub fn new(mode: LzMode) -> Self {
        Self {
            mode,
            vram_safe: false,
        }
    }

    /// Set the VRAM-safe policy.
    pub fn vram_safe(mut self, vram_safe: bool) -> Self {
        self.vram_safe = vram_safe;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(LzMode::from_tag(0x10), Some(LzMode::Lz10));
        assert_eq!(LzMode::from_tag(0x11), Some(LzMode::Lz11));
        assert_eq!(LzMode::from_tag(0x40), None);
        assert_eq!(LzMode::Lz10.tag(), 0x10);
        assert_eq!(LzMode::Lz11.tag(), 0x11);
    }

    #[test]
    fn test_detect() {
        assert_eq!(LzMode::detect(&[0x11, 0, 0, 0]).unwrap(), LzMode::Lz11);
        assert!(matches!(
            LzMode::detect(&[0x24, 0, 0, 0]),
            Err(GbaLzError::UnknownTag { found: 0x24 })
        ));
        assert!(matches!(
            LzMode::detect(&[]),
            Err(GbaLzError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_limits() {
        assert_eq!(LzMode::Lz10.max_match(), 18);
        assert_eq!(LzMode::Lz11.max_match(), 65808);
        assert_eq!(LzMode::Lz10.max_displacement(), LzMode::Lz11.max_displacement());
    }

    #[test]
    fn test_options_builder() {
        let opts = LzssOptions::new(LzMode::Lz11).vram_safe(true);
        assert_eq!(opts.mode, LzMode::Lz11);
        assert!(opts.vram_safe);
        assert_eq!(LzssOptions::default(), LzssOptions::new(LzMode::Lz10));
        assert_eq!(LzMode::Lz11.to_string(), "LZ11");
    }
}
