//! LZSS tokens and their wire encoding.
//!
//! A stream body is a sequence of groups. Each group is one flag byte
//! followed by up to eight units, the most significant flag bit describing
//! the first unit: `0` is a literal byte, `1` a back-reference.
//!
//! Back-references store `distance - 1` in 12 bits. The length field depends
//! on the mode:
//!
//! ```text
//! LZ10              LLLL DDDD  DDDD DDDD                 len = L + 3
//! LZ11 (3..=16)     LLLL DDDD  DDDD DDDD                 len = L + 1, L >= 2
//! LZ11 (17..=272)   0000 LLLL  LLLL DDDD  DDDD DDDD      len = L + 0x11
//! LZ11 (273..)      0001 LLLL  LLLL LLLL  LLLL DDDD  ..  len = L + 0x111
//! ```

use crate::mode::LzMode;

/// Largest length the 2-byte LZ11 form holds.
const LZ11_SHORT_MAX: usize = 0x10;

/// Largest length the 3-byte LZ11 form holds.
const LZ11_MEDIUM_MAX: usize = 0x110;

/// Bias of the 3-byte LZ11 length field.
const LZ11_MEDIUM_BIAS: usize = 0x11;

/// Bias of the 4-byte LZ11 length field.
const LZ11_LONG_BIAS: usize = 0x111;

/// LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssToken {
    /// A literal byte.
    Literal(u8),
    /// A match reference to previously decoded data.
    Match {
        /// Number of bytes to copy.
        length: u32,
        /// Distance back from the current output position (1..=4096).
        distance: u16,
    },
}

impl LzssToken {
    /// Number of output bytes this token expands to.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => *length as usize,
        }
    }

    /// Number of bytes this token occupies in the stream, flag bit excluded.
    pub fn encoded_len(&self, mode: LzMode) -> usize {
        match (self, mode) {
            (Self::Literal(_), _) => 1,
            (Self::Match { .. }, LzMode::Lz10) => 2,
            (Self::Match { length, .. }, LzMode::Lz11) => match *length as usize {
                ..=LZ11_SHORT_MAX => 2,
                ..=LZ11_MEDIUM_MAX => 3,
                _ => 4,
            },
        }
    }
}

/// Size of a back-reference payload, given its first byte.
pub(crate) fn match_payload_len(mode: LzMode, first: u8) -> usize {
    match mode {
        LzMode::Lz10 => 2,
        LzMode::Lz11 => match first >> 4 {
            0 => 3,
            1 => 4,
            _ => 2,
        },
    }
}

/// Append a back-reference payload.
///
/// The caller guarantees `3 <= length <= mode.max_match()` and
/// `1 <= distance <= 4096`.
pub(crate) fn write_match(out: &mut Vec<u8>, mode: LzMode, length: usize, distance: usize) {
    debug_assert!(length >= 3 && length <= mode.max_match());
    debug_assert!((1..=mode.max_displacement()).contains(&distance));

    let disp = distance - 1;
    let disp_hi = (disp >> 8) as u8;
    let disp_lo = disp as u8;

    match mode {
        LzMode::Lz10 => {
            out.push((((length - 3) as u8) << 4) | disp_hi);
            out.push(disp_lo);
        }
        LzMode::Lz11 if length <= LZ11_SHORT_MAX => {
            out.push((((length - 1) as u8) << 4) | disp_hi);
            out.push(disp_lo);
        }
        LzMode::Lz11 if length <= LZ11_MEDIUM_MAX => {
            let len = length - LZ11_MEDIUM_BIAS;
            out.push((len >> 4) as u8);
            out.push(((len as u8) << 4) | disp_hi);
            out.push(disp_lo);
        }
        LzMode::Lz11 => {
            let len = length - LZ11_LONG_BIAS;
            out.push(0x10 | (len >> 12) as u8);
            out.push((len >> 4) as u8);
            out.push(((len as u8) << 4) | disp_hi);
            out.push(disp_lo);
        }
    }
}

/// Decode a back-reference payload into `(length, distance)`.
///
/// `payload` must be exactly [`match_payload_len`] bytes long.
pub(crate) fn read_match(mode: LzMode, payload: &[u8]) -> (usize, usize) {
    let b = |i: usize| payload[i] as usize;

    let (length, disp_at) = match mode {
        LzMode::Lz10 => ((b(0) >> 4) + 3, 0),
        LzMode::Lz11 => match b(0) >> 4 {
            0 => (((b(0) << 4) | (b(1) >> 4)) + LZ11_MEDIUM_BIAS, 1),
            1 => (
                (((b(0) & 0x0F) << 12) | (b(1) << 4) | (b(2) >> 4)) + LZ11_LONG_BIAS,
                2,
            ),
            n => (n + 1, 0),
        },
    };

    let distance = (((b(disp_at) & 0x0F) << 8) | b(disp_at + 1)) + 1;
    (length, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(mode: LzMode, length: usize, distance: usize) -> Vec<u8> {
        let mut out = Vec::new();
        write_match(&mut out, mode, length, distance);
        assert_eq!(out.len(), match_payload_len(mode, out[0]));
        assert_eq!(read_match(mode, &out), (length, distance));
        out
    }

    #[test]
    fn test_lz10_layout() {
        assert_eq!(roundtrip(LzMode::Lz10, 3, 1), [0x00, 0x00]);
        assert_eq!(roundtrip(LzMode::Lz10, 18, 4096), [0xFF, 0xFF]);
        assert_eq!(roundtrip(LzMode::Lz10, 5, 0x124), [0x21, 0x23]);
    }

    #[test]
    fn test_lz11_short_layout() {
        assert_eq!(roundtrip(LzMode::Lz11, 3, 1), [0x20, 0x00]);
        assert_eq!(roundtrip(LzMode::Lz11, 16, 0x101), [0xF1, 0x00]);
    }

    #[test]
    fn test_lz11_medium_layout() {
        assert_eq!(roundtrip(LzMode::Lz11, 17, 1), [0x00, 0x00, 0x00]);
        assert_eq!(roundtrip(LzMode::Lz11, 272, 4096), [0x0F, 0xFF, 0xFF]);
    }

    #[test]
    fn test_lz11_long_layout() {
        assert_eq!(roundtrip(LzMode::Lz11, 273, 1), [0x10, 0x00, 0x00, 0x00]);
        assert_eq!(roundtrip(LzMode::Lz11, 65808, 2), [0x1F, 0xFF, 0xF0, 0x01]);
    }

    #[test]
    fn test_token_sizes() {
        let lit = LzssToken::Literal(7);
        assert_eq!(lit.output_len(), 1);
        assert_eq!(lit.encoded_len(LzMode::Lz11), 1);

        let m = |length| LzssToken::Match {
            length,
            distance: 1,
        };
        assert_eq!(m(18).encoded_len(LzMode::Lz10), 2);
        assert_eq!(m(16).encoded_len(LzMode::Lz11), 2);
        assert_eq!(m(17).encoded_len(LzMode::Lz11), 3);
        assert_eq!(m(272).encoded_len(LzMode::Lz11), 3);
        assert_eq!(m(273).encoded_len(LzMode::Lz11), 4);
        assert_eq!(m(273).output_len(), 273);
    }
}
