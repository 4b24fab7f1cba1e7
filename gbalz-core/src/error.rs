//! Error types for gbalz operations.
//!
//! Every fatal condition the codec can hit is a variant of [`GbaLzError`].
//! Recoverable conditions (a stream that overruns its declared size, a stream
//! that is not VRAM-safe) are not errors; the decoders report them as
//! warnings next to the decoded data.

use std::io;
use thiserror::Error;

/// The main error type for gbalz operations.
#[derive(Debug, Error)]
pub enum GbaLzError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input is larger than the format can describe.
    #[error("Input too large: {size} bytes exceeds the maximum of {max} bytes")]
    InputTooLarge {
        /// Size of the rejected input.
        size: usize,
        /// Largest accepted size.
        max: usize,
    },

    /// Malformed or truncated stream header.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Header tag byte names no known compression mode.
    #[error("Unknown compression tag {found:#04x}")]
    UnknownTag {
        /// The tag byte found in the header.
        found: u8,
    },

    /// Header tag names a valid mode, but not the one requested.
    #[error("Compression mode mismatch: expected tag {expected:#04x}, found {found:#04x}")]
    ModeMismatch {
        /// Tag of the requested mode.
        expected: u8,
        /// Tag found in the header.
        found: u8,
    },

    /// Back-reference reaching before the start of the output.
    #[error(
        "Invalid back-reference: displacement {distance} reads before the start of output ({produced} bytes produced)"
    )]
    InvalidDistance {
        /// The displacement encoded in the stream.
        distance: usize,
        /// Bytes produced when the reference was decoded.
        produced: usize,
    },

    /// Token that the wire format cannot represent.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of the token error.
        message: String,
    },

    /// Stream ended in the middle of a group.
    #[error("Unexpected end of stream at offset {offset}")]
    UnexpectedEof {
        /// Offset in the compressed input where more data was needed.
        offset: u64,
    },
}

/// Result type alias for gbalz operations.
pub type Result<T> = std::result::Result<T, GbaLzError>;

impl GbaLzError {
    /// Create an input too large error.
    pub fn input_too_large(size: usize, max: usize) -> Self {
        Self::InputTooLarge { size, max }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unknown tag error.
    pub fn unknown_tag(found: u8) -> Self {
        Self::UnknownTag { found }
    }

    /// Create a mode mismatch error.
    pub fn mode_mismatch(expected: u8, found: u8) -> Self {
        Self::ModeMismatch { expected, found }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, produced: usize) -> Self {
        Self::InvalidDistance { distance, produced }
    }

    /// Create an invalid token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Create an unexpected end of stream error.
    pub fn unexpected_eof(offset: u64) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Whether this error was caused by a malformed stream rather than the
    /// caller's input or the environment.
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(
            self,
            Self::InvalidHeader { .. }
                | Self::UnknownTag { .. }
                | Self::ModeMismatch { .. }
                | Self::InvalidDistance { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GbaLzError::unknown_tag(0x24);
        assert!(err.to_string().contains("0x24"));

        let err = GbaLzError::mode_mismatch(0x10, 0x11);
        assert!(err.to_string().contains("expected tag 0x10"));
        assert!(err.to_string().contains("found 0x11"));

        let err = GbaLzError::invalid_distance(9, 4);
        assert!(err.to_string().contains("displacement 9"));

        let err = GbaLzError::input_too_large(0x0100_0000, 0x00FF_FFFF);
        assert!(err.to_string().contains("16777216"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: GbaLzError = io_err.into();
        assert!(matches!(err, GbaLzError::Io(_)));
        assert!(!err.is_corrupt_stream());
    }

    #[test]
    fn test_corrupt_stream_classification() {
        assert!(GbaLzError::unexpected_eof(12).is_corrupt_stream());
        assert!(GbaLzError::invalid_header("short").is_corrupt_stream());
        assert!(!GbaLzError::input_too_large(1, 0).is_corrupt_stream());
        assert!(!GbaLzError::invalid_token("length 2").is_corrupt_stream());
    }
}
