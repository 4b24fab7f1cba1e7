//! Core traits for compression and decompression.
//!
//! The one-shot functions in the codec crates cover most uses. These traits
//! describe the chunked interface for callers that feed data from a reader or
//! drain it into fixed-size buffers.

use crate::error::{GbaLzError, Result};

/// Status of a streaming decompression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressStatus {
    /// More input is needed to continue decompression.
    NeedsInput,
    /// More output buffer space is needed.
    NeedsOutput,
    /// Decompression is complete.
    Done,
}

/// Status of a streaming compression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressStatus {
    /// More input data can be accepted.
    NeedsInput,
    /// More output buffer space is needed.
    NeedsOutput,
    /// Compression is complete.
    Done,
}

/// Flush mode for compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// No flush - keep accepting input.
    #[default]
    None,
    /// Finish - no more input follows, complete the stream.
    Finish,
}

/// A streaming decompressor (decoder).
pub trait Decompressor {
    /// Decompress data from input to output.
    ///
    /// # Arguments
    ///
    /// * `input` - Input compressed data
    /// * `output` - Output buffer for decompressed data
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status)
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)>;

    /// Reset the decompressor to its initial state.
    fn reset(&mut self);

    /// Check if the decompressor has finished.
    fn is_finished(&self) -> bool;

    /// Decompress all data at once (convenience method).
    ///
    /// Fails with [`GbaLzError::UnexpectedEof`] if the input runs out before
    /// the stream is complete.
    fn decompress_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut input_pos = 0;
        let mut buffer = vec![0u8; 32768];

        loop {
            let (consumed, produced, status) = self.decompress(&input[input_pos..], &mut buffer)?;

            input_pos += consumed;
            output.extend_from_slice(&buffer[..produced]);

            match status {
                DecompressStatus::Done => break,
                DecompressStatus::NeedsInput if input_pos >= input.len() => {
                    return Err(GbaLzError::unexpected_eof(input_pos as u64));
                }
                DecompressStatus::NeedsOutput | DecompressStatus::NeedsInput => continue,
            }
        }

        Ok(output)
    }
}

/// Chunked front end for an encoder.
///
/// Input may arrive in any number of calls; passing [`FlushMode::Finish`]
/// marks the last one. After that, repeated calls with empty input drain the
/// encoded stream into `output` until [`CompressStatus::Done`].
pub trait Compressor {
    /// Accept `input` and write encoded bytes to `output`.
    ///
    /// Returns `(consumed, produced, status)`.
    fn compress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<(usize, usize, CompressStatus)>;

    /// Drop buffered input and output and start a new stream.
    fn reset(&mut self);

    /// Whether the whole stream has been handed out.
    fn is_finished(&self) -> bool;

    /// Encode `input` as one complete stream.
    fn compress_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut buffer = vec![0u8; 32768];
        let mut rest = input;

        loop {
            let (consumed, produced, status) =
                self.compress(rest, &mut buffer, FlushMode::Finish)?;
            rest = &rest[consumed..];
            output.extend_from_slice(&buffer[..produced]);

            let stalled = consumed == 0 && produced == 0;
            if status == CompressStatus::Done || (stalled && rest.is_empty()) {
                return Ok(output);
            }
        }
    }
}
