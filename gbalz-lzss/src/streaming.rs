//! Chunked compression and decompression.
//!
//! [`StreamingLzssDecoder`] is an incremental state machine: input can be
//! supplied in pieces of any size (a unit may straddle two calls) and output
//! can be drained through buffers of any size (a back-reference may be
//! expanded across several calls). Only the last 4 KB of output is retained,
//! which is all a back-reference can reach.
//!
//! [`LzssCompressor`] adapts the one-shot encoder to the [`Compressor`]
//! interface. The header carries the total size, so nothing can be emitted
//! before the caller finishes the stream.

use crate::decode::{DecodeWarning, check_match};
use crate::encode::LzssEncoder;
use crate::header::{HEADER_LEN, LzssHeader, MAX_ENCODE_LEN};
use crate::lzss::{match_payload_len, read_match};
use crate::mode::{LzMode, LzssOptions};
use gbalz_core::RingBuffer;
use gbalz_core::error::{GbaLzError, Result};
use gbalz_core::traits::{CompressStatus, Compressor, DecompressStatus, Decompressor, FlushMode};

/// Current phase of the streaming decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderPhase {
    /// Collecting the 4-byte header.
    Header,
    /// Decoding groups.
    Body,
    /// Declared size reached.
    Done,
}

/// A back-reference still being expanded.
#[derive(Debug, Clone, Copy)]
struct PendingCopy {
    distance: usize,
    remaining: usize,
}

/// Incremental LZ10/LZ11 decoder.
#[derive(Debug)]
pub struct StreamingLzssDecoder {
    /// Required mode, or `None` to accept either tag.
    expected: Option<LzMode>,
    vram_safe: bool,
    phase: DecoderPhase,
    header_buf: [u8; HEADER_LEN],
    header_len: usize,
    header: Option<LzssHeader>,
    /// Bytes of output produced so far.
    produced: usize,
    flags: u8,
    mask: u8,
    /// Bytes of a back-reference payload collected so far.
    unit_buf: [u8; 4],
    unit_len: usize,
    copy: Option<PendingCopy>,
    history: RingBuffer,
    warnings: Vec<DecodeWarning>,
    /// Total compressed bytes consumed, for error offsets.
    consumed: u64,
}

impl StreamingLzssDecoder {
    /// Create a decoder that requires `options.mode`.
    pub fn new(options: LzssOptions) -> Self {
        Self::with_expected(Some(options.mode), options.vram_safe)
    }

    /// Create a decoder that accepts either mode.
    pub fn auto(vram_safe: bool) -> Self {
        Self::with_expected(None, vram_safe)
    }

    fn with_expected(expected: Option<LzMode>, vram_safe: bool) -> Self {
        Self {
            expected,
            vram_safe,
            phase: DecoderPhase::Header,
            header_buf: [0; HEADER_LEN],
            header_len: 0,
            header: None,
            produced: 0,
            flags: 0,
            mask: 0,
            unit_buf: [0; 4],
            unit_len: 0,
            copy: None,
            history: RingBuffer::gba_lz(),
            warnings: Vec::new(),
            consumed: 0,
        }
    }

    /// Get the current phase.
    pub fn phase(&self) -> DecoderPhase {
        self.phase
    }

    /// Get the parsed header, once available.
    pub fn header(&self) -> Option<LzssHeader> {
        self.header
    }

    /// Get the number of bytes produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Get the warnings raised so far.
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    fn parse_header(&mut self) -> Result<LzssHeader> {
        match self.expected {
            Some(mode) => LzssHeader::parse_expecting(&self.header_buf, mode),
            None => LzssHeader::parse(&self.header_buf),
        }
    }

    /// Hand one byte already in history to the caller.
    #[inline]
    fn emit(&mut self, byte: u8, output: &mut [u8], out_pos: &mut usize) {
        output[*out_pos] = byte;
        *out_pos += 1;
        self.produced += 1;
    }

    fn decode_body(
        &mut self,
        header: LzssHeader,
        input: &[u8],
        in_pos: &mut usize,
        output: &mut [u8],
        out_pos: &mut usize,
    ) -> Result<Option<DecompressStatus>> {
        loop {
            if let Some(mut copy) = self.copy.take() {
                while copy.remaining > 0 {
                    if *out_pos == output.len() {
                        self.copy = Some(copy);
                        return Ok(Some(DecompressStatus::NeedsOutput));
                    }
                    let byte = self.history.repeat_at_distance(copy.distance)?;
                    self.emit(byte, output, out_pos);
                    copy.remaining -= 1;
                }
            }

            if self.produced == header.size() {
                return Ok(None);
            }
            if *out_pos == output.len() {
                return Ok(Some(DecompressStatus::NeedsOutput));
            }

            if self.mask == 0 {
                let Some(&flags) = input.get(*in_pos) else {
                    return Ok(Some(DecompressStatus::NeedsInput));
                };
                *in_pos += 1;
                self.consumed += 1;
                self.flags = flags;
                self.mask = 0x80;
            }

            if self.flags & self.mask == 0 {
                let Some(&byte) = input.get(*in_pos) else {
                    return Ok(Some(DecompressStatus::NeedsInput));
                };
                *in_pos += 1;
                self.consumed += 1;
                self.mask >>= 1;
                self.history.write_byte(byte);
                self.emit(byte, output, out_pos);
                continue;
            }

            // Collect the payload; the first byte decides its size.
            loop {
                let needed = if self.unit_len == 0 {
                    1
                } else {
                    match_payload_len(header.mode(), self.unit_buf[0])
                };
                if self.unit_len == needed {
                    break;
                }
                let Some(&byte) = input.get(*in_pos) else {
                    return Ok(Some(DecompressStatus::NeedsInput));
                };
                *in_pos += 1;
                self.consumed += 1;
                self.unit_buf[self.unit_len] = byte;
                self.unit_len += 1;
            }

            let payload = &self.unit_buf[..self.unit_len];
            let (length, distance) = read_match(header.mode(), payload);
            self.unit_len = 0;
            self.mask >>= 1;

            let length = check_match(
                length,
                distance,
                self.produced,
                header.size(),
                self.vram_safe,
                &mut self.warnings,
            )?;
            self.copy = Some(PendingCopy {
                distance,
                remaining: length,
            });
        }
    }

    /// Require that the stream has been fully decoded.
    pub fn finish(&self) -> Result<()> {
        if self.phase == DecoderPhase::Done {
            Ok(())
        } else {
            Err(GbaLzError::unexpected_eof(self.consumed))
        }
    }
}

impl Decompressor for StreamingLzssDecoder {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)> {
        let mut in_pos = 0;
        let mut out_pos = 0;

        loop {
            match self.phase {
                DecoderPhase::Header => {
                    let take = (HEADER_LEN - self.header_len).min(input.len() - in_pos);
                    self.header_buf[self.header_len..self.header_len + take]
                        .copy_from_slice(&input[in_pos..in_pos + take]);
                    self.header_len += take;
                    in_pos += take;
                    self.consumed += take as u64;

                    if self.header_len < HEADER_LEN {
                        return Ok((in_pos, out_pos, DecompressStatus::NeedsInput));
                    }

                    self.header = Some(self.parse_header()?);
                    self.phase = DecoderPhase::Body;
                }
                DecoderPhase::Body => {
                    let Some(header) = self.header else {
                        return Err(GbaLzError::invalid_header("header not parsed"));
                    };
                    match self.decode_body(header, input, &mut in_pos, output, &mut out_pos)? {
                        Some(status) => return Ok((in_pos, out_pos, status)),
                        None => self.phase = DecoderPhase::Done,
                    }
                }
                DecoderPhase::Done => {
                    return Ok((in_pos, out_pos, DecompressStatus::Done));
                }
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::with_expected(self.expected, self.vram_safe);
    }

    fn is_finished(&self) -> bool {
        self.phase == DecoderPhase::Done
    }
}

/// [`Compressor`] front end for [`LzssEncoder`].
#[derive(Debug)]
pub struct LzssCompressor {
    encoder: LzssEncoder,
    /// Input gathered until the stream is finished.
    input: Vec<u8>,
    /// Encoded stream, once finished.
    encoded: Option<Vec<u8>>,
    /// Bytes of `encoded` already handed out.
    drained: usize,
}

impl LzssCompressor {
    /// Create a new compressor.
    pub fn new(options: LzssOptions) -> Self {
        Self {
            encoder: LzssEncoder::new(options),
            input: Vec::new(),
            encoded: None,
            drained: 0,
        }
    }

    /// Get the number of input bytes buffered so far.
    pub fn buffered(&self) -> usize {
        self.input.len()
    }
}

impl Compressor for LzssCompressor {
    fn compress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<(usize, usize, CompressStatus)> {
        let mut consumed = 0;

        if self.encoded.is_none() {
            let total = self.input.len() + input.len();
            if total > MAX_ENCODE_LEN {
                return Err(GbaLzError::input_too_large(total, MAX_ENCODE_LEN));
            }
            self.input.extend_from_slice(input);
            consumed = input.len();

            if flush != FlushMode::Finish {
                return Ok((consumed, 0, CompressStatus::NeedsInput));
            }

            self.encoded = Some(self.encoder.encode(&self.input)?);
            self.input = Vec::new();
        }

        let Some(encoded) = self.encoded.as_ref() else {
            return Ok((consumed, 0, CompressStatus::NeedsInput));
        };

        let n = (encoded.len() - self.drained).min(output.len());
        output[..n].copy_from_slice(&encoded[self.drained..self.drained + n]);
        self.drained += n;

        let status = if self.drained == encoded.len() {
            CompressStatus::Done
        } else {
            CompressStatus::NeedsOutput
        };
        Ok((consumed, n, status))
    }

    fn reset(&mut self) {
        self.input.clear();
        self.encoded = None;
        self.drained = 0;
    }

    fn is_finished(&self) -> bool {
        self.encoded
            .as_ref()
            .is_some_and(|encoded| self.drained == encoded.len())
    }
}

/// Decode a stream through the streaming decoder in one call.
pub fn decode_streaming(data: &[u8], options: LzssOptions) -> Result<Vec<u8>> {
    let mut decoder = StreamingLzssDecoder::new(options);
    decoder.decompress_all(data)
}
