//! LZ10/LZ11 decompression.
//!
//! The header's declared size is authoritative: decoding stops as soon as
//! that many bytes exist, so the zero padding after the last group is never
//! interpreted.

use crate::header::{HEADER_LEN, LzssHeader};
use crate::lzss::{LzssToken, match_payload_len, read_match};
use crate::mode::{LzMode, LzssOptions};
use gbalz_core::error::{GbaLzError, Result};
use std::fmt;

/// A recoverable problem found while decoding.
///
/// Each kind is reported at most once per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeWarning {
    /// A back-reference ran past the declared size and was truncated.
    LengthExceedsDeclared,
    /// VRAM-safe decoding was requested and the stream uses displacement 1.
    NotVramSafe,
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthExceedsDeclared => f.write_str(
                "compressed block exceeds output length specified by header; output truncated",
            ),
            Self::NotVramSafe => f.write_str("stream is not VRAM-safe"),
        }
    }
}

/// Record `warning` unless it was already seen.
pub(crate) fn record_warning(warnings: &mut Vec<DecodeWarning>, warning: DecodeWarning) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

/// Validate a back-reference and return the number of bytes to copy.
pub(crate) fn check_match(
    length: usize,
    distance: usize,
    produced: usize,
    declared: usize,
    vram_safe: bool,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<usize> {
    let mut length = length;
    if length > declared - produced {
        record_warning(warnings, DecodeWarning::LengthExceedsDeclared);
        length = declared - produced;
    }

    if distance > produced {
        return Err(GbaLzError::invalid_distance(distance, produced));
    }

    if vram_safe && distance == 1 {
        record_warning(warnings, DecodeWarning::NotVramSafe);
    }

    Ok(length)
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutput {
    /// Decompressed bytes; always exactly the declared size.
    pub data: Vec<u8>,
    /// Recoverable problems, in the order first seen.
    pub warnings: Vec<DecodeWarning>,
}

impl DecodeOutput {
    /// Check whether a warning was raised.
    pub fn has_warning(&self, warning: DecodeWarning) -> bool {
        self.warnings.contains(&warning)
    }

    /// Discard warnings and keep the data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Reads units from a complete in-memory stream.
struct UnitReader<'a> {
    data: &'a [u8],
    pos: usize,
    mode: LzMode,
    flags: u8,
    mask: u8,
}

impl<'a> UnitReader<'a> {
    fn new(data: &'a [u8], mode: LzMode) -> Self {
        Self {
            data,
            pos: HEADER_LEN,
            mode,
            flags: 0,
            mask: 0,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self
            .data
            .get(self.pos..self.pos + n)
            .ok_or_else(|| GbaLzError::unexpected_eof(self.data.len() as u64))?;
        self.pos += n;
        Ok(bytes)
    }

    fn next_token(&mut self) -> Result<LzssToken> {
        if self.mask == 0 {
            self.flags = self.take(1)?[0];
            self.mask = 0x80;
        }

        let is_match = self.flags & self.mask != 0;
        self.mask >>= 1;

        if !is_match {
            return Ok(LzssToken::Literal(self.take(1)?[0]));
        }

        let first = *self
            .data
            .get(self.pos)
            .ok_or_else(|| GbaLzError::unexpected_eof(self.data.len() as u64))?;
        let payload = self.take(match_payload_len(self.mode, first))?;
        let (length, distance) = read_match(self.mode, payload);

        Ok(LzssToken::Match {
            length: length as u32,
            distance: distance as u16,
        })
    }
}

/// LZ10/LZ11 decoder for complete in-memory streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzssDecoder {
    options: LzssOptions,
}

impl LzssDecoder {
    /// Create a new decoder expecting `options.mode`.
    pub fn new(options: LzssOptions) -> Self {
        Self { options }
    }

    /// Create an LZ10 decoder.
    pub fn lz10(vram_safe: bool) -> Self {
        Self::new(LzssOptions::new(LzMode::Lz10).vram_safe(vram_safe))
    }

    /// Create an LZ11 decoder.
    pub fn lz11(vram_safe: bool) -> Self {
        Self::new(LzssOptions::new(LzMode::Lz11).vram_safe(vram_safe))
    }

    /// Get the decoder settings.
    pub fn options(&self) -> LzssOptions {
        self.options
    }

    /// Decode a complete stream.
    pub fn decode(&self, data: &[u8]) -> Result<DecodeOutput> {
        let header = LzssHeader::parse_expecting(data, self.options.mode)?;
        decode_body(data, header, self.options.vram_safe)
    }
}

fn decode_body(data: &[u8], header: LzssHeader, vram_safe: bool) -> Result<DecodeOutput> {
    let declared = header.size();
    let mut out = Vec::with_capacity(declared);
    let mut warnings = Vec::new();
    let mut reader = UnitReader::new(data, header.mode());

    while out.len() < declared {
        match reader.next_token()? {
            LzssToken::Literal(byte) => out.push(byte),
            LzssToken::Match { length, distance } => {
                let distance = distance as usize;
                let length = check_match(
                    length as usize,
                    distance,
                    out.len(),
                    declared,
                    vram_safe,
                    &mut warnings,
                )?;

                // Byte by byte: the source may overlap what is being written.
                for _ in 0..length {
                    out.push(out[out.len() - distance]);
                }
            }
        }
    }

    Ok(DecodeOutput {
        data: out,
        warnings,
    })
}

/// Decode a stream of the given mode.
pub fn decode(data: &[u8], mode: LzMode, vram_safe: bool) -> Result<DecodeOutput> {
    LzssDecoder::new(LzssOptions::new(mode).vram_safe(vram_safe)).decode(data)
}

/// Decode a stream of either mode, chosen by its header tag.
pub fn decode_auto(data: &[u8], vram_safe: bool) -> Result<DecodeOutput> {
    let header = LzssHeader::parse(data)?;
    decode_body(data, header, vram_safe)
}

/// Decode an LZ10 stream.
pub fn decode_lz10(data: &[u8], vram_safe: bool) -> Result<Vec<u8>> {
    LzssDecoder::lz10(vram_safe).decode(data).map(DecodeOutput::into_data)
}

/// Decode an LZ11 stream.
pub fn decode_lz11(data: &[u8], vram_safe: bool) -> Result<Vec<u8>> {
    LzssDecoder::lz11(vram_safe).decode(data).map(DecodeOutput::into_data)
}

/// List the units of a stream as stored, without expanding them.
///
/// Reading stops once the units cover the declared size; lengths are not
/// truncated and distances are not validated.
pub fn read_tokens(data: &[u8]) -> Result<(LzssHeader, Vec<LzssToken>)> {
    let header = LzssHeader::parse(data)?;
    let mut reader = UnitReader::new(data, header.mode());
    let mut tokens = Vec::new();
    let mut covered = 0;

    while covered < header.size() {
        let token = reader.next_token()?;
        covered += token.output_len();
        tokens.push(token);
    }

    Ok((header, tokens))
}
