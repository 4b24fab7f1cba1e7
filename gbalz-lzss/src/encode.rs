//! LZ10/LZ11 compression.
//!
//! Parsing is greedy with one step of lookahead: before a match is taken the
//! encoder checks whether emitting a literal and starting at the next byte
//! would cover more data over the following two units.

use crate::header::{HEADER_LEN, LzssHeader, pad_to_word};
use crate::lzss::{LzssToken, write_match};
use crate::matcher::{Match, MatchFinder};
use crate::mode::{LzMode, LzssOptions, MIN_MATCH_LEN};
use gbalz_core::error::{GbaLzError, Result};

/// LZ10/LZ11 encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzssEncoder {
    options: LzssOptions,
}

impl LzssEncoder {
    /// Create a new encoder.
    pub fn new(options: LzssOptions) -> Self {
        Self { options }
    }

    /// Create an LZ10 encoder.
    pub fn lz10(vram_safe: bool) -> Self {
        Self::new(LzssOptions::new(LzMode::Lz10).vram_safe(vram_safe))
    }

    /// Create an LZ11 encoder.
    pub fn lz11(vram_safe: bool) -> Self {
        Self::new(LzssOptions::new(LzMode::Lz11).vram_safe(vram_safe))
    }

    /// Get the encoder settings.
    pub fn options(&self) -> LzssOptions {
        self.options
    }

    /// Split `data` into literals and back-references.
    pub fn tokenize(&self, data: &[u8]) -> Vec<LzssToken> {
        let finder = MatchFinder::new(data, self.options.vram_safe);
        let max_len = self.options.mode.max_match();
        let mut tokens = Vec::with_capacity(data.len() / 2);

        let mut pos = 0;
        while pos < data.len() {
            let remaining = data.len() - pos;

            // The first byte has nothing to refer back to.
            let mut best = if pos == 0 {
                None
            } else {
                finder.find(pos, remaining.min(max_len))
            };

            if let Some(m) = best.filter(|m| m.length >= MIN_MATCH_LEN && m.length < remaining) {
                let skip = usable_len(finder.find(pos + 1, (remaining - 1).min(max_len)));
                let next = usable_len(
                    finder.find(pos + m.length, (remaining - m.length).min(max_len)),
                );

                if m.length + next <= skip + 1 {
                    best = None;
                }
            }

            match best {
                Some(Match { length, distance }) if length >= MIN_MATCH_LEN => {
                    tokens.push(LzssToken::Match {
                        length: length as u32,
                        distance: distance as u16,
                    });
                    pos += length;
                }
                _ => {
                    tokens.push(LzssToken::Literal(data[pos]));
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Compress `data` into a complete, word-padded stream.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let header = LzssHeader::new(self.options.mode, data.len())?;
        let tokens = self.tokenize(data);
        write_stream(header, &tokens)
    }
}

/// Length the lookahead credits a candidate with: short matches count as a
/// single literal.
fn usable_len(found: Option<Match>) -> usize {
    match found {
        Some(m) if m.length >= MIN_MATCH_LEN => m.length,
        _ => 1,
    }
}

/// Packs units into flag-byte groups.
struct GroupWriter {
    out: Vec<u8>,
    /// Index of the current group's flag byte.
    flag_pos: usize,
    /// Flag bit for the next unit; 0 when a new group is due.
    mask: u8,
}

impl GroupWriter {
    fn new(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            flag_pos: 0,
            mask: 0,
        }
    }

    fn push(&mut self, mode: LzMode, token: &LzssToken) {
        if self.mask == 0 {
            self.flag_pos = self.out.len();
            self.out.push(0);
            self.mask = 0x80;
        }

        match *token {
            LzssToken::Literal(byte) => self.out.push(byte),
            LzssToken::Match { length, distance } => {
                self.out[self.flag_pos] |= self.mask;
                write_match(&mut self.out, mode, length as usize, distance as usize);
            }
        }

        self.mask >>= 1;
    }
}

/// Reject a back-reference the mode cannot store.
fn check_token(mode: LzMode, token: &LzssToken) -> Result<()> {
    let LzssToken::Match { length, distance } = *token else {
        return Ok(());
    };

    if !(MIN_MATCH_LEN..=mode.max_match()).contains(&(length as usize)) {
        return Err(GbaLzError::invalid_token(format!(
            "{mode} match length {length} outside {MIN_MATCH_LEN}..={}",
            mode.max_match()
        )));
    }
    if !(1..=mode.max_displacement()).contains(&(distance as usize)) {
        return Err(GbaLzError::invalid_token(format!(
            "displacement {distance} outside 1..={}",
            mode.max_displacement()
        )));
    }

    Ok(())
}

/// Serialize a header and token sequence into a padded stream.
///
/// Every back-reference must fit the header's mode and the tokens must
/// expand to exactly the declared size.
pub fn write_stream(header: LzssHeader, tokens: &[LzssToken]) -> Result<Vec<u8>> {
    let mode = header.mode();
    let mut covered = 0;
    let mut body = 0;
    for token in tokens {
        check_token(mode, token)?;
        covered += token.output_len();
        body += token.encoded_len(mode);
    }

    if covered != header.size() {
        return Err(GbaLzError::invalid_token(format!(
            "tokens expand to {covered} bytes, header declares {}",
            header.size()
        )));
    }

    let mut writer = GroupWriter::new(HEADER_LEN + body + tokens.len().div_ceil(8) + 3);
    header.write(&mut writer.out);
    for token in tokens {
        writer.push(mode, token);
    }

    let mut out = writer.out;
    pad_to_word(&mut out);
    Ok(out)
}

/// Compress data with the given mode.
pub fn encode(data: &[u8], mode: LzMode, vram_safe: bool) -> Result<Vec<u8>> {
    LzssEncoder::new(LzssOptions::new(mode).vram_safe(vram_safe)).encode(data)
}

/// Compress data as LZ10.
pub fn encode_lz10(data: &[u8], vram_safe: bool) -> Result<Vec<u8>> {
    LzssEncoder::lz10(vram_safe).encode(data)
}

/// Compress data as LZ11.
pub fn encode_lz11(data: &[u8], vram_safe: bool) -> Result<Vec<u8>> {
    LzssEncoder::lz11(vram_safe).encode(data)
}
