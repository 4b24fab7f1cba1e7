//! Longest-match search over the 4 KB window.
//!
//! Every position whose 2-byte prefix has been seen before links to the
//! previous position with the same prefix, so the candidates for a cursor
//! are visited nearest first by following that chain until it leaves the
//! window. Positions older than the window are never visited again.

use crate::mode::MAX_DISPLACEMENT;

/// End-of-chain marker.
const NIL: u32 = u32::MAX;

/// Number of distinct 2-byte prefixes.
const HEAD_SIZE: usize = 1 << 16;

/// A back-reference candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Number of matching bytes.
    pub length: usize,
    /// Distance back from the cursor.
    pub distance: usize,
}

/// Match finder over one immutable source buffer.
#[derive(Debug)]
pub struct MatchFinder<'a> {
    /// Data being compressed.
    source: &'a [u8],
    /// Previous position sharing the prefix at each position.
    prev: Vec<u32>,
    /// Maximum displacement.
    max_distance: usize,
    /// Reject displacement 1.
    vram_safe: bool,
}

impl<'a> MatchFinder<'a> {
    /// Index `source` for searching.
    pub fn new(source: &'a [u8], vram_safe: bool) -> Self {
        let mut prev = vec![NIL; source.len()];

        if source.len() >= 2 {
            let mut head = vec![NIL; HEAD_SIZE];
            for (pos, pair) in source.windows(2).enumerate() {
                let key = Self::prefix(pair[0], pair[1]);
                prev[pos] = head[key];
                head[key] = pos as u32;
            }
        }

        Self {
            source,
            prev,
            max_distance: MAX_DISPLACEMENT,
            vram_safe,
        }
    }

    #[inline(always)]
    fn prefix(b0: u8, b1: u8) -> usize {
        ((b0 as usize) << 8) | b1 as usize
    }

    /// Get the indexed data.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Find the longest match for the bytes at `pos`.
    ///
    /// Only candidates in `[pos - 4096, pos)` are considered and the length
    /// is capped at `max_len` and at the end of the source. On equal length
    /// the nearer candidate wins. Matches shorter than two bytes are not
    /// reported.
    pub fn find(&self, pos: usize, max_len: usize) -> Option<Match> {
        let max_len = max_len.min(self.source.len().saturating_sub(pos));
        if pos == 0 || max_len < 2 {
            return None;
        }

        let target = &self.source[pos..pos + max_len];
        let mut best: Option<Match> = None;
        let mut candidate = self.prev[pos];

        while candidate != NIL {
            let cand = candidate as usize;
            let distance = pos - cand;
            if distance > self.max_distance {
                break;
            }
            candidate = self.prev[cand];

            if self.vram_safe && distance == 1 {
                continue;
            }

            let length = common_prefix(&self.source[cand..], target);
            if best.is_none_or(|b| length > b.length) {
                best = Some(Match { length, distance });
                if length == max_len {
                    break;
                }
            }
        }

        best
    }
}

/// Length of the common prefix of `a` and `b`.
#[inline]
fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Straightforward scan of the whole window, nearest candidate first.
///
/// Kept as the executable definition of what [`MatchFinder::find`] returns.
#[cfg(test)]
pub(crate) fn find_linear(
    source: &[u8],
    pos: usize,
    max_len: usize,
    vram_safe: bool,
) -> Option<Match> {
    let max_len = max_len.min(source.len().saturating_sub(pos));
    if pos == 0 || max_len < 2 {
        return None;
    }

    let start = pos.saturating_sub(MAX_DISPLACEMENT);
    let target = &source[pos..pos + max_len];
    let mut best: Option<Match> = None;

    for cand in (start..pos).rev() {
        let distance = pos - cand;
        if vram_safe && distance == 1 {
            continue;
        }
        let length = common_prefix(&source[cand..], target);
        if length >= 2 && best.is_none_or(|b| length > b.length) {
            best = Some(Match { length, distance });
            if length == max_len {
                break;
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg(len: usize, seed: u64, alphabet: u8) -> Vec<u8> {
        let mut s = seed;
        (0..len)
            .map(|_| {
                s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((s >> 33) % alphabet as u64) as u8
            })
            .collect()
    }

    #[test]
    fn test_no_match_at_start() {
        let finder = MatchFinder::new(b"aaaa", false);
        assert_eq!(finder.find(0, 18), None);
    }

    #[test]
    fn test_run_uses_distance_one() {
        let finder = MatchFinder::new(&[0xAA; 20], false);
        assert_eq!(
            finder.find(1, 18),
            Some(Match {
                length: 18,
                distance: 1
            })
        );
    }

    #[test]
    fn test_vram_safe_skips_distance_one() {
        let data = [0xAA; 20];
        let finder = MatchFinder::new(&data, true);
        assert_eq!(finder.find(1, 18), None);
        assert_eq!(
            finder.find(2, 18),
            Some(Match {
                length: 18,
                distance: 2
            })
        );
    }

    #[test]
    fn test_prefers_nearest_on_tie() {
        // "abcX" twice, then "abcY": both earlier copies match 3 bytes.
        let data = b"abcXabcXabcY";
        let finder = MatchFinder::new(data, false);
        assert_eq!(
            finder.find(8, 4),
            Some(Match {
                length: 3,
                distance: 4
            })
        );
    }

    #[test]
    fn test_prefers_longest() {
        let data = b"abcdeXXabcZZabc";
        let finder = MatchFinder::new(data, false);
        // Cursor at the last "abc": nearest candidate gives 3 bytes, only
        // capped by the end of input.
        assert_eq!(
            finder.find(12, 18),
            Some(Match {
                length: 3,
                distance: 5
            })
        );

        let data = b"abcdeXXabcZZabcde";
        let finder = MatchFinder::new(data, false);
        assert_eq!(
            finder.find(12, 18),
            Some(Match {
                length: 5,
                distance: 12
            })
        );
    }

    #[test]
    fn test_window_limit() {
        let mut data = b"wxyz".to_vec();
        data.extend(std::iter::repeat_n(0u8, MAX_DISPLACEMENT));
        data.extend_from_slice(b"wxyz");
        let finder = MatchFinder::new(&data, false);
        let pos = data.len() - 4;
        // Earlier "wxyz" sits 4100 bytes back.
        assert_eq!(finder.find(pos, 18), None);
    }

    #[test]
    fn test_length_capped_by_max_len_and_end() {
        let data = [7u8; 50];
        let finder = MatchFinder::new(&data, false);
        assert_eq!(finder.find(10, 18).map(|m| m.length), Some(18));
        assert_eq!(finder.find(45, 18).map(|m| m.length), Some(5));
        assert_eq!(finder.find(49, 18), None);
    }

    #[test]
    fn test_agrees_with_linear_scan() {
        for (seed, alphabet, vram) in [(1, 2, false), (2, 3, true), (3, 4, false), (4, 2, true)] {
            let data = lcg(6000, seed, alphabet);
            let finder = MatchFinder::new(&data, vram);
            for pos in (0..data.len()).step_by(7) {
                for max_len in [3, 18, 300] {
                    assert_eq!(
                        finder.find(pos, max_len),
                        find_linear(&data, pos, max_len, vram),
                        "seed {seed} pos {pos} max_len {max_len}"
                    );
                }
            }
        }
    }
}
