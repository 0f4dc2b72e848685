//! Literal byte-pattern matching with a Rabin-Karp rolling hash.
//!
//! The scanner never trusts the hash on its own: every hash hit is confirmed
//! with a slice comparison before an offset is reported. Hash arithmetic is
//! `u32` with wrapping semantics, so collisions cost a comparison and nothing
//! else.

use crate::replace::ReplaceError;
use std::fmt;

/// A validated, non-empty search pattern.
///
/// Construction is the only place an empty needle is rejected; every matching
/// entry point takes a `&Pattern`, so the scan loop can always make progress.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<u8>,
    hash: u32,
    /// Weight of the byte leaving the window: 2^(len-1), wrapping.
    lead_weight: u32,
}

impl Pattern {
    /// Create a pattern from raw bytes. Empty input is an invalid argument.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ReplaceError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ReplaceError::InvalidArgument(
                "search pattern must not be empty".to_string(),
            ));
        }

        let hash = RollingHash::of(&bytes).value();
        let lead_weight = (1..bytes.len()).fold(1u32, |d, _| d.wrapping_shl(1));

        Ok(Self {
            bytes,
            hash,
            lead_weight,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Hash of a fixed-size window that slides in O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingHash(u32);

impl RollingHash {
    /// Hash a whole window from scratch.
    pub fn of(window: &[u8]) -> Self {
        Self(
            window
                .iter()
                .fold(0u32, |h, &b| h.wrapping_shl(1).wrapping_add(u32::from(b))),
        )
    }

    /// Slide the window one byte: drop `leaving`, append `entering`.
    ///
    /// `lead_weight` must be 2^(window_len-1) computed with the same wrapping
    /// arithmetic as the hash.
    pub fn roll(self, leaving: u8, entering: u8, lead_weight: u32) -> Self {
        let without = self
            .0
            .wrapping_sub(u32::from(leaving).wrapping_mul(lead_weight));
        Self(without.wrapping_shl(1).wrapping_add(u32::from(entering)))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Find the leftmost occurrence of `pattern` in `haystack`.
///
/// Returns `None` when the pattern is longer than the haystack or does not
/// occur at all.
pub fn find(haystack: &[u8], pattern: &Pattern) -> Option<usize> {
    let needle = pattern.as_bytes();
    let m = needle.len();
    if m > haystack.len() {
        return None;
    }

    let last = haystack.len() - m;
    let mut window = RollingHash::of(&haystack[..m]);
    let mut j = 0;
    loop {
        if window.value() == pattern.hash && &haystack[j..j + m] == needle {
            return Some(j);
        }
        if j == last {
            return None;
        }
        window = window.roll(haystack[j], haystack[j + m], pattern.lead_weight);
        j += 1;
    }
}

/// Ordered, non-overlapping start offsets of every match in a buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOffsets(Vec<usize>);

impl MatchOffsets {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl<'a> IntoIterator for &'a MatchOffsets {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collect every non-overlapping occurrence, scanning left to right.
///
/// After a match at `i` the scan resumes at `i + pattern.len()`, so
/// overlapping candidates are skipped rather than reported.
pub fn find_all(haystack: &[u8], pattern: &Pattern) -> MatchOffsets {
    let mut offsets = Vec::new();
    let mut start = 0;

    while let Some(index) = find(&haystack[start..], pattern) {
        let offset = start + index;
        offsets.push(offset);
        start = offset + pattern.len();
    }

    MatchOffsets(offsets)
}
