//! @ai:module:intent Zero-copy byte slices and the search/trim algebra over them
//! @ai:module:layer domain
//! @ai:module:public_api Slice, Whitespace
//! @ai:module:stateless true
//!
//! A [`Slice`] is a view of `len` bytes starting at `offset` inside a borrowed
//! buffer. Every operation returns another view over the same buffer; nothing
//! here allocates or copies until [`Slice::to_string_lossy`] is called.
//!
//! Searches that can fail return `Option`. A `Some` holding an empty slice
//! (delimiter at position 0) is a successful match and is distinct from `None`.
//!
//! Out-of-range arguments are programmer errors and panic.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// @ai:intent Which bytes count as whitespace when trimming slice ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Whitespace {
    /// Only the ASCII space character.
    #[default]
    Space,
    /// Space and horizontal tab.
    Blank,
}

impl Whitespace {
    /// @ai:intent Check whether a byte is trimmed under this policy
    /// @ai:effects pure
    #[inline]
    pub fn contains(self, byte: u8) -> bool {
        match self {
            Whitespace::Space => byte == b' ',
            Whitespace::Blank => byte == b' ' || byte == b'\t',
        }
    }
}

/// @ai:intent Immutable, non-owning view of a byte range inside a buffer
/// @ai:invariant offset + len <= buf.len()
#[derive(Clone, Copy)]
pub struct Slice<'a> {
    buf: &'a [u8],
    offset: usize,
    len: usize,
}

impl<'a> Slice<'a> {
    /// @ai:intent View an entire buffer
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            len: buf.len(),
        }
    }

    /// @ai:intent View the bytes of a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }

    /// Offset of the first viewed byte within the backing buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Range of the backing buffer this slice covers.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// @ai:intent Borrow the viewed bytes with the buffer's lifetime
    /// @ai:effects pure
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.range()]
    }

    /// @ai:intent Byte at a position relative to the slice start
    /// @ai:pre idx < len
    #[inline]
    pub fn at(&self, idx: usize) -> u8 {
        assert!(
            idx < self.len,
            "slice index {} out of range for slice of length {}",
            idx,
            self.len
        );
        self.buf[self.offset + idx]
    }

    pub fn first(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    /// @ai:intent Sub-slice covering relative positions start..end
    /// @ai:pre start <= end <= len
    /// @ai:effects pure
    pub fn sub(&self, start: usize, end: usize) -> Slice<'a> {
        assert!(
            start <= end && end <= self.len,
            "sub-slice {}..{} out of range for slice of length {}",
            start,
            end,
            self.len
        );
        Slice {
            buf: self.buf,
            offset: self.offset + start,
            len: end - start,
        }
    }

    /// @ai:intent Remove bytes from the front (amount > 0) or the back (amount < 0)
    /// @ai:pre |amount| <= len
    /// @ai:example ("123456", 3) -> "456"
    /// @ai:example ("123456", -3) -> "123"
    /// @ai:effects pure
    pub fn trim_len(&self, amount: isize) -> Slice<'a> {
        if amount >= 0 {
            self.trim_front(amount.unsigned_abs())
        } else {
            self.trim_back(amount.unsigned_abs())
        }
    }

    /// @ai:pre n <= len
    pub fn trim_front(&self, n: usize) -> Slice<'a> {
        assert!(n <= self.len, "cannot trim {} bytes from a slice of length {}", n, self.len);
        self.sub(n, self.len)
    }

    /// @ai:pre n <= len
    pub fn trim_back(&self, n: usize) -> Slice<'a> {
        assert!(n <= self.len, "cannot trim {} bytes from a slice of length {}", n, self.len);
        self.sub(0, self.len - n)
    }

    /// @ai:intent Index of the first occurrence of a byte
    /// @ai:effects pure
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        self.as_bytes().iter().position(|&b| b == byte)
    }

    /// @ai:intent Index of the last occurrence of a byte
    /// @ai:effects pure
    pub fn rfind_byte(&self, byte: u8) -> Option<usize> {
        self.as_bytes().iter().rposition(|&b| b == byte)
    }

    /// @ai:intent Everything strictly before the first occurrence of a delimiter
    /// @ai:example ("abc def", ' ') -> Some("abc")
    /// @ai:example (" abc", ' ') -> Some("")
    /// @ai:example ("abc", ' ') -> None
    /// @ai:effects pure
    pub fn split_before_delim(&self, delim: u8) -> Option<Slice<'a>> {
        self.find_byte(delim).map(|idx| self.sub(0, idx))
    }

    /// @ai:intent Everything strictly after the last occurrence of a delimiter
    /// @ai:example ("abc defg", ' ') -> Some("defg")
    /// @ai:effects pure
    pub fn split_after_delim_right(&self, delim: u8) -> Option<Slice<'a>> {
        self.rfind_byte(delim).map(|idx| self.sub(idx + 1, self.len))
    }

    /// @ai:intent Index where the first full occurrence of a pattern starts
    /// @ai:post an empty pattern matches at 0
    /// @ai:complexity O(len * pattern.len())
    /// @ai:effects pure
    pub fn find_subsequence(&self, pattern: &[u8]) -> Option<usize> {
        let hay = self.as_bytes();
        if pattern.len() > hay.len() {
            return None;
        }

        let mut start = 0;
        let mut matched = 0;
        while matched < pattern.len() {
            if start + pattern.len() > hay.len() {
                return None;
            }
            if hay[start + matched] == pattern[matched] {
                matched += 1;
            } else {
                // restart one byte past the previous candidate
                start += 1;
                matched = 0;
            }
        }
        Some(start)
    }

    /// @ai:intent Index where the last full occurrence of a pattern starts
    /// @ai:post an empty pattern matches at len
    /// @ai:complexity O(len * pattern.len())
    /// @ai:effects pure
    pub fn rfind_subsequence(&self, pattern: &[u8]) -> Option<usize> {
        let hay = self.as_bytes();
        if pattern.len() > hay.len() {
            return None;
        }

        // `end` is one past the last byte of the candidate match
        let mut end = hay.len();
        let mut matched = 0;
        while matched < pattern.len() {
            if end < pattern.len() {
                return None;
            }
            if hay[end - 1 - matched] == pattern[pattern.len() - 1 - matched] {
                matched += 1;
            } else {
                end -= 1;
                matched = 0;
            }
        }
        Some(end - pattern.len())
    }

    /// @ai:intent Everything before the first occurrence of a pattern
    /// @ai:example ("test test // comment", "//") -> Some("test test ")
    /// @ai:effects pure
    pub fn split_before_pattern(&self, pattern: &[u8]) -> Option<Slice<'a>> {
        self.find_subsequence(pattern).map(|idx| self.sub(0, idx))
    }

    /// @ai:intent Everything after the last occurrence of a pattern
    /// @ai:example ("test test // comment", "//") -> Some(" comment")
    /// @ai:effects pure
    pub fn split_after_pattern_right(&self, pattern: &[u8]) -> Option<Slice<'a>> {
        self.rfind_subsequence(pattern)
            .map(|idx| self.sub(idx + pattern.len(), self.len))
    }

    /// @ai:intent Drop leading whitespace
    /// @ai:effects pure
    pub fn trim_whitespace_left(&self, ws: Whitespace) -> Slice<'a> {
        let skip = self
            .as_bytes()
            .iter()
            .take_while(|&&b| ws.contains(b))
            .count();
        self.trim_front(skip)
    }

    /// @ai:intent Drop trailing whitespace
    /// @ai:effects pure
    pub fn trim_whitespace_right(&self, ws: Whitespace) -> Slice<'a> {
        let skip = self
            .as_bytes()
            .iter()
            .rev()
            .take_while(|&&b| ws.contains(b))
            .count();
        self.trim_back(skip)
    }

    pub fn trim_whitespace(&self, ws: Whitespace) -> Slice<'a> {
        self.trim_whitespace_left(ws).trim_whitespace_right(ws)
    }

    /// @ai:intent Check for a byte-wise prefix
    /// @ai:effects pure
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.as_bytes().starts_with(prefix)
    }

    /// @ai:intent Check for a byte-wise suffix
    /// @ai:effects pure
    pub fn ends_with(&self, suffix: &[u8]) -> bool {
        self.as_bytes().ends_with(suffix)
    }

    /// @ai:intent Everything before the first newline
    /// @ai:post None means no newline remains: the slice is the final, unterminated chunk
    /// @ai:effects pure
    pub fn split_line(&self) -> Option<Slice<'a>> {
        self.split_before_delim(b'\n')
    }

    /// @ai:intent Materialize the viewed bytes as text, replacing invalid UTF-8
    /// @ai:effects pure
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl PartialEq for Slice<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Slice<'_> {}

impl PartialEq<[u8]> for Slice<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<str> for Slice<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Slice<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Slice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slice({:?} @ {})", self.to_string_lossy(), self.offset)
    }
}

impl fmt::Display for Slice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
