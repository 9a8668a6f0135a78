//! Committed document storage backed by the ropey crate.

use ropey::Rope;
use std::ops::Range;

/// Committed text of a buffer, addressed by physical character index.
///
/// Physical indices differ from logical offsets while a pending edit run is
/// active; see [`PendingEdit`](super::PendingEdit) for the translation.
#[derive(Clone, Debug, Default)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Number of committed characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Character at a physical index.
    #[must_use]
    pub fn char(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    /// Append the characters of a physical range to `out`.
    ///
    /// Out-of-range bounds are clamped to the document length.
    pub fn push_range(&self, range: Range<usize>, out: &mut String) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        for chunk in self.rope.slice(start..end).chunks() {
            out.push_str(chunk);
        }
    }

    /// Collect the characters of a physical range.
    pub fn chars_in(&self, range: Range<usize>) -> impl Iterator<Item = char> + '_ {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.rope.slice(start..end).chars()
    }

    /// Insert text at a physical index. Indices past the end are ignored.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if char_idx <= self.len_chars() {
            self.rope.insert(char_idx, text);
        }
    }

    /// Remove a physical range of characters.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Clear all content.
    pub fn clear(&mut self) {
        self.rope = Rope::new();
    }
}
