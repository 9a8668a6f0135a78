//! Sorted offset indices for line breaks and tabs.
//!
//! Both indices hold logical offsets and are patched in place on every
//! mutation: an insertion splices new offsets in and shifts the tail, a removal
//! drops the covered offsets and shifts the tail back. Line and column queries
//! then cost a binary search over the line breaks instead of a document scan.

/// Line containing an offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineInfo {
    /// Zero-based line number.
    pub line: usize,
    /// Offset of the first character of the line.
    pub start: usize,
    /// Offset just past the last character, excluding the line break.
    pub end: usize,
}

impl LineInfo {
    /// Number of characters on the line, excluding the break.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the line has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Strictly increasing list of logical offsets of one character class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    offsets: Vec<usize>,
}

impl OffsetIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All offsets, ascending.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of indexed offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Check if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset at position `idx` in the index.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<usize> {
        self.offsets.get(idx).copied()
    }

    /// Number of indexed offsets strictly below `offset`.
    #[must_use]
    pub fn count_before(&self, offset: usize) -> usize {
        self.offsets.partition_point(|&o| o < offset)
    }

    /// Indexed offsets inside `[start, end)`.
    #[must_use]
    pub fn within(&self, start: usize, end: usize) -> &[usize] {
        let lo = self.count_before(start);
        let hi = self.count_before(end).max(lo);
        &self.offsets[lo..hi]
    }

    /// Account for `len` characters inserted at `at`.
    ///
    /// `added` holds the absolute offsets (inside `[at, at + len)`) of the
    /// inserted characters this index tracks, ascending.
    pub fn insert_run(&mut self, at: usize, len: usize, added: &[usize]) {
        debug_assert!(added.iter().all(|&o| o >= at && o < at + len));
        let split = self.count_before(at);
        for offset in &mut self.offsets[split..] {
            *offset += len;
        }
        self.offsets.splice(split..split, added.iter().copied());
    }

    /// Account for the characters in `[at, at + len)` being removed.
    pub fn remove_run(&mut self, at: usize, len: usize) {
        let lo = self.count_before(at);
        let hi = self.count_before(at + len);
        self.offsets.drain(lo..hi);
        for offset in &mut self.offsets[lo..] {
            *offset -= len;
        }
    }

    /// Remove every offset.
    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}

/// Line/column arithmetic over a line-break index and a document length.
#[derive(Clone, Copy, Debug)]
pub struct Lines<'a> {
    breaks: &'a OffsetIndex,
    len: usize,
}

impl<'a> Lines<'a> {
    #[must_use]
    pub fn new(breaks: &'a OffsetIndex, len: usize) -> Self {
        Self { breaks, len }
    }

    /// Number of lines (always at least one).
    #[must_use]
    pub fn count(&self) -> usize {
        self.breaks.len() + 1
    }

    /// Offset of the first character of `line`, clamping to the last line.
    #[must_use]
    pub fn start_of(&self, line: usize) -> usize {
        let line = line.min(self.breaks.len());
        if line == 0 {
            0
        } else {
            self.breaks.as_slice()[line - 1] + 1
        }
    }

    /// Offset of the break ending `line`, or the document length for the last line.
    #[must_use]
    pub fn end_of(&self, line: usize) -> usize {
        self.breaks.get(line).unwrap_or(self.len)
    }

    /// Line containing `position` (clamped to the document length).
    #[must_use]
    pub fn info(&self, position: usize) -> LineInfo {
        let position = position.min(self.len);
        let line = self.breaks.count_before(position);
        LineInfo {
            line,
            start: self.start_of(line),
            end: self.end_of(line),
        }
    }

    /// `(line, column)` of `position` (clamped to the document length).
    #[must_use]
    pub fn line_column(&self, position: usize) -> (usize, usize) {
        let info = self.info(position);
        (info.line, position.min(self.len) - info.start)
    }

    /// Offset of `(line, column)`, clamping both to the nearest valid position.
    #[must_use]
    pub fn position(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.breaks.len());
        let start = self.start_of(line);
        let end = self.end_of(line);
        start + column.min(end - start)
    }

    /// Last column the cursor may occupy on `line`, or `None` past the last line.
    #[must_use]
    pub fn last_valid_column(&self, line: usize) -> Option<usize> {
        (line < self.count()).then(|| self.end_of(line) - self.start_of(line))
    }
}
