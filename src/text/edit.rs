//! Editable text buffer with cursor, selection and coalesced history.
//!
//! This module provides [`EditBuffer`], the facade every caller goes through.
//! Each mutation updates, in order: the pending edit run, the line and tab
//! indices, the cursor, and (when a run is squashed) the history.
//!
//! # Examples
//!
//! ```
//! use textcore::{EditBuffer, RemoveDirection};
//!
//! let mut buf = EditBuffer::with_text("Hello World");
//! buf.set_cursor(11);
//! buf.remove_at_cursor(RemoveDirection::BackspaceRtl, false); // Removes 'd'
//! buf.squash(); // Commit the run as one history step
//! assert_eq!(buf.text(), "Hello Worl");
//!
//! buf.undo();
//! assert_eq!(buf.text(), "Hello World");
//! ```

use std::fmt;

use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};
use crate::highlight::{
    DEFAULT_OVERLAY_CAPACITY, DecorationOverlay, LexSink, Lexer, TooltipEntry, TooltipRegistry,
};
use crate::host::{BufferHost, DefaultHost};
use crate::text::cursor::{
    Cursor, MoveKind, MoveModifiers, RemoveDirection, Selection, word_end, word_start,
};
use crate::text::document::Document;
use crate::text::history::{DEFAULT_MAX_HISTORY_DEPTH, EditHistory, EditKind, HistoryStep};
use crate::text::index::{LineInfo, Lines, OffsetIndex};
use crate::text::pending::{Location, PendingEdit};

/// Buffer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BufferOptions {
    /// Columns per tab stop for [`EditBuffer::display_column`].
    pub tab_width: u8,
    /// Minimum overlay capacity allocated by [`EditBuffer::enable_overlay`].
    pub overlay_capacity: usize,
    /// Maximum number of committed history steps to retain.
    pub max_history_depth: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            overlay_capacity: DEFAULT_OVERLAY_CAPACITY,
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

/// Inserted text after line-ending normalization.
struct Normalized {
    chars: Vec<char>,
    /// Offsets of `\n`, relative to the start of `chars`.
    breaks: Vec<usize>,
    /// Offsets of `\t`, relative to the start of `chars`.
    tabs: Vec<usize>,
}

impl Normalized {
    /// Convert `\r\n` and lone `\r` to `\n` and record breaks and tabs.
    fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut breaks = Vec::new();
        let mut tabs = Vec::new();
        let mut iter = text.chars().peekable();
        while let Some(ch) = iter.next() {
            let ch = match ch {
                '\r' => {
                    if iter.peek() == Some(&'\n') {
                        iter.next();
                    }
                    '\n'
                }
                other => other,
            };
            match ch {
                '\n' => breaks.push(chars.len()),
                '\t' => tabs.push(chars.len()),
                _ => {}
            }
            chars.push(ch);
        }
        Self {
            chars,
            breaks,
            tabs,
        }
    }

    fn shifted(offsets: &[usize], by: usize) -> Vec<usize> {
        offsets.iter().map(|o| o + by).collect()
    }
}

/// Text buffer with a single pending edit run, incremental line/tab indices,
/// cursor and selection, coalesced history, and a style overlay.
///
/// - **Reads**: [`char_at`](Self::char_at), [`text`](Self::text) and
///   [`slice`](Self::slice) see the logical text, including the pending run.
/// - **Edits**: contiguous typing, forward deletes and backspaces extend one
///   run; anything else squashes the run into a [`HistoryStep`].
/// - **Navigation**: [`move_cursor`](Self::move_cursor) with Left/Right/Up/Down/Home/End,
///   word steps and shift-selection.
/// - **Decoration**: an optional per-character tag overlay and a tooltip
///   registry, populated by a [`Lexer`] through [`relex`](Self::relex).
pub struct EditBuffer {
    document: Document,
    pending: PendingEdit,
    line_breaks: OffsetIndex,
    tabs: OffsetIndex,
    cursor: Cursor,
    selection: Selection,
    /// Column Up/Down aim for across consecutive vertical moves.
    preferred_column: Option<usize>,
    history: EditHistory,
    overlay: DecorationOverlay,
    tooltips: TooltipRegistry,
    host: Box<dyn BufferHost>,
    options: BufferOptions,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::with_options(BufferOptions::default())
    }
}

impl fmt::Debug for EditBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditBuffer")
            .field("len", &self.len())
            .field("pending", &self.pending)
            .field("line_breaks", &self.line_breaks)
            .field("tabs", &self.tabs)
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for EditBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl EditBuffer {
    /// Create a new empty edit buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with custom options.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            document: Document::new(),
            pending: PendingEdit::default(),
            line_breaks: OffsetIndex::new(),
            tabs: OffsetIndex::new(),
            cursor: Cursor::default(),
            selection: Selection::NONE,
            preferred_column: None,
            history: EditHistory::with_max_depth(options.max_history_depth),
            overlay: DecorationOverlay::new(options.overlay_capacity),
            tooltips: TooltipRegistry::new(),
            host: Box::new(DefaultHost::new()),
            options,
        }
    }

    /// Create an edit buffer with initial text (no history).
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Set the host capabilities (builder pattern).
    #[must_use]
    pub fn with_host(mut self, host: impl BufferHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    #[must_use]
    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Logical length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.logical_len(self.document.len_chars())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Character at a logical offset.
    pub fn char_at(&self, offset: usize) -> Result<char> {
        let len = self.len();
        if offset >= len {
            return Err(Error::OutOfRange { offset, len });
        }
        self.get_char(offset)
            .ok_or(Error::OutOfRange { offset, len })
    }

    /// Full logical text (committed plus pending).
    #[must_use]
    pub fn text(&self) -> String {
        let len = self.len();
        let mut out = String::with_capacity(len);
        self.push_logical(0, len, &mut out);
        out
    }

    /// Logical text in `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        let len = self.len();
        if start > end || end > len {
            return Err(Error::InvalidRange { start, end, len });
        }
        let mut out = String::with_capacity(end - start);
        self.push_logical(start, end, &mut out);
        Ok(out)
    }

    fn get_char(&self, offset: usize) -> Option<char> {
        match self.pending.resolve(offset) {
            Location::Committed(idx) => {
                debug_assert_eq!(self.pending.to_logical(idx), Ok(offset));
                self.document.char(idx)
            }
            Location::Pending(idx) => self.pending.inserted.get(idx).copied(),
        }
    }

    fn push_logical(&self, start: usize, end: usize, out: &mut String) {
        let anchor = self.pending.anchor;
        match self.pending.kind {
            EditKind::None => self.document.push_range(start..end, out),
            EditKind::InsertLtr => {
                let run = self.pending.inserted.len();
                if start < anchor {
                    self.document.push_range(start..end.min(anchor), out);
                }
                let (lo, hi) = (start.max(anchor), end.min(anchor + run));
                if lo < hi {
                    out.extend(&self.pending.inserted[lo - anchor..hi - anchor]);
                }
                let lo = start.max(anchor + run);
                if lo < end {
                    self.document.push_range(lo - run..end - run, out);
                }
            }
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => {
                let run = self.pending.removed.len();
                if start < anchor {
                    self.document.push_range(start..end.min(anchor), out);
                }
                let lo = start.max(anchor);
                if lo < end {
                    self.document.push_range(lo + run..end + run, out);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Lines and tabs
    // ------------------------------------------------------------------

    fn lines(&self) -> Lines<'_> {
        Lines::new(&self.line_breaks, self.len())
    }

    /// Number of lines (line breaks + 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }

    /// Offsets of all line breaks, ascending.
    #[must_use]
    pub fn line_breaks(&self) -> &[usize] {
        self.line_breaks.as_slice()
    }

    /// Offsets of all tabs, ascending.
    #[must_use]
    pub fn tabs(&self) -> &[usize] {
        self.tabs.as_slice()
    }

    /// Line containing `position` (clamped to the document length).
    #[must_use]
    pub fn line_info(&self, position: usize) -> LineInfo {
        self.lines().info(position)
    }

    /// `(line, column)` of `position` (clamped to the document length).
    #[must_use]
    pub fn line_column(&self, position: usize) -> (usize, usize) {
        self.lines().line_column(position)
    }

    /// Offset of `(line, column)`, clamped to the nearest valid position.
    #[must_use]
    pub fn position_from_line_column(&self, line: usize, column: usize) -> usize {
        self.lines().position(line, column)
    }

    /// Last column the cursor may occupy on `line`; `None` past the last line.
    #[must_use]
    pub fn last_valid_column(&self, line: usize) -> Option<usize> {
        self.lines().last_valid_column(line)
    }

    /// Text of `line` without its break.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<String> {
        let lines = self.lines();
        if line >= lines.count() {
            return None;
        }
        self.slice(lines.start_of(line), lines.end_of(line)).ok()
    }

    /// Visual column of `position`, expanding tabs to the configured tab
    /// width and counting wide characters as two cells.
    #[must_use]
    pub fn display_column(&self, position: usize) -> usize {
        let position = position.min(self.len());
        let info = self.line_info(position);
        let tab_width = usize::from(self.options.tab_width.max(1));
        let mut column = 0;
        let mut at = info.start;
        for &tab in self.tabs.within(info.start, position) {
            column += self.width_between(at, tab);
            column = (column / tab_width + 1) * tab_width;
            at = tab + 1;
        }
        column + self.width_between(at, position)
    }

    fn width_between(&self, start: usize, end: usize) -> usize {
        (start..end)
            .filter_map(|offset| self.get_char(offset))
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert text at a logical offset. The cursor ends after the inserted text.
    ///
    /// Line endings are normalized to `\n`. Fails with
    /// [`Error::OutOfRange`] without touching any state if `offset > len`.
    pub fn insert_at(&mut self, text: &str, offset: usize) -> Result<()> {
        let len = self.len();
        if offset > len {
            return Err(Error::OutOfRange { offset, len });
        }
        self.insert_normalized(offset, &Normalized::new(text));
        Ok(())
    }

    /// Insert text at the cursor, replacing the selection if there is one.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let normalized = Normalized::new(text);
        if self.selection.is_active() {
            let (low, high) = (self.selection.low(), self.selection.high());
            self.remove_range(low, high - low, RemoveDirection::DeleteLtr);
        }
        self.insert_normalized(self.cursor.position, &normalized);
    }

    fn insert_normalized(&mut self, offset: usize, normalized: &Normalized) {
        let count = normalized.chars.len();
        if count == 0 {
            return;
        }

        let extends = self.pending.kind == EditKind::InsertLtr
            && !self.pending.undone
            && offset == self.pending.anchor + self.pending.inserted.len();
        if !extends {
            self.squash();
            self.begin_run(EditKind::InsertLtr, offset);
        }
        self.pending.inserted.extend_from_slice(&normalized.chars);

        self.line_breaks.insert_run(
            offset,
            count,
            &Normalized::shifted(&normalized.breaks, offset),
        );
        self.tabs
            .insert_run(offset, count, &Normalized::shifted(&normalized.tabs, offset));

        self.selection = Selection::NONE;
        self.preferred_column = None;
        self.place_cursor(offset + count);
    }

    /// Remove `count` characters starting at `offset`.
    ///
    /// No-op when `offset` is at or past the end or `count` is zero; `count`
    /// is clamped to the end of the document. Returns the number removed.
    pub fn remove_range(&mut self, offset: usize, count: usize, direction: RemoveDirection) -> usize {
        let len = self.len();
        if count == 0 || offset >= len {
            return 0;
        }
        let count = count.min(len - offset);

        let kind = match direction {
            RemoveDirection::DeleteLtr => EditKind::RemoveDeleteLtr,
            RemoveDirection::BackspaceRtl => EditKind::RemoveBackspaceRtl,
        };
        let extends = self.pending.kind == kind
            && !self.pending.undone
            && match direction {
                RemoveDirection::DeleteLtr => offset == self.pending.anchor,
                RemoveDirection::BackspaceRtl => offset + count == self.pending.anchor,
            };
        let mut removed = String::with_capacity(count);
        self.push_logical(offset, offset + count, &mut removed);
        let chars: Vec<char> = removed.chars().collect();

        // Reserve before touching the run so a refused allocation changes nothing.
        let needed = if extends {
            self.pending.removed.len() + count
        } else {
            count.max(self.pending.removed.len())
        };
        if let Err(err) = self.pending.removed.reserve_for(needed) {
            tracing::error!(%err, count, "removal payload could not grow");
            return 0;
        }

        if !extends {
            self.squash();
            self.begin_run(kind, offset);
        }
        let grown = match direction {
            RemoveDirection::DeleteLtr => self.pending.removed.extend_back(&chars),
            RemoveDirection::BackspaceRtl => self.pending.removed.extend_front(&chars),
        };
        if let Err(err) = grown {
            tracing::error!(%err, count, "removal payload could not grow");
            return 0;
        }
        self.pending.anchor = offset;

        self.line_breaks.remove_run(offset, count);
        self.tabs.remove_run(offset, count);

        self.selection = Selection::NONE;
        self.preferred_column = None;
        self.place_cursor(offset);
        count
    }

    /// Remove at the cursor: the selection if any, otherwise one character
    /// (or one word step with `word_mode`) in `direction`.
    pub fn remove_at_cursor(&mut self, direction: RemoveDirection, word_mode: bool) -> usize {
        if self.selection.is_active() {
            let (low, high) = (self.selection.low(), self.selection.high());
            return self.remove_range(low, high - low, direction);
        }

        let position = self.cursor.position;
        match direction {
            RemoveDirection::BackspaceRtl => {
                if position == 0 {
                    return 0;
                }
                let start = if word_mode {
                    self.word_left_of(position)
                } else {
                    position - 1
                };
                self.remove_range(start, position - start, direction)
            }
            RemoveDirection::DeleteLtr => {
                if position >= self.len() {
                    return 0;
                }
                let end = if word_mode {
                    self.word_right_of(position)
                } else {
                    position + 1
                };
                self.remove_range(position, end - position, direction)
            }
        }
    }

    /// Replace the entire text, resetting cursor, selection, history, indices,
    /// tooltips and overlay tags. The text is not recorded in history.
    pub fn set_text(&mut self, text: &str) {
        self.reset();
        let normalized = Normalized::new(text);
        let committed: String = normalized.chars.iter().collect();
        self.document.replace(&committed);
        let count = normalized.chars.len();
        self.line_breaks.insert_run(0, count, &normalized.breaks);
        self.tabs.insert_run(0, count, &normalized.tabs);
        debug!(
            len = count,
            lines = self.line_count(),
            tabs = self.tabs.len(),
            "text replaced"
        );
    }

    /// Reset to an empty buffer. Overlay capacity is kept.
    pub fn clear(&mut self) {
        self.reset();
        debug!("buffer cleared");
    }

    fn reset(&mut self) {
        self.document.clear();
        self.pending.reset();
        self.pending.undone = false;
        self.line_breaks.clear();
        self.tabs.clear();
        self.cursor = Cursor::default();
        self.selection = Selection::NONE;
        self.preferred_column = None;
        self.history.clear();
        self.tooltips.clear();
        self.overlay.clear();
    }

    // ------------------------------------------------------------------
    // Runs and history
    // ------------------------------------------------------------------

    fn begin_run(&mut self, kind: EditKind, anchor: usize) {
        self.pending.kind = kind;
        self.pending.anchor = anchor;
        self.pending.undone = false;
        self.history.discard_redo();
        debug!(?kind, anchor, "edit run started");
    }

    /// Commit the pending run into the document as one history step.
    pub fn squash(&mut self) {
        let kind = self.pending.kind;
        let anchor = self.pending.anchor;
        let text: String = match kind {
            EditKind::None => return,
            EditKind::InsertLtr => {
                let text: String = self.pending.inserted.iter().collect();
                self.document.insert(anchor, &text);
                text
            }
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => {
                let run = self.pending.removed.len();
                self.document.remove(anchor..anchor + run);
                self.pending.removed.as_slice().iter().collect()
            }
        };
        debug!(?kind, anchor, len = self.pending.len(), "edit run squashed");
        self.pending.reset();
        if text.is_empty() {
            return;
        }
        self.history.push(HistoryStep {
            kind,
            offset: anchor,
            text,
        });
    }

    /// Kind of the pending run.
    #[must_use]
    pub fn edit_kind(&self) -> EditKind {
        self.pending.kind
    }

    /// The pending run.
    #[must_use]
    pub fn pending(&self) -> &PendingEdit {
        &self.pending
    }

    /// Committed history steps, oldest first. The pending run is not included.
    #[must_use]
    pub fn history(&self) -> &[HistoryStep] {
        self.history.steps()
    }

    #[must_use]
    pub fn max_history_depth(&self) -> usize {
        self.history.max_depth()
    }

    pub fn set_max_history_depth(&mut self, max_depth: usize) {
        self.options.max_history_depth = max_depth;
        self.history.set_max_depth(max_depth);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pending.kind != EditKind::None || self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.pending.kind == EditKind::None && self.history.can_redo()
    }

    /// Drop all committed and redoable steps. The pending run is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Revert the most recent step, squashing the pending run first.
    pub fn undo(&mut self) -> bool {
        self.squash();
        let Some(step) = self.history.pop_undo() else {
            return false;
        };
        debug!(kind = ?step.kind, offset = step.offset, "undo");
        match step.kind {
            EditKind::InsertLtr => {
                self.remove_committed(step.offset, step.len());
                self.place_cursor(step.offset);
            }
            EditKind::RemoveDeleteLtr => {
                self.insert_committed(step.offset, &step.text);
                self.place_cursor(step.offset);
            }
            EditKind::RemoveBackspaceRtl => {
                self.insert_committed(step.offset, &step.text);
                self.place_cursor(step.offset + step.len());
            }
            EditKind::None => {}
        }
        self.history.push_redo(step);
        self.pending.undone = true;
        true
    }

    /// Reapply the most recently undone step.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        let Some(step) = self.history.pop_redo() else {
            return false;
        };
        debug!(kind = ?step.kind, offset = step.offset, "redo");
        match step.kind {
            EditKind::InsertLtr => {
                self.insert_committed(step.offset, &step.text);
                self.place_cursor(step.offset + step.len());
            }
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => {
                self.remove_committed(step.offset, step.len());
                self.place_cursor(step.offset);
            }
            EditKind::None => {}
        }
        self.history.push_redone(step);
        self.pending.undone = true;
        true
    }

    /// Splice already-normalized text straight into the document.
    /// Only valid while no run is pending.
    fn insert_committed(&mut self, offset: usize, text: &str) {
        debug_assert_eq!(self.pending.kind, EditKind::None);
        let normalized = Normalized::new(text);
        let count = normalized.chars.len();
        self.document.insert(offset, text);
        self.line_breaks.insert_run(
            offset,
            count,
            &Normalized::shifted(&normalized.breaks, offset),
        );
        self.tabs
            .insert_run(offset, count, &Normalized::shifted(&normalized.tabs, offset));
        self.selection = Selection::NONE;
        self.preferred_column = None;
    }

    fn remove_committed(&mut self, offset: usize, count: usize) {
        debug_assert_eq!(self.pending.kind, EditKind::None);
        self.document.remove(offset..offset + count);
        self.line_breaks.remove_run(offset, count);
        self.tabs.remove_run(offset, count);
        self.selection = Selection::NONE;
        self.preferred_column = None;
    }

    // ------------------------------------------------------------------
    // Cursor and selection
    // ------------------------------------------------------------------

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor to an offset (clamped), clearing the selection.
    pub fn set_cursor(&mut self, position: usize) {
        self.selection = Selection::NONE;
        self.preferred_column = None;
        self.place_cursor(position);
    }

    fn place_cursor(&mut self, position: usize) {
        let position = position.min(self.len());
        let (line, column) = self.lines().line_column(position);
        self.cursor = Cursor::new(position, line, column);
    }

    /// Current selection (may be inactive).
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection.is_active()
    }

    /// Select from `anchor` to `end` (both clamped); the cursor moves to `end`.
    pub fn set_selection(&mut self, anchor: usize, end: usize) {
        let len = self.len();
        let (anchor, end) = (anchor.min(len), end.min(len));
        self.preferred_column = None;
        self.place_cursor(end);
        self.selection = if anchor == end {
            Selection::NONE
        } else {
            Selection::new(anchor, end)
        };
    }

    pub fn select_all(&mut self) {
        self.set_selection(0, self.len());
    }

    /// Selected text in document order, or `None` without a selection.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        if !self.selection.is_active() {
            return None;
        }
        self.slice(self.selection.low(), self.selection.high()).ok()
    }

    /// Apply a navigation command.
    pub fn move_cursor(&mut self, kind: MoveKind, modifiers: MoveModifiers) {
        let before = self.cursor.position;
        let had_selection = self.selection.is_active();

        if !matches!(kind, MoveKind::Up | MoveKind::Down) {
            self.preferred_column = None;
        }

        let collapse = had_selection && !modifiers.shift() && !modifiers.ctrl();
        let target = match kind {
            MoveKind::Left if collapse => self.selection.low(),
            MoveKind::Right if collapse => self.selection.high(),
            MoveKind::Left => self.left_of(before, modifiers.ctrl()),
            MoveKind::Right => self.right_of(before, modifiers.ctrl()),
            MoveKind::Up | MoveKind::Down => self.vertical_target(kind),
            MoveKind::Home if modifiers.ctrl() => 0,
            MoveKind::Home => self.line_info(before).start,
            MoveKind::End if modifiers.ctrl() => self.len(),
            MoveKind::End => self.line_info(before).end,
        };
        self.place_cursor(target);

        if modifiers.shift() {
            if !had_selection {
                self.selection.anchor = before;
            }
            self.selection.end = self.cursor.position;
        } else {
            self.selection = Selection::NONE;
        }
    }

    fn left_of(&self, position: usize, word: bool) -> usize {
        let info = self.line_info(position);
        if position > info.start {
            if word {
                word_start(position, info.start, |i| self.get_char(i), |c| self.host.classify(c))
            } else {
                position - 1
            }
        } else if info.line > 0 && self.host.wraps_at_line_edges() {
            position - 1
        } else {
            position
        }
    }

    fn right_of(&self, position: usize, word: bool) -> usize {
        let info = self.line_info(position);
        if position < info.end {
            if word {
                word_end(position, info.end, |i| self.get_char(i), |c| self.host.classify(c))
            } else {
                position + 1
            }
        } else if info.line + 1 < self.line_count() && self.host.wraps_at_line_edges() {
            position + 1
        } else {
            position
        }
    }

    /// Word-step start for word-mode backspace; joins lines at column 0.
    fn word_left_of(&self, position: usize) -> usize {
        let info = self.line_info(position);
        if position == info.start {
            position - 1
        } else {
            word_start(position, info.start, |i| self.get_char(i), |c| self.host.classify(c))
        }
    }

    /// Word-step end for word-mode delete; joins lines at the line end.
    fn word_right_of(&self, position: usize) -> usize {
        let info = self.line_info(position);
        if position == info.end {
            position + 1
        } else {
            word_end(position, info.end, |i| self.get_char(i), |c| self.host.classify(c))
        }
    }

    fn vertical_target(&mut self, kind: MoveKind) -> usize {
        let Cursor {
            position,
            line,
            column,
        } = self.cursor;
        let column = *self.preferred_column.get_or_insert(column);
        let target_line = match kind {
            MoveKind::Up if line > 0 => line - 1,
            MoveKind::Down if line + 1 < self.line_count() => line + 1,
            _ => return position,
        };
        self.position_from_line_column(target_line, column)
    }

    // ------------------------------------------------------------------
    // Decoration overlay
    // ------------------------------------------------------------------

    /// Allocate the style overlay (if absent) for the current length.
    pub fn enable_overlay(&mut self) {
        let len = self.len();
        self.overlay.enable(len);
    }

    /// Drop the overlay and release its storage.
    pub fn disable_overlay(&mut self) {
        self.overlay.disable();
    }

    #[must_use]
    pub fn overlay_enabled(&self) -> bool {
        self.overlay.is_enabled()
    }

    #[must_use]
    pub fn overlay(&self) -> &DecorationOverlay {
        &self.overlay
    }

    /// Stamp `tag` over `[start, end)`. No-op while the overlay is disabled.
    ///
    /// Tags are not shifted by later edits; repaint after structural changes.
    pub fn paint(&mut self, start: usize, end: usize, tag: u8) {
        let len = self.len();
        self.overlay.paint(start, end, tag, len);
    }

    /// Tag painted at `offset` (0 = none, or past the end of the document).
    #[must_use]
    pub fn style_at(&self, offset: usize) -> u8 {
        if offset >= self.len() {
            return 0;
        }
        self.overlay.tag_at(offset)
    }

    /// Host label for a tag. Tag `0` always maps to `None`.
    #[must_use]
    pub fn style_for_tag(&self, tag: u8) -> Option<&str> {
        if tag == 0 {
            return None;
        }
        self.host.style_label(tag)
    }

    // ------------------------------------------------------------------
    // Tooltips and lexing
    // ------------------------------------------------------------------

    pub fn add_tooltip(&mut self, start: usize, end: usize, kind: u8, key: u64) {
        self.tooltips.add(TooltipEntry::new(start, end, kind, key));
    }

    pub fn clear_tooltips(&mut self) {
        self.tooltips.clear();
    }

    #[must_use]
    pub fn tooltips(&self) -> &[TooltipEntry] {
        self.tooltips.entries()
    }

    /// First registered tooltip containing `offset`.
    #[must_use]
    pub fn find_tooltip_at(&self, offset: usize) -> Option<TooltipEntry> {
        self.tooltips.find_at(offset).copied()
    }

    /// Text under a tooltip, formatted by the host. `None` when the recorded
    /// range no longer fits the document.
    #[must_use]
    pub fn tooltip_text(&self, entry: &TooltipEntry) -> Option<String> {
        let raw = self.slice(entry.start, entry.end).ok()?;
        Some(self.host.format_tooltip(entry, &raw))
    }

    /// Clear tooltips and overlay tags, then let `lexer` repopulate them from
    /// the whole document.
    pub fn relex(&mut self, lexer: &dyn Lexer) {
        let len = self.len();
        self.tooltips.clear();
        self.overlay.paint(0, len, 0, len);
        let text = self.text();
        let mut sink = LexSink::new(&mut self.overlay, &mut self.tooltips, len);
        lexer.lex(&text, &mut sink);
        debug!(len, tooltips = self.tooltips.len(), "relexed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> EditBuffer {
        let mut edit = EditBuffer::new();
        for ch in text.chars() {
            edit.insert_at_cursor(&ch.to_string());
        }
        edit
    }

    #[test]
    fn test_edit_basic() {
        let mut edit = EditBuffer::new();
        edit.insert_at_cursor("Hello");
        assert_eq!(edit.text(), "Hello");
        assert_eq!(edit.cursor().position, 5);
        assert_eq!(edit.edit_kind(), EditKind::InsertLtr);
    }

    #[test]
    fn test_pending_insert_reads_through() {
        let mut edit = EditBuffer::with_text("ad");
        edit.insert_at("bc", 1).unwrap();
        assert_eq!(edit.len(), 4);
        assert_eq!(edit.pending().kind(), EditKind::InsertLtr);
        let read: String = (0..4).map(|i| edit.char_at(i).unwrap()).collect();
        assert_eq!(read, "abcd");
        assert_eq!(edit.slice(1, 4).unwrap(), "bcd");
        assert_eq!(edit.to_string(), "abcd");
    }

    #[test]
    fn test_pending_delete_reads_skip_removed() {
        let mut edit = EditBuffer::with_text("abcdef");
        edit.remove_range(1, 2, RemoveDirection::DeleteLtr);
        assert_eq!(edit.edit_kind(), EditKind::RemoveDeleteLtr);
        assert_eq!(edit.len(), 4);
        assert_eq!(edit.char_at(1), Ok('d'));
        assert_eq!(edit.slice(0, 4).unwrap(), "adef");
        assert_eq!(edit.pending().payload(), &['b', 'c']);
    }

    #[test]
    fn test_char_at_out_of_range() {
        let edit = EditBuffer::with_text("ab");
        assert_eq!(
            edit.char_at(2),
            Err(Error::OutOfRange { offset: 2, len: 2 })
        );
    }

    #[test]
    fn test_insert_past_end_rejected_without_change() {
        let mut edit = EditBuffer::with_text("ab");
        assert!(edit.insert_at("x", 3).is_err());
        assert_eq!(edit.text(), "ab");
        assert_eq!(edit.edit_kind(), EditKind::None);
    }

    #[test]
    fn test_insert_normalizes_line_endings() {
        let mut edit = EditBuffer::new();
        edit.insert_at_cursor("a\r\nb\rc\n\td");
        assert_eq!(edit.text(), "a\nb\nc\n\td");
        assert_eq!(edit.line_breaks(), &[1, 3, 5]);
        assert_eq!(edit.tabs(), &[6]);
        assert_eq!(edit.line_count(), 4);
    }

    #[test]
    fn test_typing_coalesces_into_one_step() {
        let mut edit = typed("hello");
        assert!(edit.history().is_empty());
        edit.squash();
        assert_eq!(edit.history().len(), 1);
        assert_eq!(edit.history()[0].len(), 5);
        assert_eq!(edit.history()[0].offset, 0);
    }

    #[test]
    fn test_non_adjacent_insert_squashes() {
        let mut edit = typed("abc");
        edit.insert_at("X", 0).unwrap();
        assert_eq!(edit.history().len(), 1);
        assert_eq!(edit.history()[0].text, "abc");
        assert_eq!(edit.text(), "Xabc");
    }

    #[test]
    fn test_backspace_run_prepends() {
        let mut edit = EditBuffer::with_text("hello world");
        edit.set_cursor(11);
        for _ in 0..5 {
            edit.remove_at_cursor(RemoveDirection::BackspaceRtl, false);
        }
        assert_eq!(edit.edit_kind(), EditKind::RemoveBackspaceRtl);
        let payload: String = edit.pending().payload().iter().collect();
        assert_eq!(payload, "world");
        assert_eq!(edit.pending().anchor(), 6);
        edit.squash();
        assert_eq!(edit.history().len(), 1);
        assert_eq!(edit.history()[0].text, "world");
        assert_eq!(edit.text(), "hello ");
    }

    #[test]
    fn test_delete_run_appends() {
        let mut edit = EditBuffer::with_text("hello world");
        edit.set_cursor(0);
        for _ in 0..6 {
            edit.remove_at_cursor(RemoveDirection::DeleteLtr, false);
        }
        let payload: String = edit.pending().payload().iter().collect();
        assert_eq!(payload, "hello ");
        assert_eq!(edit.text(), "world");
        edit.squash();
        assert_eq!(edit.history().len(), 1);
    }

    #[test]
    fn test_direction_change_squashes() {
        let mut edit = EditBuffer::with_text("abcdef");
        edit.set_cursor(3);
        edit.remove_at_cursor(RemoveDirection::BackspaceRtl, false);
        edit.remove_at_cursor(RemoveDirection::DeleteLtr, false);
        assert_eq!(edit.history().len(), 1);
        assert_eq!(edit.history()[0].kind, EditKind::RemoveBackspaceRtl);
        assert_eq!(edit.text(), "abef");
    }

    #[test]
    fn test_backspace_with_gap_starts_new_step() {
        let mut edit = EditBuffer::with_text("abcdef");
        edit.remove_range(4, 1, RemoveDirection::BackspaceRtl);
        edit.remove_range(1, 1, RemoveDirection::BackspaceRtl);
        edit.squash();
        let steps = edit.history();
        assert_eq!(steps.len(), 2);
        assert_eq!(
            (steps[0].kind, steps[0].offset, steps[0].text.as_str()),
            (EditKind::RemoveBackspaceRtl, 4, "e")
        );
        assert_eq!(
            (steps[1].kind, steps[1].offset, steps[1].text.as_str()),
            (EditKind::RemoveBackspaceRtl, 1, "b")
        );
        assert_eq!(edit.text(), "acdf");
    }

    #[test]
    fn test_delete_with_gap_starts_new_step() {
        let mut edit = EditBuffer::with_text("abcdef");
        edit.remove_range(3, 1, RemoveDirection::DeleteLtr);
        edit.remove_range(1, 1, RemoveDirection::DeleteLtr);
        edit.squash();
        let steps = edit.history();
        assert_eq!(steps.len(), 2);
        assert_eq!(
            (steps[0].kind, steps[0].offset, steps[0].text.as_str()),
            (EditKind::RemoveDeleteLtr, 3, "d")
        );
        assert_eq!(
            (steps[1].kind, steps[1].offset, steps[1].text.as_str()),
            (EditKind::RemoveDeleteLtr, 1, "b")
        );
        assert_eq!(edit.text(), "acef");
    }

    #[test]
    fn test_squash_skips_empty_run() {
        let mut edit = typed("ab");
        edit.undo();
        assert!(edit.can_redo());
        edit.pending.kind = EditKind::RemoveDeleteLtr;
        edit.pending.anchor = 1;
        edit.squash();
        assert!(edit.history().is_empty());
        assert_eq!(edit.edit_kind(), EditKind::None);
        assert!(edit.can_redo());
    }

    #[test]
    fn test_style_at_past_end_is_unstyled() {
        let mut edit = EditBuffer::with_text("abcd");
        edit.enable_overlay();
        edit.paint(0, 4, 9);
        edit.remove_range(0, 4, RemoveDirection::DeleteLtr);
        assert_eq!(edit.len(), 0);
        assert_eq!(edit.style_at(0), 0);
        assert_eq!(edit.style_at(1), 0);
    }

    #[test]
    fn test_remove_across_pending_insert() {
        let mut edit = EditBuffer::with_text("ad");
        edit.insert_at("bc", 1).unwrap();
        assert_eq!(edit.remove_range(0, 3, RemoveDirection::DeleteLtr), 3);
        assert_eq!(edit.pending().payload(), &['a', 'b', 'c']);
        assert_eq!(edit.text(), "d");
        edit.squash();
        assert_eq!(edit.history().len(), 2);
        assert_eq!(edit.history()[1].text, "abc");
    }

    #[test]
    fn test_remove_at_end_is_noop() {
        let mut edit = EditBuffer::with_text("abc");
        assert_eq!(edit.remove_range(3, 1, RemoveDirection::DeleteLtr), 0);
        assert_eq!(edit.remove_range(1, 0, RemoveDirection::DeleteLtr), 0);
        assert_eq!(edit.edit_kind(), EditKind::None);
        assert_eq!(edit.remove_range(1, 10, RemoveDirection::DeleteLtr), 2);
        assert_eq!(edit.text(), "a");
    }

    #[test]
    fn test_remove_updates_indices() {
        let mut edit = EditBuffer::with_text("a\n\tb\nc");
        edit.remove_range(1, 3, RemoveDirection::DeleteLtr);
        assert_eq!(edit.text(), "a\nc");
        assert_eq!(edit.line_breaks(), &[1]);
        assert!(edit.tabs().is_empty());
    }

    #[test]
    fn test_word_mode_backspace() {
        let mut edit = EditBuffer::with_text("foo bar");
        edit.set_cursor(7);
        edit.remove_at_cursor(RemoveDirection::BackspaceRtl, true);
        assert_eq!(edit.text(), "foo ");
        edit.remove_at_cursor(RemoveDirection::BackspaceRtl, true);
        assert_eq!(edit.text(), "");
    }

    #[test]
    fn test_word_mode_delete_joins_lines_at_end() {
        let mut edit = EditBuffer::with_text("ab\ncd");
        edit.set_cursor(2);
        edit.remove_at_cursor(RemoveDirection::DeleteLtr, true);
        assert_eq!(edit.text(), "abcd");
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut edit = EditBuffer::with_text("hello world");
        edit.set_selection(0, 5);
        edit.insert_at_cursor("HELLO");
        assert_eq!(edit.text(), "HELLO world");
        assert!(!edit.has_selection());
        assert_eq!(edit.cursor().position, 5);
    }

    #[test]
    fn test_set_text_resets_state() {
        let mut edit = EditBuffer::new();
        edit.set_text("abc\n\n\t\t");
        edit.set_cursor(5);
        edit.insert_at_cursor("zz");
        edit.set_text("abc\n\t");
        assert_eq!(edit.line_breaks().len(), 1);
        assert_eq!(edit.tabs().len(), 1);
        assert_eq!(edit.cursor().position, 0);
        assert_eq!(edit.edit_kind(), EditKind::None);
        assert!(edit.history().is_empty());
    }

    #[test]
    fn test_clear_keeps_overlay_capacity() {
        let mut edit = EditBuffer::with_text("abc");
        edit.enable_overlay();
        edit.paint(0, 3, 1);
        let capacity = edit.overlay().capacity();
        edit.clear();
        assert!(edit.is_empty());
        assert!(edit.overlay_enabled());
        assert_eq!(edit.overlay().capacity(), capacity);
        assert_eq!(edit.style_at(0), 0);
    }

    #[test]
    fn test_undo_redo_coalesced_run() {
        let mut edit = typed("abc");
        assert!(edit.undo());
        assert_eq!(edit.text(), "");
        assert!(edit.redo());
        assert_eq!(edit.text(), "abc");
        assert_eq!(edit.cursor().position, 3);
    }

    #[test]
    fn test_undo_backspace_restores_cursor_after_text() {
        let mut edit = EditBuffer::with_text("abcd");
        edit.set_cursor(4);
        edit.remove_at_cursor(RemoveDirection::BackspaceRtl, false);
        edit.remove_at_cursor(RemoveDirection::BackspaceRtl, false);
        assert!(edit.undo());
        assert_eq!(edit.text(), "abcd");
        assert_eq!(edit.cursor().position, 4);
    }

    #[test]
    fn test_edit_after_undo_starts_new_run() {
        let mut edit = typed("ab");
        edit.undo();
        assert!(edit.pending().undone());
        edit.insert_at_cursor("x");
        assert!(!edit.pending().undone());
        assert!(!edit.can_redo());
        edit.squash();
        assert_eq!(edit.history().len(), 1);
        assert_eq!(edit.history()[0].text, "x");
    }

    #[test]
    fn test_history_depth_limit() {
        let mut edit = EditBuffer::with_options(BufferOptions {
            max_history_depth: 3,
            ..BufferOptions::default()
        });
        for i in 0..5 {
            edit.insert_at_cursor(&i.to_string());
            edit.squash();
        }
        assert_eq!(edit.text(), "01234");
        assert!(edit.undo());
        assert!(edit.undo());
        assert!(edit.undo());
        assert!(!edit.undo());
        assert_eq!(edit.text(), "01");
    }

    #[test]
    fn test_display_column_expands_tabs_and_wide_chars() {
        let edit = EditBuffer::with_text("a\tb\n中x");
        assert_eq!(edit.display_column(1), 1);
        assert_eq!(edit.display_column(2), 4);
        assert_eq!(edit.display_column(3), 5);
        assert_eq!(edit.display_column(5), 2);
        assert_eq!(edit.display_column(6), 3);
    }

    #[test]
    fn test_line_text() {
        let edit = EditBuffer::with_text("one\ntwo\n");
        assert_eq!(edit.line_text(0).as_deref(), Some("one"));
        assert_eq!(edit.line_text(2).as_deref(), Some(""));
        assert_eq!(edit.line_text(3), None);
    }
}
