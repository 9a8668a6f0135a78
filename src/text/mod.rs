//! Text storage and editing with a single pending edit run.
//!
//! This module provides a rope-backed document wrapped in an editing facade
//! that defers committing contiguous typing and deletion until the run ends.
//!
//! # Pending Run Policy
//!
//! Callers only ever see logical offsets. While a run is in flight the
//! committed [`Document`] is stale: inserted characters live in a side
//! payload and removed characters are still stored, just skipped. The line
//! and tab indices are always logical and patched on every edit.
//!
//! Key types:
//!
//! - [`EditBuffer`]: Editable buffer with cursor movement, selection and undo/redo
//! - [`PendingEdit`]: The in-flight run and logical/physical translation
//! - [`OffsetIndex`]: Incrementally maintained line-break and tab offsets
//! - [`GrowableBuffer`]: Explicit-capacity storage with doubling growth
//!
//! # Examples
//!
//! ## Coalesced Typing
//!
//! ```
//! use textcore::{EditBuffer, EditKind};
//!
//! let mut editor = EditBuffer::new();
//! for ch in "Hello".chars() {
//!     editor.insert_at_cursor(&ch.to_string());
//! }
//! assert_eq!(editor.edit_kind(), EditKind::InsertLtr);
//! assert!(editor.history().is_empty());
//!
//! editor.squash();
//! assert_eq!(editor.history().len(), 1);
//! assert_eq!(editor.text(), "Hello");
//! ```
//!
//! ## Line Queries
//!
//! ```
//! use textcore::EditBuffer;
//!
//! let editor = EditBuffer::with_text("one\ntwo\r\nthree");
//! assert_eq!(editor.line_count(), 3);
//! assert_eq!(editor.line_column(6), (1, 2));
//! assert_eq!(editor.position_from_line_column(2, 99), 13);
//! ```

mod cursor;
mod document;
mod edit;
mod growable;
mod history;
mod index;
mod pending;

pub use cursor::{
    CharClass, Cursor, MoveKind, MoveModifiers, RemoveDirection, Selection, word_end, word_start,
};
pub use document::Document;
pub use edit::{BufferOptions, EditBuffer};
pub use growable::{GrowableBuffer, max_len};
pub use history::{DEFAULT_MAX_HISTORY_DEPTH, EditHistory, EditKind, HistoryStep};
pub use index::{LineInfo, Lines, OffsetIndex};
pub use pending::{Location, PendingEdit};
