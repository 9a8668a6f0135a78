//! `textcore` - Text buffer core for code editors
//!
//! A character-indexed text buffer with a single coalesced pending edit,
//! incrementally maintained line and tab indices, cursor navigation with
//! word stepping, a per-character style overlay, and tooltip ranges.
//!
//! ```
//! use textcore::{EditBuffer, MoveKind, MoveModifiers};
//!
//! let mut buf = EditBuffer::with_text("foo bar_baz 123");
//! buf.move_cursor(MoveKind::Right, MoveModifiers::CTRL);
//! assert_eq!(buf.cursor().position, 3);
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow history::EditHistory etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on Error
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks

pub mod error;
pub mod highlight;
pub mod host;
pub mod text;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use host::{BufferHost, DefaultHost};

// Re-export decoration types
pub use highlight::{
    DecorationOverlay, LexSink, Lexer, StyleRegistry, TooltipEntry, TooltipRegistry,
};

// Re-export commonly used types
pub use text::{
    BufferOptions, CharClass, Cursor, EditBuffer, EditKind, HistoryStep, LineInfo, MoveKind,
    MoveModifiers, PendingEdit, RemoveDirection, Selection,
};
