//! Style overlay, tooltip annotations and the lexer contract.
//!
//! None of these are shifted or invalidated by edits. A lexer re-runs over
//! the whole document through [`EditBuffer::relex`](crate::EditBuffer::relex)
//! once content settles.

mod lexer;
mod overlay;
mod syntax;
mod tooltip;

pub use lexer::{LexSink, Lexer};
pub use overlay::{DEFAULT_OVERLAY_CAPACITY, DecorationOverlay};
pub use syntax::StyleRegistry;
pub use tooltip::{TooltipEntry, TooltipRegistry};
