//! Contract for external lexers that populate the overlay and tooltips.

use crate::highlight::overlay::DecorationOverlay;
use crate::highlight::tooltip::{TooltipEntry, TooltipRegistry};

/// A language-specific classifier run when content has settled.
///
/// Offsets passed to the sink are character offsets into `text`.
pub trait Lexer {
    /// Scan the whole document, painting and annotating through `sink`.
    fn lex(&self, text: &str, sink: &mut LexSink<'_>);
}

/// Write access handed to a [`Lexer`] during [`EditBuffer::relex`](crate::EditBuffer::relex).
pub struct LexSink<'a> {
    overlay: &'a mut DecorationOverlay,
    tooltips: &'a mut TooltipRegistry,
    len: usize,
}

impl<'a> LexSink<'a> {
    pub(crate) fn new(
        overlay: &'a mut DecorationOverlay,
        tooltips: &'a mut TooltipRegistry,
        len: usize,
    ) -> Self {
        Self {
            overlay,
            tooltips,
            len,
        }
    }

    /// Document length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stamp `tag` over `[start, end)`. No-op while the overlay is disabled.
    pub fn paint(&mut self, start: usize, end: usize, tag: u8) {
        self.overlay.paint(start, end, tag, self.len);
    }

    /// Register an annotated range.
    pub fn add_tooltip(&mut self, start: usize, end: usize, kind: u8, key: u64) {
        self.tooltips.add(TooltipEntry::new(start, end, kind, key));
    }
}
