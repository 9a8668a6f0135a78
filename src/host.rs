//! Host capabilities the buffer calls back into.
//!
//! The buffer owns no presentation knowledge: character classification,
//! style labels and tooltip formatting come from a [`BufferHost`] supplied at
//! construction.

use crate::highlight::{StyleRegistry, TooltipEntry};
use crate::text::CharClass;

/// Capability interface supplied by the embedding editor.
pub trait BufferHost {
    /// Classify a character for word stepping.
    fn classify(&self, ch: char) -> CharClass {
        CharClass::of(ch)
    }

    /// Caller-facing label for a nonzero overlay tag.
    fn style_label(&self, _tag: u8) -> Option<&str> {
        None
    }

    /// Format the raw text under a tooltip for display.
    fn format_tooltip(&self, _entry: &TooltipEntry, raw: &str) -> String {
        raw.to_string()
    }

    /// Whether plain Left/Right wrap to the adjacent line at line edges.
    fn wraps_at_line_edges(&self) -> bool {
        true
    }
}

/// Host with default behavior and a registry of style labels.
#[derive(Clone, Debug, Default)]
pub struct DefaultHost {
    styles: StyleRegistry,
}

impl DefaultHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registry setter.
    #[must_use]
    pub fn with_styles(mut self, styles: StyleRegistry) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }
}

impl BufferHost for DefaultHost {
    fn style_label(&self, tag: u8) -> Option<&str> {
        self.styles.label(tag)
    }
}
