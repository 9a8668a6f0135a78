//! Sparse per-character style tags.
//!
//! The overlay is a byte per logical offset (`0` = no style). It is disabled
//! until [`DecorationOverlay::enable`] is called. Edits do not shift painted
//! tags: a lexer is expected to repaint after structural changes.

use crate::text::GrowableBuffer;

/// Default overlay capacity, in characters.
pub const DEFAULT_OVERLAY_CAPACITY: usize = 256;

/// Byte-per-character style tag array with its own capacity.
#[derive(Clone, Debug)]
pub struct DecorationOverlay {
    tags: Option<GrowableBuffer<u8>>,
    min_capacity: usize,
}

impl Default for DecorationOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_CAPACITY)
    }
}

impl DecorationOverlay {
    /// Create a disabled overlay that allocates at least `min_capacity` slots
    /// once enabled.
    #[must_use]
    pub fn new(min_capacity: usize) -> Self {
        Self {
            tags: None,
            min_capacity: min_capacity.max(1),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.tags.is_some()
    }

    /// Allocated slots, or 0 while disabled.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tags.as_ref().map_or(0, GrowableBuffer::capacity)
    }

    /// Allocate the overlay if absent, sized to the next power of two covering
    /// `doc_len` (never below the minimum capacity).
    pub fn enable(&mut self, doc_len: usize) {
        if self.tags.is_some() {
            return;
        }
        let capacity = doc_len
            .max(self.min_capacity)
            .checked_next_power_of_two()
            .unwrap_or(usize::MAX);
        tracing::debug!(capacity, "decoration overlay enabled");
        self.tags = Some(GrowableBuffer::with_capacity(capacity));
    }

    /// Drop the overlay and release its allocation.
    pub fn disable(&mut self) {
        self.tags = None;
    }

    /// Stamp `tag` over `[start, end)`, clamped to `doc_len`.
    ///
    /// No-op while disabled. Grows capacity geometrically when the document
    /// has outgrown it.
    pub fn paint(&mut self, start: usize, end: usize, tag: u8, doc_len: usize) {
        let Some(tags) = self.tags.as_mut() else {
            return;
        };
        let end = end.min(doc_len);
        if start >= end {
            return;
        }
        if tags.len() < doc_len && tags.resize(doc_len).is_err() {
            tracing::warn!(doc_len, "decoration overlay could not grow");
            return;
        }
        tags.fill(start..end, tag);
    }

    /// Tag at `offset` (0 when unpainted or disabled).
    #[must_use]
    pub fn tag_at(&self, offset: usize) -> u8 {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(offset))
            .unwrap_or(0)
    }

    /// Painted tags from offset 0, as far as they have been written.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.tags.as_ref().map_or(&[], GrowableBuffer::as_slice)
    }

    /// Erase all tags, keeping the allocation.
    pub fn clear(&mut self) {
        if let Some(tags) = self.tags.as_mut() {
            tags.clear();
        }
    }
}
