//! The single in-flight edit run and logical/physical position translation.
//!
//! While a run is active, logical offsets seen by callers differ from the
//! physical indices of the committed [`Document`](super::Document):
//!
//! - An insert run holds its characters in a side payload that has not been
//!   spliced into the document yet.
//! - A deletion run leaves the removed characters in the document at
//!   `[anchor, anchor + len)` until it is squashed; logical reads skip them.
//!
//! Every reader funnels through [`PendingEdit::resolve`].

use crate::error::{Error, Result};
use crate::text::growable::GrowableBuffer;
use crate::text::history::EditKind;

/// Where a logical offset currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// Physical index into the committed document.
    Committed(usize),
    /// Index into the pending insert payload.
    Pending(usize),
}

/// The in-flight edit run. At most one exists per buffer.
#[derive(Clone, Debug, Default)]
pub struct PendingEdit {
    pub(crate) kind: EditKind,
    /// Logical offset where the run starts.
    pub(crate) anchor: usize,
    /// Characters inserted by an insert run, not yet in the document.
    pub(crate) inserted: Vec<char>,
    /// Characters removed by a deletion run, in document order.
    pub(crate) removed: GrowableBuffer<char>,
    /// Set after an undo; the next edit must start a fresh run.
    pub(crate) undone: bool,
}

impl PendingEdit {
    /// Kind of the active run (`EditKind::None` when idle).
    #[must_use]
    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// Logical start of the active run.
    #[must_use]
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Number of characters covered by the active run.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.kind {
            EditKind::None => 0,
            EditKind::InsertLtr => self.inserted.len(),
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => self.removed.len(),
        }
    }

    /// Check if no run is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the last history action was an undo.
    #[must_use]
    pub fn undone(&self) -> bool {
        self.undone
    }

    /// Characters held by the run (inserted text, or removed text in document order).
    #[must_use]
    pub fn payload(&self) -> &[char] {
        match self.kind {
            EditKind::None => &[],
            EditKind::InsertLtr => &self.inserted,
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => self.removed.as_slice(),
        }
    }

    /// Logical length given the committed document length.
    #[must_use]
    pub fn logical_len(&self, committed_len: usize) -> usize {
        match self.kind {
            EditKind::None => committed_len,
            EditKind::InsertLtr => committed_len + self.inserted.len(),
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => {
                committed_len - self.removed.len()
            }
        }
    }

    /// Map a logical offset to its storage location.
    ///
    /// The caller bounds-checks `offset` against the logical length.
    #[must_use]
    pub fn resolve(&self, offset: usize) -> Location {
        match self.kind {
            EditKind::None => Location::Committed(offset),
            EditKind::InsertLtr => {
                let len = self.inserted.len();
                if offset < self.anchor {
                    Location::Committed(offset)
                } else if offset < self.anchor + len {
                    Location::Pending(offset - self.anchor)
                } else {
                    Location::Committed(offset - len)
                }
            }
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => {
                if offset < self.anchor {
                    Location::Committed(offset)
                } else {
                    Location::Committed(offset + self.removed.len())
                }
            }
        }
    }

    /// Map a physical document index back to a logical offset.
    ///
    /// Fails with [`Error::Unsupported`] for an index inside an active
    /// deletion run, which has no logical position.
    pub(crate) fn to_logical(&self, physical: usize) -> Result<usize> {
        match self.kind {
            EditKind::None => Ok(physical),
            EditKind::InsertLtr => {
                if physical < self.anchor {
                    Ok(physical)
                } else {
                    Ok(physical + self.inserted.len())
                }
            }
            EditKind::RemoveDeleteLtr | EditKind::RemoveBackspaceRtl => {
                let len = self.removed.len();
                if physical < self.anchor {
                    Ok(physical)
                } else if physical < self.anchor + len {
                    debug_assert!(false, "physical index {physical} inside deletion run");
                    Err(Error::Unsupported("read inside an active deletion run"))
                } else {
                    Ok(physical - len)
                }
            }
        }
    }

    /// Reset to the idle state, keeping payload capacity.
    pub(crate) fn reset(&mut self) {
        self.kind = EditKind::None;
        self.anchor = 0;
        self.inserted.clear();
        self.removed.clear();
    }
}
