//! Committed edit steps and the bounded undo/redo log.
//!
//! Contiguous edits are coalesced into one run by the buffer's pending edit;
//! when that run is squashed it lands here as a single [`HistoryStep`].

/// Kind of an edit run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditKind {
    /// No run in flight.
    #[default]
    None,
    /// Insertion growing to the right.
    InsertLtr,
    /// Forward deletion (Delete key): repeated removals at the same offset.
    RemoveDeleteLtr,
    /// Backward deletion (Backspace): removals proceeding to the left.
    RemoveBackspaceRtl,
}

/// One committed, coalesced edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryStep {
    pub kind: EditKind,
    /// Logical offset where the step's text starts.
    pub offset: usize,
    /// Inserted text, or removed text in document order.
    pub text: String,
}

impl HistoryStep {
    /// Number of characters the step covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the step covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Default maximum number of committed steps to retain.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Undo/redo stacks with bounded memory usage.
#[derive(Clone, Debug)]
pub struct EditHistory {
    undo_stack: Vec<HistoryStep>,
    redo_stack: Vec<HistoryStep>,
    /// Maximum number of steps to retain. Oldest entries are dropped when exceeded.
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_HISTORY_DEPTH)
    }
}

impl EditHistory {
    /// Create a history with a custom maximum depth.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        self.enforce_depth();
    }

    /// Committed steps, oldest first.
    #[must_use]
    pub fn steps(&self) -> &[HistoryStep] {
        &self.undo_stack
    }

    /// Record a freshly committed step.
    pub fn push(&mut self, step: HistoryStep) {
        self.undo_stack.push(step);
        self.enforce_depth();
    }

    /// Forget redoable steps; called when a new run begins.
    pub fn discard_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn pop_undo(&mut self) -> Option<HistoryStep> {
        self.undo_stack.pop()
    }

    pub fn push_redo(&mut self, step: HistoryStep) {
        self.redo_stack.push(step);
    }

    pub fn pop_redo(&mut self) -> Option<HistoryStep> {
        self.redo_stack.pop()
    }

    /// Return a redone step to the undo stack without touching the redo stack.
    pub fn push_redone(&mut self, step: HistoryStep) {
        self.undo_stack.push(step);
        self.enforce_depth();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_depth(&mut self) {
        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }
}
