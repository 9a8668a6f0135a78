//! Cursor, selection and word stepping.

use bitflags::bitflags;

/// Cursor position as a flat offset plus its derived line and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    /// Logical offset in `[0, len]`.
    pub position: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column number (0-indexed, in characters).
    pub column: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(position: usize, line: usize, column: usize) -> Self {
        Self {
            position,
            line,
            column,
        }
    }
}

/// Selection between an anchor and a moving end. Order is not normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub anchor: usize,
    pub end: usize,
}

impl Selection {
    /// The cleared selection. Callers must not rely on its numeric value.
    pub const NONE: Self = Self { anchor: 0, end: 0 };

    #[must_use]
    pub fn new(anchor: usize, end: usize) -> Self {
        Self { anchor, end }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor != self.end
    }

    /// Lower bound in document order.
    #[must_use]
    pub fn low(&self) -> usize {
        self.anchor.min(self.end)
    }

    /// Upper bound in document order.
    #[must_use]
    pub fn high(&self) -> usize {
        self.anchor.max(self.end)
    }
}

/// Navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Left,
    Down,
    Up,
    Right,
    Home,
    End,
}

bitflags! {
    /// Modifier keys held during a cursor move.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct MoveModifiers: u8 {
        /// Extend the selection around a fixed anchor.
        const SHIFT = 0b0000_0001;
        /// Word steps for Left/Right, document bounds for Home/End.
        const CTRL  = 0b0000_0100;
    }
}

impl MoveModifiers {
    #[must_use]
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    #[must_use]
    pub fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }
}

/// Direction of a removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoveDirection {
    /// Delete key: removes characters at and after the offset.
    DeleteLtr,
    /// Backspace: removes characters before the cursor.
    BackspaceRtl,
}

/// Word-step character class, ordered by priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharClass {
    Whitespace,
    Punctuation,
    LetterOrDigit,
}

impl CharClass {
    /// Default classification: whitespace, alphanumerics, and everything else
    /// (including `_`) as punctuation.
    #[must_use]
    pub fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            Self::Whitespace
        } else if ch.is_alphanumeric() {
            Self::LetterOrDigit
        } else {
            Self::Punctuation
        }
    }
}

/// End of the word step starting at `position`, never passing `line_end`.
///
/// The first character crossed sets the level; stepping continues while the
/// next character's class does not drop below the highest class seen.
pub fn word_end<F, C>(position: usize, line_end: usize, char_at: F, classify: C) -> usize
where
    F: Fn(usize) -> Option<char>,
    C: Fn(char) -> CharClass,
{
    if position >= line_end {
        return position;
    }
    let Some(first) = char_at(position) else {
        return position;
    };
    let mut level = classify(first);
    let mut pos = position + 1;
    while pos < line_end {
        let Some(ch) = char_at(pos) else { break };
        let class = classify(ch);
        if class < level {
            break;
        }
        level = level.max(class);
        pos += 1;
    }
    pos
}

/// Start of the word step ending at `position`, never passing `line_start`.
pub fn word_start<F, C>(position: usize, line_start: usize, char_at: F, classify: C) -> usize
where
    F: Fn(usize) -> Option<char>,
    C: Fn(char) -> CharClass,
{
    if position <= line_start {
        return position;
    }
    let Some(first) = char_at(position - 1) else {
        return position;
    };
    let mut level = classify(first);
    let mut pos = position - 1;
    while pos > line_start {
        let Some(ch) = char_at(pos - 1) else { break };
        let class = classify(ch);
        if class < level {
            break;
        }
        level = level.max(class);
        pos -= 1;
    }
    pos
}
