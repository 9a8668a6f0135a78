//! Fuzz target for arbitrary edit sequences.
//!
//! Drives the edit buffer with random edits, moves and history commands and
//! checks that the line/tab indices and cursor always agree with the text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textcore::{EditBuffer, MoveKind, MoveModifiers, RemoveDirection};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { offset: u16, text: String },
    InsertAtCursor(String),
    Remove { offset: u16, count: u8, delete: bool },
    RemoveAtCursor { delete: bool, word: bool },
    Move { kind: u8, shift: bool, ctrl: bool },
    Select { anchor: u16, end: u16 },
    Squash,
    Undo,
    Redo,
    SetText(String),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut buf = EditBuffer::new();
    for op in ops.into_iter().take(256) {
        let len = buf.len();
        match op {
            Op::Insert { offset, text } => {
                let _ = buf.insert_at(&text, usize::from(offset));
            }
            Op::InsertAtCursor(text) => buf.insert_at_cursor(&text),
            Op::Remove {
                offset,
                count,
                delete,
            } => {
                let direction = if delete {
                    RemoveDirection::DeleteLtr
                } else {
                    RemoveDirection::BackspaceRtl
                };
                buf.remove_range(usize::from(offset), usize::from(count), direction);
            }
            Op::RemoveAtCursor { delete, word } => {
                let direction = if delete {
                    RemoveDirection::DeleteLtr
                } else {
                    RemoveDirection::BackspaceRtl
                };
                buf.remove_at_cursor(direction, word);
            }
            Op::Move { kind, shift, ctrl } => {
                let kind = match kind % 6 {
                    0 => MoveKind::Left,
                    1 => MoveKind::Down,
                    2 => MoveKind::Up,
                    3 => MoveKind::Right,
                    4 => MoveKind::Home,
                    _ => MoveKind::End,
                };
                let mut modifiers = MoveModifiers::empty();
                modifiers.set(MoveModifiers::SHIFT, shift);
                modifiers.set(MoveModifiers::CTRL, ctrl);
                buf.move_cursor(kind, modifiers);
            }
            Op::Select { anchor, end } => {
                buf.set_selection(usize::from(anchor) % (len + 1), usize::from(end) % (len + 1));
            }
            Op::Squash => buf.squash(),
            Op::Undo => {
                buf.undo();
            }
            Op::Redo => {
                buf.redo();
            }
            Op::SetText(text) => buf.set_text(&text),
        }

        let text = buf.text();
        assert_eq!(buf.len(), text.chars().count());
        let breaks: Vec<usize> = text
            .chars()
            .enumerate()
            .filter_map(|(i, c)| (c == '\n').then_some(i))
            .collect();
        assert_eq!(buf.line_breaks(), breaks.as_slice());
        assert!(buf.cursor().position <= buf.len());
    }
});
