#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

pub mod lexer;

use std::sync::Once;

use textcore::EditBuffer;

/// Install a test-writer subscriber once per test binary.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Type `text` one character at a time at the cursor.
pub fn type_text(buf: &mut EditBuffer, text: &str) {
    for ch in text.chars() {
        buf.insert_at_cursor(&ch.to_string());
    }
}

/// Offsets of `target` in `text` after line-ending normalization.
pub fn offsets_of(text: &str, target: char) -> Vec<usize> {
    text.chars()
        .enumerate()
        .filter_map(|(idx, ch)| (ch == target).then_some(idx))
        .collect()
}

/// Assert the buffer's indices and cursor agree with a fresh scan of its text.
pub fn assert_consistent(buf: &EditBuffer) {
    let text = buf.text();
    assert_eq!(buf.len(), text.chars().count(), "length mismatch");
    assert_eq!(buf.line_breaks(), offsets_of(&text, '\n').as_slice());
    assert_eq!(buf.tabs(), offsets_of(&text, '\t').as_slice());
    let cursor = buf.cursor();
    assert!(cursor.position <= buf.len(), "cursor past end");
    assert_eq!(
        (cursor.line, cursor.column),
        buf.line_column(cursor.position),
        "cursor line/column stale"
    );
    for p in 0..=buf.len() {
        let (line, column) = buf.line_column(p);
        assert_eq!(buf.position_from_line_column(line, column), p, "offset {p}");
    }
}
