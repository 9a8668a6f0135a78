//! Minimal keyword lexer used to exercise the lexer contract.

use textcore::{LexSink, Lexer};

pub const TAG_KEYWORD: u8 = 1;
pub const TAG_TYPE: u8 = 2;
pub const TAG_NUMBER: u8 = 3;

/// Tooltip kind attached to every type name.
pub const TOOLTIP_TYPE: u8 = 7;

#[derive(Debug, Default)]
pub struct KeywordLexer;

impl KeywordLexer {
    fn classify(word: &str) -> Option<u8> {
        match word {
            "if" | "else" | "match" | "loop" | "while" | "for" | "break" | "continue"
            | "return" | "fn" | "let" | "const" | "struct" | "enum" | "impl" | "pub" | "mut" => {
                Some(TAG_KEYWORD)
            }
            "bool" | "u8" | "u32" | "u64" | "usize" | "i32" | "i64" | "char" | "str"
            | "String" | "Vec" | "Option" | "Result" => Some(TAG_TYPE),
            _ if word.chars().all(|c| c.is_ascii_digit()) => Some(TAG_NUMBER),
            _ => None,
        }
    }
}

impl Lexer for KeywordLexer {
    fn lex(&self, text: &str, sink: &mut LexSink<'_>) {
        let chars: Vec<char> = text.chars().collect();
        let mut pos = 0;
        while pos < chars.len() {
            if !(chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
                continue;
            }
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            if let Some(tag) = Self::classify(&word) {
                sink.paint(start, pos, tag);
                if tag == TAG_TYPE {
                    sink.add_tooltip(start, pos, TOOLTIP_TYPE, start as u64);
                }
            }
        }
    }
}
