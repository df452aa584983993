pub mod scan;

use std::borrow::Cow;

pub use scan::tokenize;

/// Malformed lexical input. Fatal to the translation; the transpiler
/// propagates these unmodified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("neukončený řetězec začínající na řádku {line}, sloupci {column}")]
    UnterminatedString { line: u32, column: u32 },

    #[error("neplatný znak '{character}' na řádku {line}, sloupci {column}")]
    InvalidCharacter {
        character: char,
        line: u32,
        column: u32,
    },
}

impl LexError {
    pub fn position(&self) -> (u32, u32) {
        match *self {
            LexError::UnterminatedString { line, column } => (line, column),
            LexError::InvalidCharacter { line, column, .. } => (line, column),
        }
    }
}

/// Pre-tokenization text normalization. Czech quotation glyphs become the
/// host quote character, and CRLF line endings collapse to LF. This runs on
/// raw text, before any tokenization, because quote characters decide how the
/// scanner partitions string literals. Glyphs embedded as literal data inside
/// already-normal strings are indistinguishable from delimiters here; that is
/// a documented limitation of the text-level pass.
pub fn normalize_source(source: &str) -> Cow<'_, str> {
    if !source.contains(['„', '‟', '\r']) {
        return Cow::Borrowed(source);
    }
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '„' | '‟' => out.push('"'),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                }
                // CRLF: the LF that follows is kept as-is
            }
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
