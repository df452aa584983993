use alloc::string::String;

/// Source position. Lines are 1-based, columns are 0-based character offsets
/// within the line (tabs count as one column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or keyword-like word
    Name,
    /// Numeric literal (decimal, radix-prefixed, float)
    Number,
    /// String literal, quotes included in the text
    String,
    /// Operator or delimiter
    Operator,
    /// Physical line break
    Newline,
    /// `#` comment, without the trailing newline
    Comment,
    /// End of input marker
    End,
}

/// An immutable lexical token. Rewrite passes never mutate a token in place;
/// they build a new value carrying the original span so that layout
/// reconstruction stays faithful after text replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, start: Position, end: Position) -> Self {
        Self {
            kind,
            text,
            start,
            end,
        }
    }

    /// Replacement constructor: same kind and span, different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            kind: self.kind,
            text: text.into(),
            start: self.start,
            end: self.end,
        }
    }

    /// Collapse constructor: one token covering the span from `self` to
    /// `last`, used when a multi-token window is replaced by a single token.
    pub fn spanning(&self, last: &Token, kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            start: self.start,
            end: last.end,
        }
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}
