use nom::bytes::complete::take_while1;
use nom::IResult;

use uzovka_protocol::{Position, Token, TokenKind};

use crate::LexError;

/// Multi-character operators, longest first. Matching order matters:
/// `**=` must win over `**`, which must win over `*`.
const OPERATORS_3: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
const OPERATORS_2: &[&str] = &[
    "==", "!=", "<=", ">=", "->", ":=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=",
    "**", "//", "<<", ">>",
];
const OPERATORS_1: &str = "+-*/%@<>=&|^~.,:;()[]{}";

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Scanning cursor over the remaining input. Tracks the position of the next
/// unread character; columns are counted in characters, not bytes, so Czech
/// letters occupy a single column.
struct Cursor<'a> {
    rest: &'a str,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            line: 1,
            column: 0,
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest.chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance over a chunk known to contain no newlines.
    fn advance_chunk(&mut self, chunk: &str) {
        self.rest = &self.rest[chunk.len()..];
        self.column += chunk.chars().count() as u32;
    }
}

/// Primary entry point: normalized text -> token stream with positions.
/// The stream always ends with a single `End` token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut cur = Cursor::new(input);
    let mut tokens = Vec::new();

    while let Some(c) = cur.peek() {
        match c {
            ' ' | '\t' | '\x0c' => {
                cur.bump();
            }
            '\n' => {
                let start = cur.pos();
                cur.bump();
                tokens.push(Token::new(
                    TokenKind::Newline,
                    "\n".to_string(),
                    start,
                    Position::new(start.line, start.column + 1),
                ));
            }
            '\\' if cur.peek_second() == Some('\n') => {
                // Explicit line continuation: no token, the emitter
                // re-materializes it from the position gap.
                cur.bump();
                cur.bump();
            }
            '#' => {
                let start = cur.pos();
                let parsed: IResult<&str, &str> = take_while1(|c| c != '\n')(cur.rest);
                // '#' itself guarantees at least one character
                let (_, text) = parsed.unwrap_or((cur.rest, cur.rest));
                let text = text.to_string();
                cur.advance_chunk(&text);
                tokens.push(Token::new(TokenKind::Comment, text, start, cur.pos()));
            }
            '"' | '\'' => {
                tokens.push(scan_string(&mut cur)?);
            }
            c if c.is_ascii_digit() => {
                tokens.push(scan_number(&mut cur));
            }
            c if is_ident_start(c) => {
                let start = cur.pos();
                let parsed: IResult<&str, &str> = take_while1(is_ident_continue)(cur.rest);
                // is_ident_start implies is_ident_continue, so this cannot fail
                let (_, word) = parsed.unwrap_or((cur.rest, &cur.rest[..c.len_utf8()]));
                let text = word.to_string();
                cur.advance_chunk(&text);
                tokens.push(Token::new(TokenKind::Name, text, start, cur.pos()));
            }
            _ => {
                tokens.push(scan_operator(&mut cur)?);
            }
        }
    }

    tokens.push(Token::new(
        TokenKind::End,
        String::new(),
        cur.pos(),
        cur.pos(),
    ));
    Ok(tokens)
}

fn scan_operator(cur: &mut Cursor) -> Result<Token, LexError> {
    let start = cur.pos();

    for ops in [OPERATORS_3, OPERATORS_2] {
        for op in ops {
            if cur.rest.starts_with(op) {
                cur.advance_chunk(op);
                return Ok(Token::new(
                    TokenKind::Operator,
                    (*op).to_string(),
                    start,
                    cur.pos(),
                ));
            }
        }
    }

    let c = match cur.peek() {
        Some(c) => c,
        None => {
            return Err(LexError::InvalidCharacter {
                character: '\0',
                line: start.line,
                column: start.column,
            })
        }
    };
    if OPERATORS_1.contains(c) {
        cur.bump();
        return Ok(Token::new(
            TokenKind::Operator,
            c.to_string(),
            start,
            cur.pos(),
        ));
    }

    Err(LexError::InvalidCharacter {
        character: c,
        line: start.line,
        column: start.column,
    })
}

fn scan_number(cur: &mut Cursor) -> Token {
    let start = cur.pos();
    let rest = cur.rest;
    let mut len = 0usize;
    let bytes = rest.as_bytes();

    let radix_prefix = bytes[0] == b'0'
        && bytes.len() > 2
        && matches!(bytes[1], b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
        && (bytes[2] as char).is_ascii_alphanumeric();

    if radix_prefix {
        len = 2;
        while len < bytes.len() && ((bytes[len] as char).is_ascii_alphanumeric() || bytes[len] == b'_') {
            len += 1;
        }
    } else {
        while len < bytes.len() && ((bytes[len] as char).is_ascii_digit() || bytes[len] == b'_') {
            len += 1;
        }
        // Fraction: only when a digit actually follows the dot, otherwise the
        // dot stays a separate operator (attribute access on a literal).
        if len + 1 < bytes.len()
            && bytes[len] == b'.'
            && (bytes[len + 1] as char).is_ascii_digit()
        {
            len += 1;
            while len < bytes.len() && ((bytes[len] as char).is_ascii_digit() || bytes[len] == b'_') {
                len += 1;
            }
        }
        // Exponent
        if len < bytes.len() && matches!(bytes[len], b'e' | b'E') {
            let mut probe = len + 1;
            if probe < bytes.len() && matches!(bytes[probe], b'+' | b'-') {
                probe += 1;
            }
            if probe < bytes.len() && (bytes[probe] as char).is_ascii_digit() {
                len = probe;
                while len < bytes.len() && (bytes[len] as char).is_ascii_digit() {
                    len += 1;
                }
            }
        }
    }

    let text = rest[..len].to_string();
    cur.advance_chunk(&text);
    Token::new(TokenKind::Number, text, start, cur.pos())
}

fn scan_string(cur: &mut Cursor) -> Result<Token, LexError> {
    let start = cur.pos();
    let quote = match cur.bump() {
        Some(q) => q,
        None => {
            return Err(LexError::UnterminatedString {
                line: start.line,
                column: start.column,
            })
        }
    };
    let mut text = String::new();
    text.push(quote);

    let triple = cur.peek() == Some(quote) && cur.peek_second() == Some(quote);
    if triple {
        text.push(quote);
        text.push(quote);
        cur.bump();
        cur.bump();
        loop {
            if cur.peek() == Some(quote) && cur.peek_second() == Some(quote) {
                // Need three in a row
                let mut chars = cur.rest.chars();
                chars.next();
                chars.next();
                if chars.next() == Some(quote) {
                    for _ in 0..3 {
                        text.push(quote);
                        cur.bump();
                    }
                    return Ok(Token::new(TokenKind::String, text, start, cur.pos()));
                }
            }
            match cur.bump() {
                Some('\\') => {
                    text.push('\\');
                    if let Some(escaped) = cur.bump() {
                        text.push(escaped);
                    }
                }
                Some(c) => text.push(c),
                None => {
                    return Err(LexError::UnterminatedString {
                        line: start.line,
                        column: start.column,
                    })
                }
            }
        }
    }

    loop {
        match cur.peek() {
            None | Some('\n') => {
                return Err(LexError::UnterminatedString {
                    line: start.line,
                    column: start.column,
                })
            }
            Some('\\') => {
                cur.bump();
                text.push('\\');
                if let Some(escaped) = cur.bump() {
                    text.push(escaped);
                }
            }
            Some(c) if c == quote => {
                cur.bump();
                text.push(c);
                return Ok(Token::new(TokenKind::String, text, start, cur.pos()));
            }
            Some(c) => {
                cur.bump();
                text.push(c);
            }
        }
    }
}
