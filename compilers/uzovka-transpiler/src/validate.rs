use uzovka_protocol::{Token, TokenKind};

use crate::table::KeywordTable;
use crate::{CapitalizationKind, TranspileError};

/// The host grammar's reserved words.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Recognized built-in identifiers, exempt from the capitalization rule.
pub const PYTHON_BUILTINS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "bytearray", "bytes", "callable", "chr",
    "classmethod", "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate", "eval",
    "exec", "filter", "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash",
    "help", "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len", "list",
    "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord", "pow",
    "print", "property", "range", "repr", "reversed", "round", "set", "setattr", "slice",
    "sorted", "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip",
    "ArithmeticError", "AttributeError", "BaseException", "Exception", "IndexError", "KeyError",
    "KeyboardInterrupt", "NameError", "NotImplementedError", "OSError", "OverflowError",
    "RuntimeError", "StopIteration", "TypeError", "ValueError", "ZeroDivisionError",
];

/// Whole-source scan enforcing the capitalization discipline on plain
/// assignment targets, plus the digit-glued-to-identifier guard. Reports the
/// first violation in source order; the caller re-runs after fixing to find
/// the next one.
pub fn validate_capitalization(
    tokens: &[Token],
    table: &KeywordTable,
) -> Result<(), TranspileError> {
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind == TokenKind::Name
            && tokens.get(i + 1).is_some_and(|t| t.is_operator("="))
            && !(i > 0 && tokens[i - 1].is_operator("."))
        {
            // Plain assignment target, not an attribute assignment
            let name = tok.text.as_str();
            let exempt = PYTHON_KEYWORDS.contains(&name)
                || PYTHON_BUILTINS.contains(&name)
                || table.is_head_word(&name.to_lowercase())
                || name.chars().next().is_some_and(char::is_uppercase);
            if !exempt {
                return Err(TranspileError::Capitalization {
                    kind: CapitalizationKind::LowercaseTarget,
                    name: tok.text.clone(),
                    line: tok.start.line,
                    column: tok.start.column,
                });
            }
        }

        if tok.kind == TokenKind::Number {
            if let Some(next) = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Name) {
                let recognized = table.is_head_word(&next.text.to_lowercase())
                    || PYTHON_KEYWORDS.contains(&next.text.as_str());
                if !recognized {
                    return Err(TranspileError::Capitalization {
                        kind: CapitalizationKind::DigitBeforeName,
                        name: next.text.clone(),
                        line: next.start.line,
                        column: next.start.column,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Whole-source scan rejecting host-keyword spellings used as identifiers.
/// Source text must be written entirely in the dialect; any Name matching a
/// value in the keyword table's range fails here before rewriting starts.
pub fn validate_dialect_purity(
    tokens: &[Token],
    table: &KeywordTable,
) -> Result<(), TranspileError> {
    for tok in tokens {
        if tok.kind == TokenKind::Name && table.is_value(&tok.text) {
            return Err(TranspileError::ForeignKeyword {
                word: tok.text.clone(),
                line: tok.start.line,
                column: tok.start.column,
            });
        }
    }
    Ok(())
}
