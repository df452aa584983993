use uzovka_protocol::{Diagnostic, Position, Token, TokenKind};

/// Reconstruct source text from a token sequence.
///
/// Tokens carry their original spans even after replacement, so inter-token
/// gaps are reproduced from position arithmetic: newline deficits become
/// explicit line continuations, column deficits become spaces. Replacements
/// longer or shorter than the original text therefore never shift the rest
/// of the line.
pub fn emit(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_line = 1u32;
    let mut prev_col = 0u32;

    for tok in tokens {
        if tok.kind == TokenKind::End {
            break;
        }
        let Position { line, column } = tok.start;
        if line > prev_line {
            // A line jump without a newline token was a backslash
            // continuation in the input
            for _ in 0..(line - prev_line) {
                out.push_str("\\\n");
            }
            prev_col = 0;
        }
        for _ in 0..column.saturating_sub(prev_col) {
            out.push(' ');
        }
        out.push_str(&tok.text);

        if tok.kind == TokenKind::Newline {
            prev_line = tok.start.line + 1;
            prev_col = 0;
        } else {
            prev_line = tok.end.line;
            prev_col = tok.end.column;
        }
    }
    out
}

/// Best-effort sanity check of the reconstructed output: the text must
/// re-tokenize cleanly and its brackets must balance. The rewriting passes
/// are local token-window transformations, so this cannot prove global
/// syntactic correctness; failures are downgraded to a warning and the
/// output is still returned.
pub fn well_formedness(code: &str) -> Option<Diagnostic> {
    let tokens = match uzovka_lexer::tokenize(code) {
        Ok(tokens) => tokens,
        Err(err) => {
            let (line, column) = err.position();
            return Some(Diagnostic::warning(
                format!("výstup nelze tokenizovat: {err}"),
                line,
                column,
            ));
        }
    };

    let mut stack: Vec<(char, Position)> = Vec::new();
    for tok in &tokens {
        if tok.kind != TokenKind::Operator {
            continue;
        }
        match tok.text.as_str() {
            "(" => stack.push(('(', tok.start)),
            "[" => stack.push(('[', tok.start)),
            "{" => stack.push(('{', tok.start)),
            ")" | "]" | "}" => {
                let expected = match tok.text.as_str() {
                    ")" => '(',
                    "]" => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => {
                        return Some(Diagnostic::warning(
                            format!("nespárovaná závorka '{}'", tok.text),
                            tok.start.line,
                            tok.start.column,
                        ));
                    }
                }
            }
            _ => {}
        }
    }
    if let Some((open, pos)) = stack.pop() {
        return Some(Diagnostic::warning(
            format!("neuzavřená závorka '{open}'"),
            pos.line,
            pos.column,
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use uzovka_lexer::tokenize;
    use uzovka_protocol::Severity;

    fn round_trip(source: &str) -> String {
        emit(&tokenize(source).unwrap())
    }

    #[test]
    fn test_round_trip_simple() {
        assert_eq!(round_trip("X = 5"), "X = 5");
    }

    #[test]
    fn test_round_trip_indentation() {
        let source = "když X > 0:\n    vytiskni(X)\n";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_round_trip_blank_lines() {
        let source = "A = 1\n\n\nB = 2\n";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_round_trip_comments() {
        let source = "# Komentář\nX = 5  # vysvětlení\n";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_round_trip_nested_structures() {
        let source = "Data = [[1, 2], [3, 4]]\n";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_replacement_keeps_following_gap() {
        // Replace "pravda" (6 chars) with "True" (4 chars); the original
        // single-space gap before "nebo" must survive
        let mut tokens = tokenize("pravda nebo X").unwrap();
        tokens[0] = tokens[0].with_text("True");
        assert_eq!(emit(&tokens), "True nebo X");
    }

    #[test]
    fn test_growing_replacement_keeps_gap() {
        let mut tokens = tokenize("s Otevři").unwrap();
        tokens[0] = tokens[0].with_text("with");
        assert_eq!(emit(&tokens), "with Otevři");
    }

    #[test]
    fn test_continuation_rematerialized() {
        let tokens = tokenize("X = \\\n    1\n").unwrap();
        assert_eq!(emit(&tokens), "X =\\\n    1\n");
    }

    #[test]
    fn test_well_formed_output_passes() {
        assert!(well_formedness("if X > 0:\n    print(X)\n").is_none());
    }

    #[test]
    fn test_unbalanced_bracket_warns() {
        let diag = well_formedness("print((X)\n").unwrap();
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.line, 1);
    }

    #[test]
    fn test_mismatched_bracket_warns() {
        let diag = well_formedness("X = [1, 2)\n").unwrap();
        assert_eq!(diag.severity, Severity::Warning);
    }

    #[test]
    fn test_untokenizable_output_warns() {
        let diag = well_formedness("X = \"neukončený\n").unwrap();
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.line, 1);
    }
}
