use uzovka_protocol::{RewriteFlags, Token, TokenKind};

use crate::table::KeywordTable;

/// Context-tracked longest-match keyword substitution over a token stream.
///
/// Consecutive Name tokens accumulate in a buffer; any non-Name token flushes
/// the buffer in original order. After each buffered Name, the table is
/// consulted for the longest dialect phrase matching the buffer's trailing
/// window, and the matched window collapses into a single replacement token
/// carrying the window's span. A collapsed token stays in the buffer, so
/// later windows see the replacement text, never the original words.
pub struct RewriteEngine<'t> {
    table: &'t KeywordTable,
}

impl<'t> RewriteEngine<'t> {
    pub fn new(table: &'t KeywordTable) -> Self {
        Self { table }
    }

    pub fn rewrite(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut buffer: Vec<Token> = Vec::new();
        let mut flags = RewriteFlags::empty();
        let mut paren_depth: i32 = 0;

        for tok in tokens {
            // Context tracking happens before any buffering or flushing
            if tok.kind == TokenKind::Name && self.table.is_def_head(&tok.text.to_lowercase()) {
                flags.insert(RewriteFlags::AFTER_DEF);
                flags.remove(RewriteFlags::IN_DEF_PARENS);
            }

            if tok.kind == TokenKind::Operator {
                match tok.text.as_str() {
                    "(" => {
                        if flags.contains(RewriteFlags::AFTER_DEF) {
                            flags.insert(RewriteFlags::IN_DEF_PARENS);
                        }
                        paren_depth += 1;
                        flags.remove(RewriteFlags::AFTER_DOT);
                    }
                    ")" => {
                        paren_depth -= 1;
                        if paren_depth == 0 && flags.contains(RewriteFlags::AFTER_DEF) {
                            flags.remove(RewriteFlags::IN_DEF_PARENS);
                            flags.remove(RewriteFlags::AFTER_DEF);
                        }
                        flags.remove(RewriteFlags::AFTER_DOT);
                    }
                    "." => {
                        flags.insert(RewriteFlags::AFTER_DOT);
                    }
                    // A bare comma keeps attribute context alive; any other
                    // operator breaks it
                    "," => {}
                    _ => {
                        flags.remove(RewriteFlags::AFTER_DOT);
                    }
                }
            }

            if tok.kind == TokenKind::Name {
                buffer.push(tok);

                let mut eligible = true;
                // Never substitute inside a definition's parameter list
                if flags.contains(RewriteFlags::IN_DEF_PARENS) {
                    eligible = false;
                }
                // A dot suppresses exactly one following Name
                if flags.contains(RewriteFlags::AFTER_DOT) {
                    eligible = false;
                    flags.remove(RewriteFlags::AFTER_DOT);
                }

                if eligible {
                    let lowered: Vec<String> =
                        buffer.iter().map(|t| t.text.to_lowercase()).collect();
                    // Ambiguous words stay identifiers regardless of context
                    if lowered
                        .last()
                        .is_some_and(|last| self.table.is_ambiguous(last))
                    {
                        continue;
                    }
                    if let Some((len, replacement)) = self.table.lookup(&lowered) {
                        let window_start = buffer.len() - len;
                        let collapsed = buffer[window_start].spanning(
                            &buffer[buffer.len() - 1],
                            TokenKind::Name,
                            replacement,
                        );
                        buffer.truncate(window_start);
                        buffer.push(collapsed);
                    }
                }
                continue;
            }

            // Any non-Name token flushes pending names before it is emitted
            output.append(&mut buffer);
            output.push(tok);
        }

        output.append(&mut buffer);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uzovka_lexer::tokenize;

    fn rewrite(table: &KeywordTable, source: &str) -> Vec<Token> {
        RewriteEngine::new(table).rewrite(tokenize(source).unwrap())
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.kind != TokenKind::End)
            .map(|t| t.text.as_str())
            .collect()
    }

    #[test]
    fn test_single_keyword() {
        let table = KeywordTable::czech();
        assert_eq!(texts(&rewrite(&table, "Pravda")), vec!["True"]);
    }

    #[test]
    fn test_multi_word_phrase_collapses_to_one_token() {
        let table = KeywordTable::czech();
        let tokens = rewrite(&table, "právě když X");
        assert_eq!(texts(&tokens), vec!["if", "X"]);
        // Collapsed token spans the whole phrase
        assert_eq!(tokens[0].start.column, 0);
        assert_eq!(tokens[0].end.column, 10);
    }

    #[test]
    fn test_single_word_alternative_for_if() {
        let table = KeywordTable::czech();
        assert_eq!(texts(&rewrite(&table, "když X")), vec!["if", "X"]);
        assert_eq!(texts(&rewrite(&table, "pokud X")), vec!["if", "X"]);
    }

    #[test]
    fn test_non_keywords_preserved() {
        let table = KeywordTable::czech();
        assert_eq!(
            texts(&rewrite(&table, "Proměnná = 5")),
            vec!["Proměnná", "=", "5"]
        );
    }

    #[test]
    fn test_attribute_after_dot_not_substituted() {
        let table = KeywordTable::czech();
        assert_eq!(
            texts(&rewrite(&table, "Objekt.Pravda")),
            vec!["Objekt", ".", "Pravda"]
        );
    }

    #[test]
    fn test_dot_suppression_consumed_once() {
        let table = KeywordTable::czech();
        // Only the Name directly after the dot is protected
        assert_eq!(
            texts(&rewrite(&table, "Objekt.Metoda\nPravda")),
            vec!["Objekt", ".", "Metoda", "\n", "True"]
        );
    }

    #[test]
    fn test_operator_breaks_attribute_context() {
        let table = KeywordTable::czech();
        // ">" clears the dot context before "Pravda" arrives
        assert_eq!(
            texts(&rewrite(&table, "Objekt. > Pravda")),
            vec!["Objekt", ".", ">", "True"]
        );
    }

    #[test]
    fn test_def_parameters_not_substituted() {
        let table = KeywordTable::czech();
        let tokens = rewrite(&table, "def Funkce(Pravda; Lež):\n    vrať Pravda");
        let strings = texts(&tokens);
        // Parameters keep their dialect spelling
        assert!(strings.contains(&"Pravda"));
        assert!(strings.contains(&"Lež"));
        // Body is substituted again once the parameter list closes
        assert!(strings.contains(&"return"));
        assert!(strings.contains(&"True"));
    }

    #[test]
    fn test_nested_parens_in_def_params() {
        let table = KeywordTable::czech();
        let tokens = rewrite(&table, "def F(A=(Pravda)):\n    vrať Nic");
        let strings = texts(&tokens);
        assert!(strings.contains(&"Pravda"));
        assert!(strings.contains(&"None"));
    }

    #[test]
    fn test_call_parens_do_substitute() {
        let table = KeywordTable::czech();
        // Only definition parameter lists are protected, not ordinary calls
        assert_eq!(
            texts(&rewrite(&table, "Funkce(Pravda)")),
            vec!["Funkce", "(", "True", ")"]
        );
    }

    #[test]
    fn test_ambiguous_word_never_substituted() {
        let table = KeywordTable::czech();
        assert_eq!(texts(&rewrite(&table, "a = 5")), vec!["a", "=", "5"]);
        assert_eq!(texts(&rewrite(&table, "A = 5")), vec!["A", "=", "5"]);
    }

    #[test]
    fn test_non_ambiguous_conjunction_substituted() {
        let table = KeywordTable::czech();
        assert_eq!(
            texts(&rewrite(&table, "Pravda nebo Lež")),
            vec!["True", "or", "False"]
        );
    }

    #[test]
    fn test_collapsed_token_does_not_retrigger() {
        let table = KeywordTable::czech();
        // "pravda" -> "True"; the collapsed "True" must not be treated as a
        // fresh dialect word by later windows
        assert_eq!(
            texts(&rewrite(&table, "pravda pravda")),
            vec!["True", "True"]
        );
    }

    #[test]
    fn test_flush_on_non_name_keeps_order() {
        let table = KeywordTable::czech();
        assert_eq!(
            texts(&rewrite(&table, "Jedna Dva + Tři")),
            vec!["Jedna", "Dva", "+", "Tři"]
        );
    }

    #[test]
    fn test_for_in_loop() {
        let table = KeywordTable::czech();
        assert_eq!(
            texts(&rewrite(&table, "pro I v Seznam:")),
            vec!["for", "I", "in", "Seznam", ":"]
        );
    }

    #[test]
    fn test_custom_table() {
        let lexicon = uzovka_protocol::Lexicon {
            version: 1,
            entries: vec![
                uzovka_protocol::LexiconEntry {
                    phrase: vec!["kdyztest".to_string()],
                    replacement: "if".to_string(),
                },
                uzovka_protocol::LexiconEntry {
                    phrase: vec!["vypis".to_string()],
                    replacement: "print".to_string(),
                },
            ],
            ambiguous: vec![],
        };
        let table = KeywordTable::from_lexicon(&lexicon);
        assert_eq!(
            texts(&rewrite(&table, "KdyzTest X > 0:")),
            vec!["if", "X", ">", "0", ":"]
        );
    }
}
