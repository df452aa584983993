use std::collections::HashSet;

use uzovka_protocol::{Lexicon, LexiconEntry};

/// The built-in Czech dialect table, in declaration order. Order is the
/// tiebreak between phrases of equal word length, so it is part of the data,
/// not an accident of iteration.
const CZECH_PAIRS: &[(&str, &str)] = &[
    ("právě když", "if"),
    ("když", "if"),
    ("pokud", "if"),
    ("jinkdyž", "elif"),
    ("jinak", "else"),
    ("pro", "for"),
    ("v", "in"),
    ("při", "while"),
    ("a", "and"),
    ("nebo", "or"),
    ("ne", "not"),
    ("je", "is"),
    ("pravda", "True"),
    ("lež", "False"),
    ("nic", "None"),
    ("vrať", "return"),
    ("vynes", "yield"),
    ("přejdi", "pass"),
    ("rozbít", "break"),
    ("pokračovat", "continue"),
    ("zkus", "try"),
    ("kromě", "except"),
    ("konečně", "finally"),
    ("povznes", "raise"),
    ("dovézt", "import"),
    ("od", "from"),
    ("jako", "as"),
    ("s", "with"),
    ("klasa", "class"),
    ("smaž", "del"),
    ("vytiskni", "print"),
    ("globální", "global"),
];

/// Short words that collide with ordinary variable names ("a" is both the
/// conjunction "and" and a classic loop variable).
const CZECH_AMBIGUOUS: &[&str] = &["a"];

/// The built-in Czech lexicon as plain data.
pub fn czech_lexicon() -> Lexicon {
    Lexicon {
        version: 1,
        entries: CZECH_PAIRS
            .iter()
            .map(|(phrase, replacement)| LexiconEntry {
                phrase: phrase.split_whitespace().map(str::to_string).collect(),
                replacement: (*replacement).to_string(),
            })
            .collect(),
        ambiguous: CZECH_AMBIGUOUS.iter().map(|w| (*w).to_string()).collect(),
    }
}

/// Keyword table indexed once at load time. Phrases are grouped by word
/// count, longest group first; declaration order is preserved within a group.
/// This keeps the "longest match, first-declared wins" semantics without
/// re-sorting the table for every candidate token.
pub struct KeywordTable {
    buckets: Vec<Bucket>,
    ambiguous: HashSet<String>,
    def_heads: HashSet<String>,
    head_words: HashSet<String>,
    values: HashSet<String>,
}

struct Bucket {
    word_count: usize,
    rules: Vec<Rule>,
}

struct Rule {
    words: Vec<String>,
    replacement: String,
}

impl KeywordTable {
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        // Normalize rows, skipping blanks the way the tabular loader does
        let mut rules: Vec<Rule> = Vec::new();
        for entry in &lexicon.entries {
            if entry.phrase.is_empty() || entry.replacement.is_empty() {
                continue;
            }
            let words: Vec<String> = entry
                .phrase
                .iter()
                .flat_map(|w| w.split_whitespace())
                .map(str::to_lowercase)
                .collect();
            if words.is_empty() {
                continue;
            }
            rules.push(Rule {
                words,
                replacement: entry.replacement.clone(),
            });
        }

        let mut head_words = HashSet::new();
        let mut def_heads = HashSet::new();
        let mut values = HashSet::new();
        for rule in &rules {
            head_words.insert(rule.words[0].clone());
            values.insert(rule.replacement.clone());
            if rule.replacement == "def" {
                def_heads.insert(rule.words[0].clone());
            }
        }
        // The dialect may leave the definition head untranslated; the literal
        // spelling is harmless even when the table does map it, because the
        // purity validator rejects such sources before rewriting.
        def_heads.insert("def".to_string());

        let mut lengths: Vec<usize> = rules.iter().map(|r| r.words.len()).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths.dedup();

        let mut buckets = Vec::with_capacity(lengths.len());
        for word_count in lengths {
            let mut in_bucket = Vec::new();
            for rule in &rules {
                if rule.words.len() == word_count {
                    in_bucket.push(Rule {
                        words: rule.words.clone(),
                        replacement: rule.replacement.clone(),
                    });
                }
            }
            buckets.push(Bucket {
                word_count,
                rules: in_bucket,
            });
        }

        Self {
            buckets,
            ambiguous: lexicon.ambiguous.iter().map(|w| w.to_lowercase()).collect(),
            def_heads,
            head_words,
            values,
        }
    }

    pub fn czech() -> Self {
        Self::from_lexicon(&czech_lexicon())
    }

    /// Longest-match lookup against the trailing window of `lowered`
    /// (lowercased buffer words, oldest first). Returns the matched window
    /// length and the replacement keyword.
    pub fn lookup(&self, lowered: &[String]) -> Option<(usize, &str)> {
        for bucket in &self.buckets {
            if bucket.word_count > lowered.len() {
                continue;
            }
            let window = &lowered[lowered.len() - bucket.word_count..];
            for rule in &bucket.rules {
                if rule.words == window {
                    return Some((bucket.word_count, &rule.replacement));
                }
            }
        }
        None
    }

    pub fn is_ambiguous(&self, word_lower: &str) -> bool {
        self.ambiguous.contains(word_lower)
    }

    pub fn is_def_head(&self, word_lower: &str) -> bool {
        self.def_heads.contains(word_lower)
    }

    /// First word of any dialect phrase (lowercase).
    pub fn is_head_word(&self, word_lower: &str) -> bool {
        self.head_words.contains(word_lower)
    }

    /// Host-keyword spelling present in the table's range (case-sensitive).
    pub fn is_value(&self, word: &str) -> bool {
        self.values.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowered(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_lowercase()).collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let table = KeywordTable::czech();
        // Trailing window "právě když" must match the two-word phrase,
        // not the one-word "když"
        let (len, replacement) = table.lookup(&lowered(&["X", "právě", "když"])).unwrap();
        assert_eq!(len, 2);
        assert_eq!(replacement, "if");
    }

    #[test]
    fn test_single_word_match_case_insensitive() {
        let table = KeywordTable::czech();
        let (len, replacement) = table.lookup(&lowered(&["Pravda"])).unwrap();
        assert_eq!(len, 1);
        assert_eq!(replacement, "True");
    }

    #[test]
    fn test_no_match() {
        let table = KeywordTable::czech();
        assert!(table.lookup(&lowered(&["proměnná"])).is_none());
    }

    #[test]
    fn test_equal_length_tie_resolved_by_declaration_order() {
        // Two distinct phrases normalizing to the same lowercase form:
        // the first-declared row wins.
        let lexicon = Lexicon {
            version: 1,
            entries: vec![
                LexiconEntry {
                    phrase: vec!["Slovo".to_string()],
                    replacement: "first".to_string(),
                },
                LexiconEntry {
                    phrase: vec!["slovo".to_string()],
                    replacement: "second".to_string(),
                },
            ],
            ambiguous: vec![],
        };
        let table = KeywordTable::from_lexicon(&lexicon);
        let (_, replacement) = table.lookup(&lowered(&["slovo"])).unwrap();
        assert_eq!(replacement, "first");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let lexicon = Lexicon {
            version: 1,
            entries: vec![
                LexiconEntry {
                    phrase: vec![],
                    replacement: "if".to_string(),
                },
                LexiconEntry {
                    phrase: vec!["slovo".to_string()],
                    replacement: String::new(),
                },
            ],
            ambiguous: vec![],
        };
        let table = KeywordTable::from_lexicon(&lexicon);
        assert!(table.lookup(&lowered(&["slovo"])).is_none());
        assert!(!table.is_value("if"));
    }

    #[test]
    fn test_phrase_with_internal_whitespace_splits() {
        // A tabular loader may deliver "právě když" as one cell
        let lexicon = Lexicon {
            version: 1,
            entries: vec![LexiconEntry {
                phrase: vec!["právě když".to_string()],
                replacement: "if".to_string(),
            }],
            ambiguous: vec![],
        };
        let table = KeywordTable::from_lexicon(&lexicon);
        let (len, _) = table.lookup(&lowered(&["právě", "když"])).unwrap();
        assert_eq!(len, 2);
    }

    #[test]
    fn test_ambiguous_and_head_words() {
        let table = KeywordTable::czech();
        assert!(table.is_ambiguous("a"));
        assert!(!table.is_ambiguous("nebo"));
        assert!(table.is_head_word("právě"));
        assert!(table.is_head_word("vytiskni"));
        assert!(table.is_value("print"));
        assert!(!table.is_value("vytiskni"));
    }

    #[test]
    fn test_def_head_includes_literal_def() {
        let table = KeywordTable::czech();
        assert!(table.is_def_head("def"));
    }
}
