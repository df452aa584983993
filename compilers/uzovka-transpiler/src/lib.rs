pub mod emit;
pub mod numbers;
pub mod rewrite;
pub mod separators;
pub mod table;
pub mod validate;

use uzovka_lexer::{normalize_source, tokenize, LexError};
use uzovka_protocol::Diagnostic;

pub use rewrite::RewriteEngine;
pub use table::{czech_lexicon, KeywordTable};

/// Which capitalization rule was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalizationKind {
    /// Plain assignment target does not start with an uppercase letter.
    LowercaseTarget,
    /// A number is glued to an identifier that is not a recognized keyword.
    DigitBeforeName,
}

/// Fatal translation failures. Validators abort before any rewriting; the
/// tokenizer's errors propagate unmodified. The post-rewrite well-formedness
/// check is deliberately absent here: it only ever produces warnings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranspileError {
    #[error(transparent)]
    Tokenization(#[from] LexError),

    #[error("proměnná '{name}' na řádku {line}, sloupci {column} musí začínat velkým písmenem")]
    Capitalization {
        kind: CapitalizationKind,
        name: String,
        line: u32,
        column: u32,
    },

    #[error("nalezeno cizí klíčové slovo '{word}' na řádku {line}, sloupci {column}; zdrojový kód musí být celý v nářečí")]
    ForeignKeyword { word: String, line: u32, column: u32 },
}

/// A completed translation: the host-language source text plus any
/// non-fatal diagnostics gathered after rewriting.
#[derive(Debug, Clone)]
pub struct Translation {
    pub code: String,
    pub warnings: Vec<Diagnostic>,
}

/// The whole pipeline behind one handle. The keyword table is injected at
/// construction and read-only afterwards, so a `Transpiler` is freely
/// shareable across threads and every translation is a pure function of
/// (source text, table).
pub struct Transpiler {
    table: KeywordTable,
}

impl Transpiler {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Transpiler preloaded with the built-in Czech lexicon.
    pub fn czech() -> Self {
        Self::new(KeywordTable::czech())
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Translate dialect source to host source.
    ///
    /// Pass order is contractual: validators see the pre-rewrite stream and
    /// abort on the first violation; decimal merging runs before separator
    /// rewriting so a comma consumed as a decimal point is never reprocessed.
    pub fn transpile(&self, source: &str) -> Result<Translation, TranspileError> {
        let normalized = normalize_source(source);
        let tokens = tokenize(&normalized)?;

        validate::validate_capitalization(&tokens, &self.table)?;
        validate::validate_dialect_purity(&tokens, &self.table)?;

        let tokens = RewriteEngine::new(&self.table).rewrite(tokens);
        let tokens = numbers::merge_decimals(tokens);
        let tokens = separators::replace_separators(tokens);

        let code = emit::emit(&tokens);
        let warnings = emit::well_formedness(&code).into_iter().collect();
        Ok(Translation { code, warnings })
    }
}
