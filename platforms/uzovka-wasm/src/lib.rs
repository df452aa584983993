use serde::Serialize;
use uzovka_protocol::Lexicon;
use uzovka_transpiler::{KeywordTable, Transpiler};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response sent back to JavaScript
#[derive(Serialize)]
pub struct TranslationReport {
    pub code: String,
    pub warnings: Vec<WarningReport>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct WarningReport {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct UzovkaEngine {
    transpiler: Transpiler,
}

#[wasm_bindgen]
impl UzovkaEngine {
    /// Engine with the built-in Czech lexicon.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            transpiler: Transpiler::czech(),
        }
    }

    /// Engine with a compiled lexicon binary (loaded via fetch() in JS).
    /// The archive is validated before use; a corrupt buffer fails here
    /// rather than inside a later translation.
    pub fn with_lexicon(data: Vec<u8>) -> Result<UzovkaEngine, JsError> {
        let lexicon: Lexicon = rkyv::from_bytes(&data)
            .map_err(|e| JsError::new(&format!("poškozený slovník: {e}")))?;
        Ok(Self {
            transpiler: Transpiler::new(KeywordTable::from_lexicon(&lexicon)),
        })
    }

    /// The Main Loop: dialect text -> host text + diagnostics, as one JSON
    /// report. Translation failures come back in the report's `error` field
    /// instead of throwing, so the UI can render them inline.
    pub fn translate(&self, input: &str) -> JsValue {
        let report = match self.transpiler.transpile(input) {
            Ok(translation) => TranslationReport {
                code: translation.code,
                warnings: translation
                    .warnings
                    .iter()
                    .map(|w| WarningReport {
                        message: w.message.clone(),
                        line: w.line,
                        column: w.column,
                    })
                    .collect(),
                error: None,
            },
            Err(err) => TranslationReport {
                code: String::new(),
                warnings: Vec::new(),
                error: Some(err.to_string()),
            },
        };
        serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
    }
}

impl Default for UzovkaEngine {
    fn default() -> Self {
        Self::new()
    }
}
