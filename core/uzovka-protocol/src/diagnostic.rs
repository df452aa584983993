use alloc::string::String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Non-fatal; the translation output is still returned.
    Warning,
    Error,
}

/// A positioned report produced by the validators or by the post-rewrite
/// well-formedness check. Carries no control-flow meaning beyond its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl Diagnostic {
    pub fn warning(message: String, line: u32, column: u32) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            line,
            column,
        }
    }
}
