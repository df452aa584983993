use uzovka_protocol::Token;

/// Rewrite every `;` operator to the host separator `,`, unconditionally.
/// Runs strictly after decimal merging so commas produced there are never
/// reprocessed and semicolons consumed as separators never masquerade as
/// decimal points.
pub fn replace_separators(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|tok| {
            if tok.is_operator(";") {
                tok.with_text(",")
            } else {
                tok
            }
        })
        .collect()
}
