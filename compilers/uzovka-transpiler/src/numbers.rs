use uzovka_protocol::{Token, TokenKind};

/// Merge `NUMBER , NUMBER` triples into a single decimal literal.
///
/// The scan does not recurse and never looks past the immediate triple:
/// in a chain like `1,2,3` only the first pair merges (`1.2`) and the
/// remaining comma falls through to the separator pass. This asymmetry is a
/// compatibility-preserving quirk of the dialect, not an oversight.
pub fn merge_decimals(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        if tok.kind == TokenKind::Number
            && i + 2 < tokens.len()
            && tokens[i + 1].is_operator(",")
            && tokens[i + 2].kind == TokenKind::Number
        {
            let text = format!("{}.{}", tok.text, tokens[i + 2].text);
            output.push(tok.spanning(&tokens[i + 2], TokenKind::Number, text));
            i += 3;
            continue;
        }
        output.push(tok.clone());
        i += 1;
    }
    output
}
