use crate::config::TokenizerRule;
use crate::types::Token;

/// Split `text` into tokens according to `rule`.
///
/// - `Whitespace`: lowercase, split on Unicode whitespace, drop empties.
/// - `Words`: lowercase, split on chars that are neither alphanumeric nor `'`,
///   trim surrounding `'`, drop empties.
pub fn tokenize(rule: TokenizerRule, text: &str) -> Vec<Token> {
    let lowered = text.to_lowercase();
    match rule {
        TokenizerRule::Whitespace => lowered.split_whitespace().map(str::to_string).collect(),
        TokenizerRule::Words => lowered
            .split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
            .map(|piece| piece.trim_matches('\''))
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
