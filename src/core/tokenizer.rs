use crate::domain::model::{Token, TokenKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Word-bounded ASCII identifier. The masker scans with the same pattern, so
/// both passes see an identical occurrence sequence for any spelling.
pub const IDENTIFIER_PATTERN: &str = r"\b[A-Za-z_][A-Za-z0-9_]*\b";

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b[A-Za-z_][A-Za-z0-9_]*\b|[.,()\[\]{}:=+\-*/%"']"#)
        .expect("token pattern is valid")
});

/// Splits text into identifier, punctuation and quote tokens with byte
/// offsets. Characters matching neither class are skipped; the tokenizer
/// only finds candidates, reconstruction happens against the original
/// string in the masker. Works on a single line or a whole code block.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let kind = match m.as_str() {
                "\"" | "'" => TokenKind::Quote,
                s if s
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_') =>
                {
                    TokenKind::Identifier
                }
                _ => TokenKind::Punctuation,
            };
            Token {
                text: m.as_str().to_string(),
                kind,
                start: m.start(),
                end: m.end(),
            }
        })
        .collect()
}

/// Occurrence index per identifier token: the count of prior same-text
/// identifier tokens in the same scan. Computed once per block so the
/// classifier and masker never drift apart. Non-identifier tokens get 0.
pub fn index_occurrences(tokens: &[Token]) -> Vec<usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    tokens
        .iter()
        .map(|token| {
            if token.kind == TokenKind::Identifier {
                let counter = seen.entry(token.text.as_str()).or_insert(0);
                let index = *counter;
                *counter += 1;
                index
            } else {
                0
            }
        })
        .collect()
}
