use crate::core::tokenizer::IDENTIFIER_PATTERN;
use crate::domain::model::{Selection, BLANK_MARKER};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"));

/// Rewrites `source` with `____` at every selected occurrence.
///
/// One left-to-right pass over the original immutable string: every match
/// position comes from the same snapshot, so earlier substitutions can never
/// shift the offsets of later ones. Occurrences are counted per spelling
/// from zero with the same word-bounded pattern the tokenizer uses; only
/// flagged (keyword, index) pairs are replaced, every other byte — including
/// whitespace and unselected repeats of the same identifier — is copied
/// verbatim.
pub fn apply_blanks(source: &str, selections: &[Selection]) -> String {
    if selections.is_empty() {
        return source.to_string();
    }

    let targets: HashSet<(&str, usize)> = selections
        .iter()
        .map(|s| (s.keyword.as_str(), s.occurrence_index))
        .collect();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    for m in IDENT_RE.find_iter(source) {
        let word = m.as_str();
        let counter = seen.entry(word).or_insert(0);
        let index = *counter;
        *counter += 1;

        if targets.contains(&(word, index)) {
            output.push_str(&source[cursor..m.start()]);
            output.push_str(BLANK_MARKER);
            cursor = m.end();
        }
    }
    output.push_str(&source[cursor..]);
    output
}
