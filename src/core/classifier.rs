use crate::core::tokenizer::index_occurrences;
use crate::domain::model::{Occurrence, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Priority tiers. Unclassified tokens are never selected.
pub const PRIORITY_DOMAIN: u8 = 3;
pub const PRIORITY_LANGUAGE: u8 = 2;
pub const PRIORITY_LOCAL: u8 = 1;
pub const PRIORITY_NONE: u8 = 0;

/// Ordered keyword tiers for the classifier. Injectable so tests can run
/// against minimal tables; `Default` carries the tables the quiz notebooks
/// are written against (LangGraph/LangChain API surface plus Python
/// statement keywords). No mutation after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTables {
    domain: HashSet<String>,
    language: HashSet<String>,
    stoplist: HashSet<String>,
}

impl KeywordTables {
    pub fn new<I, S>(domain: I, language: I, stoplist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            language: language.into_iter().map(Into::into).collect(),
            stoplist: stoplist.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_domain(&self, word: &str) -> bool {
        self.domain.contains(word)
    }

    pub fn is_language(&self, word: &str) -> bool {
        self.language.contains(word)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stoplist.contains(word)
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self::new(
            vec![
                "StateGraph",
                "END",
                "Interrupt",
                "MemorySaver",
                "add_node",
                "add_edge",
                "add_conditional_edges",
                "set_entry_point",
                "compile",
                "invoke",
                "get_state",
                "TypedDict",
                "Annotated",
                "HumanMessage",
                "AIMessage",
                "SystemMessage",
            ],
            vec![
                "def", "class", "return", "if", "else", "elif", "for", "while", "try",
                "except", "import", "from",
            ],
            vec![
                "os", "sys", "self", "cls", "print", "str", "int", "list", "dict",
                "True", "False", "None",
            ],
        )
    }
}

/// Identifiers worth blanking even without a keyword match: harvested from
/// the block itself, skipping short names, private names and stopwords.
fn harvest_local_set<'a>(tokens: &'a [Token], tables: &KeywordTables) -> HashSet<&'a str> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.text.as_str())
        .filter(|word| {
            word.len() > 2
                && !word.starts_with('_')
                && !tables.is_stopword(word)
        })
        .collect()
}

/// Per-block classifier: fixed tier tables plus the locally observed set.
pub struct Classifier<'a> {
    tables: &'a KeywordTables,
    local: HashSet<&'a str>,
}

impl<'a> Classifier<'a> {
    pub fn for_block(tables: &'a KeywordTables, tokens: &'a [Token]) -> Self {
        Self {
            tables,
            local: harvest_local_set(tokens, tables),
        }
    }

    /// Tier of a single word: domain > language > local > unclassified.
    pub fn classify(&self, word: &str) -> u8 {
        if self.tables.is_domain(word) {
            PRIORITY_DOMAIN
        } else if self.tables.is_language(word) {
            PRIORITY_LANGUAGE
        } else if self.local.contains(word) {
            PRIORITY_LOCAL
        } else {
            PRIORITY_NONE
        }
    }

    /// A dotted compound is promoted to domain tier when either side is a
    /// domain keyword. Heuristic kept from the generator this replaces;
    /// tunable, not a hard rule.
    pub fn classify_compound(&self, text: &str) -> u8 {
        if text.contains('.') && text.split('.').any(|part| self.tables.is_domain(part)) {
            return PRIORITY_DOMAIN;
        }
        self.classify(text)
    }
}

/// Classifies every identifier token of a block into an `Occurrence` row:
/// occurrence index, priority tier, and whether the token sits inside a
/// quoted string literal (preceded and followed by quote tokens). Quoted
/// tokens still consume an occurrence index so the masker's count agrees.
pub fn classify_block(tokens: &[Token], tables: &KeywordTables) -> Vec<Occurrence> {
    let classifier = Classifier::for_block(tables, tokens);
    let indices = index_occurrences(tokens);

    let mut occurrences = Vec::new();
    for (pos, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Identifier {
            continue;
        }

        let in_string = pos > 0
            && pos + 1 < tokens.len()
            && tokens[pos - 1].kind == TokenKind::Quote
            && tokens[pos + 1].kind == TokenKind::Quote;

        let priority = classify_with_dot_context(&classifier, tokens, pos);

        occurrences.push(Occurrence {
            text: token.text.clone(),
            occurrence_index: indices[pos],
            priority,
            in_string,
        });
    }
    occurrences
}

/// An identifier touching a `.` token forms a compound with the identifier
/// on the other side of the dot; the compound classification wins when it
/// promotes the token to domain tier.
fn classify_with_dot_context(classifier: &Classifier<'_>, tokens: &[Token], pos: usize) -> u8 {
    let own = classifier.classify(&tokens[pos].text);

    let left = dotted_neighbor(tokens, pos, true);
    let right = dotted_neighbor(tokens, pos, false);

    for neighbor in [left, right].into_iter().flatten() {
        let compound = format!("{}.{}", tokens[pos.min(neighbor)].text, tokens[pos.max(neighbor)].text);
        if classifier.classify_compound(&compound) == PRIORITY_DOMAIN {
            return PRIORITY_DOMAIN;
        }
    }
    own
}

/// Position of the identifier joined to `pos` through an adjacent `.`
/// token, if any. Adjacency is byte-exact so `a . b` with spaces does not
/// form a compound.
fn dotted_neighbor(tokens: &[Token], pos: usize, left: bool) -> Option<usize> {
    let (dot, ident) = if left {
        (pos.checked_sub(1)?, pos.checked_sub(2)?)
    } else {
        (pos + 1, pos + 2)
    };
    let dot_tok = tokens.get(dot)?;
    let ident_tok = tokens.get(ident)?;
    let own = &tokens[pos];

    if dot_tok.text != "." || ident_tok.kind != TokenKind::Identifier {
        return None;
    }
    let contiguous = if left {
        ident_tok.end == dot_tok.start && dot_tok.end == own.start
    } else {
        own.end == dot_tok.start && dot_tok.end == ident_tok.start
    };
    contiguous.then_some(ident)
}
