use serde::{Deserialize, Serialize};

/// Literal placeholder substituted for every masked identifier occurrence.
pub const BLANK_MARKER: &str = "____";

/// A notebook document: an ordered list of cells plus whatever top-level
/// fields the file carries (`nbformat`, `metadata`, ...). The extra fields
/// are passed through untouched so a round trip preserves document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single notebook cell. `source` is the ordered line list; each line is
/// normally newline-terminated except possibly the last. `extra` carries
/// `metadata`, `outputs`, `execution_count` and friends unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,

    #[serde(default)]
    pub source: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }

    pub fn is_markdown(&self) -> bool {
        self.cell_type == "markdown"
    }

    /// Full cell text: the concatenation of its source lines.
    pub fn text(&self) -> String {
        self.source.concat()
    }

    pub fn first_line(&self) -> Option<&str> {
        self.source.first().map(|s| s.as_str())
    }
}

/// One difficulty tier: a label plus the target blank count for every answer
/// cell generated under that tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub name: String,
    pub blanks: usize,
}

impl DifficultyLevel {
    pub fn new(name: impl Into<String>, blanks: usize) -> Self {
        Self {
            name: name.into(),
            blanks,
        }
    }

    /// easy=5, normal=10, hard=20.
    pub fn default_levels() -> Vec<DifficultyLevel> {
        vec![
            DifficultyLevel::new("easy", 5),
            DifficultyLevel::new("normal", 10),
            DifficultyLevel::new("hard", 20),
        ]
    }
}

/// Marker prefixes locating problem statements and their answer cells.
/// A problem is a markdown cell whose first line starts with
/// `problem_prefix` followed by a 3-digit zero-padded number; its answer
/// cells are the code cells whose first line starts with `answer_prefix`
/// plus the same number (optionally followed by a free-text label such as
/// `- construction`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub problem_prefix: String,
    pub answer_prefix: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            problem_prefix: "### ■ Problem".to_string(),
            answer_prefix: "# Answer".to_string(),
        }
    }
}

/// A problem region derived from a document scan. `number` is the
/// zero-padded 3-digit identifier; `answer_indices` are the positions of the
/// owned answer cells, in document order. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRegion {
    pub number: String,
    pub problem_index: usize,
    pub answer_indices: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Punctuation,
    Quote,
}

/// An atomic token with byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

/// A classified identifier occurrence. `occurrence_index` is the zero-based
/// ordinal of this spelling within the block scan, counting every identifier
/// token including quoted ones so the masker's independent count agrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub text: String,
    pub occurrence_index: usize,
    pub priority: u8,
    pub in_string: bool,
}

/// One chosen blank: a unique (keyword, occurrence-index) pair addressing a
/// single instance among repeats of the same spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub keyword: String,
    pub occurrence_index: usize,
}
