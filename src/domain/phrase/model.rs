/// One parsed input line: trimmed fields in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based physical line number in the input text
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Field at `index`, or "" when the row is shorter
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

/// One unit of work: synthesize `text` into the artifact named by `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub key: String,
    pub text: String,
    pub row: Row,
}

/// Why a row was dropped instead of becoming a task
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("missing output key")]
    MissingKey,
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("could not extract text from {0:?}")]
    EmptyExtraction(String),
    #[error("output key {0:?} is not a plain file name")]
    UnsafeKey(String),
    #[error("duplicate output key {0:?}")]
    DuplicateKey(String),
}
