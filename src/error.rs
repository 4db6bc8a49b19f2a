use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenderError {
    #[error("unsupported file format: {path} (only .pdf and .docx are supported)")]
    UnsupportedFormat { path: String },

    #[error("extraction failed for {path}: {detail}")]
    Extraction { path: String, detail: String },

    #[error("unsupported export format: {path} (use .json or .jsonl)")]
    UnsupportedExport { path: String },

    #[error("no keywords available: add keywords before analyzing a document")]
    NoKeywords,

    #[error("keyword not found: {keyword}")]
    KeywordNotFound { keyword: String },

    #[error("keyword already exists: {keyword}")]
    KeywordExists { keyword: String },

    #[error("run not found: {id}")]
    RunNotFound { id: i64 },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl TenderError {
    /// Build an extraction error for `path`.
    pub fn extraction(path: &std::path::Path, detail: impl std::fmt::Display) -> Self {
        Self::Extraction {
            path: path.to_string_lossy().into(),
            detail: detail.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TenderError>;
