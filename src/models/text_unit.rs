use serde::Serialize;

/// One extracted slice of a document: a PDF page or a DOCX paragraph/table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextUnit {
    /// 1-based page number (PDF) or running paragraph/row counter (DOCX).
    pub position: u32,
    /// Raw extracted text.
    pub content: String,
}

impl TextUnit {
    #[must_use]
    pub fn new(position: u32, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
        }
    }
}
