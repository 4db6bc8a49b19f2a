use std::path::Path;

use crate::error::{Result, TenderError};
use crate::extract::Extractor;
use crate::models::TextUnit;

/// Page-based PDF text extractor.
pub struct PdfExtractor;

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build units from per-page text. Blank pages are skipped but still
    /// consume a page number.
    #[must_use]
    pub fn units_from_pages(pages: Vec<String>) -> Vec<TextUnit> {
        pages
            .into_iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| TextUnit::new(i as u32 + 1, text))
            .collect()
    }
}

impl Extractor for PdfExtractor {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn extract_bytes(&self, path: &Path, bytes: &[u8]) -> Result<Vec<TextUnit>> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| TenderError::extraction(path, format!("PDF extraction error: {e}")))?;
        Ok(Self::units_from_pages(pages))
    }
}
