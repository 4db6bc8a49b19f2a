//! Text extraction: turn a PDF or DOCX file into ordered [`TextUnit`]s.

pub mod docx;
pub mod pdf;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, TenderError};
use crate::models::TextUnit;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

/// Trait for document text extractors.
pub trait Extractor {
    /// Format identifier (`pdf`, `docx`).
    fn format(&self) -> &'static str;

    /// Extract text units, in document order, from file contents already in
    /// memory. `path` only labels errors.
    fn extract_bytes(&self, path: &Path, bytes: &[u8]) -> Result<Vec<TextUnit>>;

    /// Read the file and extract its text units.
    fn extract(&self, path: &Path) -> Result<Vec<TextUnit>> {
        let bytes = std::fs::read(path).map_err(|e| TenderError::extraction(path, e))?;
        self.extract_bytes(path, &bytes)
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// All supported formats.
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Pdf, DocumentFormat::Docx];

    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(TenderError::UnsupportedFormat {
                path: path.to_string_lossy().into(),
            }),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// What `TextUnit::position` means for this format.
    #[must_use]
    pub fn position_kind(&self) -> &'static str {
        match self {
            Self::Pdf => "page",
            Self::Docx => "paragraph",
        }
    }

    #[must_use]
    pub fn extractor(&self) -> Box<dyn Extractor> {
        match self {
            Self::Pdf => Box::new(PdfExtractor::new()),
            Self::Docx => Box::new(DocxExtractor::new()),
        }
    }
}

/// A supported document read into memory once.
///
/// The same bytes feed extraction and the fingerprint stored in run history.
#[derive(Debug)]
pub struct SourceDocument<'a> {
    path: &'a Path,
    format: DocumentFormat,
    bytes: Vec<u8>,
}

impl<'a> SourceDocument<'a> {
    /// Check the format, then read the file. An unsupported extension fails
    /// without touching the file.
    pub fn read(path: &'a Path) -> Result<Self> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path).map_err(|e| TenderError::extraction(path, e))?;
        Ok(Self {
            path,
            format,
            bytes,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.path
    }

    #[must_use]
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// File size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercase hex SHA-256 of the file contents.
    #[must_use]
    pub fn sha256(&self) -> String {
        format!("{:x}", Sha256::digest(&self.bytes))
    }

    /// Extract text units in document order.
    pub fn units(&self) -> Result<Vec<TextUnit>> {
        let extractor = self.format.extractor();
        let units = extractor.extract_bytes(self.path, &self.bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            format = extractor.format(),
            bytes = self.bytes.len(),
            units = units.len(),
            "extracted text units"
        );
        Ok(units)
    }
}

/// Extract text units from a PDF or DOCX file.
pub fn extract(path: &Path) -> Result<Vec<TextUnit>> {
    SourceDocument::read(path)?.units()
}
