//! Keyword location: section tagging, sentence extraction, deduplication and
//! result assembly over extracted text units.

pub mod assembler;
pub mod highlight;
pub mod section;
pub mod sentence;

use std::path::Path;

use crate::error::Result;
use crate::extract::SourceDocument;
use crate::models::{KeywordSet, MatchRecord};

pub use assembler::{find_relevant_paragraphs, ResultAssembler};
pub use highlight::{highlight, Highlighter};
pub use section::{extract_section_number, SectionState};
pub use sentence::{locate, LocatedSentence, SentenceLocator};

/// Extract `path` and report every keyword sentence in it.
///
/// The document is processed as a whole: on any extraction failure an error
/// is returned and no records are. An empty keyword set yields no records;
/// callers are expected to reject it before calling.
pub fn analyze_document(path: &Path, keywords: &KeywordSet) -> Result<Vec<MatchRecord>> {
    analyze_source(&SourceDocument::read(path)?, keywords)
}

/// Report every keyword sentence in a document already read into memory.
pub fn analyze_source(doc: &SourceDocument<'_>, keywords: &KeywordSet) -> Result<Vec<MatchRecord>> {
    let units = doc.units()?;
    let records = find_relevant_paragraphs(&units, keywords);
    tracing::info!(
        path = %doc.path().display(),
        units = units.len(),
        keywords = keywords.len(),
        matches = records.len(),
        "document analyzed"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TenderError;

    #[test]
    fn txt_is_rejected() {
        let tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        std::fs::write(tmp.path(), "计算机").unwrap();
        let keywords: KeywordSet = ["计算机"].into_iter().collect();
        let err = analyze_document(tmp.path(), &keywords).unwrap_err();
        assert!(matches!(err, TenderError::UnsupportedFormat { .. }));
    }
}
