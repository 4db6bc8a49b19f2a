use std::collections::HashSet;

use crate::locate::section::SectionState;
use crate::locate::sentence::SentenceLocator;
use crate::models::{KeywordSet, MatchRecord, TextUnit};

/// Accumulates match records, dropping repeated (position, sentence) pairs.
#[derive(Debug, Default)]
pub struct ResultAssembler {
    records: Vec<MatchRecord>,
    seen: HashSet<(u32, String)>,
}

impl ResultAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record unless one with the same position and sentence exists.
    /// Returns the new record, or `None` when it was suppressed.
    pub fn assemble(
        &mut self,
        position: u32,
        section: &str,
        sentence: String,
        keyword: &str,
    ) -> Option<&MatchRecord> {
        if !self.seen.insert((position, sentence.clone())) {
            return None;
        }
        self.records
            .push(MatchRecord::new(position, section, sentence, keyword));
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }
}

/// Find every keyword sentence across `units`.
///
/// Units are scanned in order; within a unit, keywords in set order; within a
/// keyword, occurrences in text order. A unit or a located sentence that opens
/// with a section number updates the section carried by later records.
#[must_use]
pub fn find_relevant_paragraphs(units: &[TextUnit], keywords: &KeywordSet) -> Vec<MatchRecord> {
    let mut section = SectionState::new();
    let mut assembler = ResultAssembler::new();

    for unit in units {
        section.observe(&unit.content);
        let locator = SentenceLocator::new(&unit.content);

        for keyword in keywords.iter() {
            for located in locator.locate(keyword) {
                section.observe(&located.sentence);
                if assembler
                    .assemble(unit.position, section.current(), located.sentence, keyword)
                    .is_none()
                {
                    tracing::trace!(position = unit.position, keyword, "duplicate sentence skipped");
                }
            }
        }
    }

    assembler.into_records()
}
