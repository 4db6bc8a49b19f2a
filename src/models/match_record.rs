use serde::{Deserialize, Serialize};

/// A keyword occurrence reported with its enclosing sentence and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Position of the unit the sentence came from (page or paragraph counter).
    pub position: u32,
    /// Most recent section tag seen before this match; empty if none yet.
    pub section: String,
    /// The enclosing sentence, original casing preserved.
    pub sentence: String,
    /// The keyword that produced this record.
    pub keyword: String,
    /// Length of `sentence` in characters.
    pub original_length: usize,
}

impl MatchRecord {
    #[must_use]
    pub fn new(position: u32, section: &str, sentence: String, keyword: &str) -> Self {
        let original_length = sentence.chars().count();
        Self {
            position,
            section: section.to_string(),
            sentence,
            keyword: keyword.to_string(),
            original_length,
        }
    }
}
