use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::match_record::MatchRecord;

/// Status recorded for a completed analysis.
pub const STATUS_COMPLETED: &str = "completed";

/// A stored summary of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Database row ID (0 if not yet persisted).
    pub id: i64,
    pub project_name: String,
    pub file_path: String,
    /// SHA-256 of the analyzed file.
    pub file_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
    /// Matches per keyword. Keywords without matches are absent.
    pub keyword_stats: BTreeMap<String, u64>,
    /// Number of distinct keywords that matched.
    pub total_keywords: u64,
    pub total_matches: u64,
    pub file_type: String,
    pub file_size: u64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RunSummary {
    /// Summarize the records of a finished run.
    #[must_use]
    pub fn from_records(
        project_name: String,
        file_path: String,
        file_hash: String,
        file_type: &str,
        file_size: u64,
        records: &[MatchRecord],
    ) -> Self {
        let keyword_stats = keyword_counts(records);
        Self {
            id: 0,
            project_name,
            file_path,
            file_hash,
            analyzed_at: None,
            total_keywords: keyword_stats.len() as u64,
            total_matches: records.len() as u64,
            keyword_stats,
            file_type: file_type.to_string(),
            file_size,
            status: STATUS_COMPLETED.to_string(),
            notes: None,
        }
    }
}

/// Count records per keyword.
#[must_use]
pub fn keyword_counts(records: &[MatchRecord]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.keyword.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_records_counts_per_keyword() {
        let records = vec![
            MatchRecord::new(1, "", "a server.".into(), "server"),
            MatchRecord::new(2, "", "another server.".into(), "server"),
            MatchRecord::new(2, "", "a switch.".into(), "switch"),
        ];
        let run = RunSummary::from_records(
            "demo".into(),
            "demo.pdf".into(),
            "abc".into(),
            "pdf",
            10,
            &records,
        );
        assert_eq!(run.total_matches, 3);
        assert_eq!(run.total_keywords, 2);
        assert_eq!(run.keyword_stats["server"], 2);
        assert_eq!(run.status, STATUS_COMPLETED);
    }
}
