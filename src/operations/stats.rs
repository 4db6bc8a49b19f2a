//! Catalog and history statistics.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::models::RunSummary;

/// Aggregate statistics. Project figures use only the latest run per project.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    pub total_keywords: u64,
    pub total_runs: u64,
    pub total_projects: usize,
    pub total_matches: u64,
    /// Mean distinct matched keywords per project.
    pub avg_keywords_per_project: f64,
    /// Sorted by occurrences, highest first.
    pub projects: Vec<ProjectStats>,
    /// Sorted by usage, highest first.
    pub keywords: Vec<KeywordUsage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
    pub keywords_found: u64,
    pub total_matches: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordUsage {
    pub keyword: String,
    /// Occurrences across the latest runs.
    pub usage_count: u64,
    /// Projects whose latest run matched the keyword.
    pub project_count: u64,
}

/// Compute statistics over the catalog and run history.
pub fn get_stats(db: &Database) -> Result<StatsResult> {
    let counts = db.stats()?;
    let latest = latest_per_project(db.get_all_runs()?);

    let mut projects: Vec<ProjectStats> = latest
        .iter()
        .map(|run| ProjectStats {
            project_name: run.project_name.clone(),
            analyzed_at: run.analyzed_at.clone(),
            keywords_found: run.total_keywords,
            total_matches: run.total_matches,
        })
        .collect();
    projects.sort_by(|a, b| {
        b.total_matches
            .cmp(&a.total_matches)
            .then_with(|| a.project_name.cmp(&b.project_name))
    });

    let mut usage: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for run in &latest {
        for (keyword, count) in &run.keyword_stats {
            let entry = usage.entry(keyword.as_str()).or_default();
            entry.0 += count;
            entry.1 += 1;
        }
    }
    let mut keywords: Vec<KeywordUsage> = usage
        .into_iter()
        .map(|(keyword, (usage_count, project_count))| KeywordUsage {
            keyword: keyword.to_string(),
            usage_count,
            project_count,
        })
        .collect();
    keywords.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

    let total_matches = projects.iter().map(|p| p.total_matches).sum();
    let found: u64 = projects.iter().map(|p| p.keywords_found).sum();
    let avg_keywords_per_project = if projects.is_empty() {
        0.0
    } else {
        found as f64 / projects.len() as f64
    };

    Ok(StatsResult {
        total_keywords: counts.keyword_count,
        total_runs: counts.run_count,
        total_projects: projects.len(),
        total_matches,
        avg_keywords_per_project,
        projects,
        keywords,
    })
}

/// Keep the first run seen per project. Input is newest first.
fn latest_per_project(runs: Vec<RunSummary>) -> Vec<RunSummary> {
    let mut seen = HashSet::new();
    runs.into_iter()
        .filter(|run| seen.insert(run.project_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchRecord;

    fn record(keyword: &str) -> MatchRecord {
        MatchRecord::new(1, "", format!("{keyword}。"), keyword)
    }

    fn insert(db: &Database, project: &str, records: &[MatchRecord]) {
        let run = RunSummary::from_records(
            project.into(),
            format!("{project}.pdf"),
            "h".into(),
            "pdf",
            1,
            records,
        );
        db.insert_run(&run).unwrap();
    }

    #[test]
    fn empty_history() {
        let db = Database::open_in_memory().unwrap();
        let stats = get_stats(&db).unwrap();
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.total_matches, 0);
        assert!(stats.avg_keywords_per_project.abs() < f64::EPSILON);
    }

    #[test]
    fn only_latest_run_per_project_counts() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "甲", &[record("计算机"), record("计算机"), record("服务器")]);
        insert(&db, "乙", &[record("计算机")]);
        // Re-analysis of 甲 replaces its earlier figures.
        insert(&db, "甲", &[record("服务器")]);

        let stats = get_stats(&db).unwrap();
        assert_eq!(stats.total_runs, 3);
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_matches, 2);
        assert!((stats.avg_keywords_per_project - 1.0).abs() < f64::EPSILON);

        let server = stats.keywords.iter().find(|k| k.keyword == "服务器").unwrap();
        assert_eq!(server.usage_count, 1);
        assert_eq!(server.project_count, 1);
        let computer = stats.keywords.iter().find(|k| k.keyword == "计算机").unwrap();
        assert_eq!(computer.usage_count, 1);
    }

    #[test]
    fn projects_sorted_by_occurrences() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "小", &[record("a")]);
        insert(&db, "大", &[record("a"), record("b"), record("c")]);
        let stats = get_stats(&db).unwrap();
        assert_eq!(stats.projects[0].project_name, "大");
        assert_eq!(stats.projects[0].keywords_found, 3);
        assert_eq!(stats.keywords[0].keyword, "a");
        assert_eq!(stats.keywords[0].project_count, 2);
    }
}
