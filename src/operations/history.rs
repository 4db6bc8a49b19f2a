//! Run history operations.

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, TenderError};
use crate::models::RunSummary;

/// A page of run summaries.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResult {
    pub count: usize,
    pub runs: Vec<RunSummary>,
}

impl From<Vec<RunSummary>> for HistoryResult {
    fn from(runs: Vec<RunSummary>) -> Self {
        Self {
            count: runs.len(),
            runs,
        }
    }
}

/// Runs, newest first.
pub fn list_runs(
    db: &Database,
    limit: usize,
    offset: usize,
    status: Option<&str>,
) -> Result<HistoryResult> {
    Ok(db.get_runs(limit, offset, status)?.into())
}

/// Runs whose project name or notes contain `term`.
pub fn search_runs(db: &Database, term: &str) -> Result<HistoryResult> {
    Ok(db.search_runs(term)?.into())
}

/// One run by ID.
pub fn show_run(db: &Database, id: i64) -> Result<RunSummary> {
    db.get_run(id)?.ok_or(TenderError::RunNotFound { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchRecord;

    fn insert(db: &Database, project: &str) -> i64 {
        let records = vec![MatchRecord::new(1, "", "计算机。".into(), "计算机")];
        let run = RunSummary::from_records(
            project.into(),
            "x.pdf".into(),
            "h".into(),
            "pdf",
            1,
            &records,
        );
        db.insert_run(&run).unwrap()
    }

    #[test]
    fn list_counts_runs() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "a");
        insert(&db, "b");
        let result = list_runs(&db, 1, 0, None).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.runs[0].project_name, "b");
    }

    #[test]
    fn show_missing_run_errors() {
        let db = Database::open_in_memory().unwrap();
        let id = insert(&db, "a");
        assert_eq!(show_run(&db, id).unwrap().project_name, "a");
        assert!(matches!(
            show_run(&db, 999),
            Err(TenderError::RunNotFound { id: 999 })
        ));
    }

    #[test]
    fn search_by_project_name() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "市政道路工程");
        insert(&db, "医院设备");
        assert_eq!(search_runs(&db, "道路").unwrap().count, 1);
    }
}
