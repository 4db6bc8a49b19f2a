use rusqlite::types::Type;
use rusqlite::{params, ErrorCode};
use serde::Serialize;

use crate::error::{Result, TenderError};
use crate::models::{KeywordEntry, KeywordSet, RunSummary};

use super::Database;

const RUN_COLUMNS: &str = "id, project_name, file_path, file_hash, analyzed_at, keyword_stats, \
                           total_keywords, total_matches, file_type, file_size, status, notes";

impl Database {
    // ─── Keyword catalog ───

    /// Insert a keyword. Returns false if it already exists.
    pub fn add_keyword(&self, entry: &KeywordEntry) -> Result<bool> {
        let inserted = self.conn().execute(
            "INSERT OR IGNORE INTO keywords (keyword, category, description) VALUES (?1, ?2, ?3)",
            params![entry.keyword, entry.category, entry.description],
        )?;
        if inserted == 0 {
            tracing::warn!(keyword = %entry.keyword, "keyword already exists");
        }
        Ok(inserted > 0)
    }

    /// Insert several keywords in one transaction. Returns how many were new.
    pub fn add_keywords(&mut self, entries: &[KeywordEntry]) -> Result<usize> {
        let tx = self.conn_mut().transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO keywords (keyword, category, description) VALUES (?1, ?2, ?3)",
            )?;
            for entry in entries {
                added += stmt.execute(params![entry.keyword, entry.category, entry.description])?;
            }
        }
        tx.commit()?;
        Ok(added)
    }

    /// Rename a keyword and optionally replace its category/description.
    /// Returns false if `old` is not in the catalog.
    pub fn update_keyword(
        &self,
        old: &str,
        new: &str,
        category: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool> {
        let updated = self
            .conn()
            .execute(
                "UPDATE keywords
                 SET keyword = ?1,
                     category = COALESCE(?2, category),
                     description = COALESCE(?3, description),
                     updated_at = CURRENT_TIMESTAMP
                 WHERE keyword = ?4",
                params![new, category, description, old],
            )
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => TenderError::KeywordExists {
                    keyword: new.to_string(),
                },
                _ => TenderError::Database(e),
            })?;
        Ok(updated > 0)
    }

    /// Delete a keyword. Returns false if it was not in the catalog.
    pub fn delete_keyword(&self, keyword: &str) -> Result<bool> {
        let deleted = self
            .conn()
            .execute("DELETE FROM keywords WHERE keyword = ?1", params![keyword])?;
        Ok(deleted > 0)
    }

    /// Delete every keyword. Returns how many were removed.
    pub fn clear_keywords(&self) -> Result<usize> {
        Ok(self.conn().execute("DELETE FROM keywords", [])?)
    }

    /// All keywords, ordered by category then keyword.
    pub fn get_all_keywords(&self) -> Result<Vec<KeywordEntry>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, keyword, category, description, created_at, updated_at
             FROM keywords ORDER BY category, keyword",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(KeywordEntry {
                id: row.get(0)?,
                keyword: row.get(1)?,
                category: row.get(2)?,
                description: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;
        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    /// Snapshot the catalog as a keyword set.
    pub fn keyword_set(&self) -> Result<KeywordSet> {
        Ok(self
            .get_all_keywords()?
            .iter()
            .map(|e| e.keyword.as_str())
            .collect())
    }

    // ─── Run history ───

    /// Store a run summary. Returns the new row ID.
    pub fn insert_run(&self, run: &RunSummary) -> Result<i64> {
        let stats = serde_json::to_string(&run.keyword_stats)?;
        self.conn().execute(
            "INSERT INTO runs (project_name, file_path, file_hash, keyword_stats, total_keywords,
                               total_matches, file_type, file_size, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                run.project_name,
                run.file_path,
                run.file_hash,
                stats,
                run.total_keywords as i64,
                run.total_matches as i64,
                run.file_type,
                run.file_size as i64,
                run.status,
                run.notes,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Runs, newest first, optionally filtered by status.
    pub fn get_runs(&self, limit: usize, offset: usize, status: Option<&str>) -> Result<Vec<RunSummary>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {RUN_COLUMNS} FROM runs
             WHERE ?1 IS NULL OR status = ?1
             ORDER BY analyzed_at DESC, id DESC
             LIMIT ?2 OFFSET ?3"
        ))?;
        Self::map_runs(&mut stmt, params![status, limit as i64, offset as i64])
    }

    /// All runs, newest first.
    pub fn get_all_runs(&self) -> Result<Vec<RunSummary>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {RUN_COLUMNS} FROM runs ORDER BY analyzed_at DESC, id DESC"
        ))?;
        Self::map_runs(&mut stmt, [])
    }

    /// Runs whose project name or notes contain `term`.
    pub fn search_runs(&self, term: &str) -> Result<Vec<RunSummary>> {
        let pattern = format!("%{term}%");
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {RUN_COLUMNS} FROM runs
             WHERE project_name LIKE ?1 OR notes LIKE ?1
             ORDER BY analyzed_at DESC, id DESC"
        ))?;
        Self::map_runs(&mut stmt, params![pattern])
    }

    /// A single run by ID.
    pub fn get_run(&self, id: i64) -> Result<Option<RunSummary>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT {RUN_COLUMNS} FROM runs WHERE id = ?1"))?;
        let mut runs = Self::map_runs(&mut stmt, params![id])?;
        Ok(runs.pop())
    }

    fn map_runs(
        stmt: &mut rusqlite::Statement,
        params: impl rusqlite::Params,
    ) -> Result<Vec<RunSummary>> {
        let rows = stmt.query_map(params, |row| {
            let stats: String = row.get(5)?;
            let keyword_stats = serde_json::from_str(&stats)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
            Ok(RunSummary {
                id: row.get(0)?,
                project_name: row.get(1)?,
                file_path: row.get(2)?,
                file_hash: row.get(3)?,
                analyzed_at: row.get(4)?,
                keyword_stats,
                total_keywords: row.get::<_, i64>(6)? as u64,
                total_matches: row.get::<_, i64>(7)? as u64,
                file_type: row.get(8)?,
                file_size: row.get::<_, i64>(9)? as u64,
                status: row.get(10)?,
                notes: row.get(11)?,
            })
        })?;
        let mut runs = Vec::new();
        for r in rows {
            runs.push(r?);
        }
        Ok(runs)
    }

    // ─── Statistics ───

    /// Row counts for the catalog and history.
    pub fn stats(&self) -> Result<CatalogStats> {
        let keyword_count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM keywords", [], |r| r.get(0))?;
        let run_count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM runs", [], |r| r.get(0))?;
        Ok(CatalogStats {
            keyword_count: keyword_count as u64,
            run_count: run_count as u64,
        })
    }
}

/// Row counts for the catalog database.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    pub keyword_count: u64,
    pub run_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchRecord;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn entry(keyword: &str) -> KeywordEntry {
        KeywordEntry::new(keyword.into(), None, None)
    }

    fn sample_run(project: &str, keywords: &[&str]) -> RunSummary {
        let records: Vec<MatchRecord> = keywords
            .iter()
            .enumerate()
            .map(|(i, k)| MatchRecord::new(i as u32 + 1, "", format!("{k}。"), k))
            .collect();
        RunSummary::from_records(
            project.into(),
            format!("{project}.pdf"),
            "hash".into(),
            "pdf",
            1024,
            &records,
        )
    }

    #[test]
    fn add_keyword_rejects_duplicates() {
        let db = test_db();
        assert!(db.add_keyword(&entry("计算机")).unwrap());
        assert!(!db.add_keyword(&entry("计算机")).unwrap());
        assert_eq!(db.get_all_keywords().unwrap().len(), 1);
    }

    #[test]
    fn add_keywords_counts_new_only() {
        let mut db = test_db();
        db.add_keyword(&entry("a")).unwrap();
        let added = db
            .add_keywords(&[entry("a"), entry("b"), entry("c")])
            .unwrap();
        assert_eq!(added, 2);
    }

    #[test]
    fn keywords_ordered_by_category_then_keyword() {
        let db = test_db();
        db.add_keyword(&KeywordEntry::new("z".into(), Some("商务".into()), None))
            .unwrap();
        db.add_keyword(&KeywordEntry::new("b".into(), Some("技术".into()), None))
            .unwrap();
        db.add_keyword(&KeywordEntry::new("a".into(), Some("技术".into()), None))
            .unwrap();
        let words: Vec<String> = db
            .get_all_keywords()
            .unwrap()
            .into_iter()
            .map(|e| e.keyword)
            .collect();
        // 商 (U+5546) sorts before 技 (U+6280).
        assert_eq!(words, vec!["z", "a", "b"]);
    }

    #[test]
    fn update_keyword_renames_and_keeps_category() {
        let db = test_db();
        db.add_keyword(&KeywordEntry::new("旧".into(), Some("技术".into()), None))
            .unwrap();
        assert!(db.update_keyword("旧", "新", None, Some("说明")).unwrap());
        let all = db.get_all_keywords().unwrap();
        assert_eq!(all[0].keyword, "新");
        assert_eq!(all[0].category.as_deref(), Some("技术"));
        assert_eq!(all[0].description.as_deref(), Some("说明"));
        assert!(!db.update_keyword("不存在", "x", None, None).unwrap());
    }

    #[test]
    fn update_keyword_onto_existing_fails() {
        let db = test_db();
        db.add_keyword(&entry("a")).unwrap();
        db.add_keyword(&entry("b")).unwrap();
        let err = db.update_keyword("a", "b", None, None).unwrap_err();
        assert!(matches!(err, TenderError::KeywordExists { .. }));
    }

    #[test]
    fn delete_and_clear() {
        let db = test_db();
        for k in ["a", "b", "c"] {
            db.add_keyword(&entry(k)).unwrap();
        }
        assert!(db.delete_keyword("a").unwrap());
        assert!(!db.delete_keyword("a").unwrap());
        assert_eq!(db.clear_keywords().unwrap(), 2);
        assert!(db.keyword_set().unwrap().is_empty());
    }

    #[test]
    fn run_round_trip_preserves_stats() {
        let db = test_db();
        let id = db.insert_run(&sample_run("一标段", &["计算机", "计算机", "服务器"])).unwrap();
        let run = db.get_run(id).unwrap().unwrap();
        assert_eq!(run.project_name, "一标段");
        assert_eq!(run.total_matches, 3);
        assert_eq!(run.keyword_stats["计算机"], 2);
        assert!(run.analyzed_at.is_some());
        assert!(db.get_run(id + 100).unwrap().is_none());
    }

    #[test]
    fn runs_newest_first_with_paging_and_status() {
        let db = test_db();
        let first = db.insert_run(&sample_run("p1", &["a"])).unwrap();
        let second = db.insert_run(&sample_run("p2", &["b"])).unwrap();
        let runs = db.get_runs(10, 0, None).unwrap();
        assert_eq!(runs[0].id, second);
        assert_eq!(runs[1].id, first);
        assert_eq!(db.get_runs(1, 1, None).unwrap()[0].id, first);
        assert_eq!(db.get_runs(10, 0, Some("completed")).unwrap().len(), 2);
        assert!(db.get_runs(10, 0, Some("failed")).unwrap().is_empty());
    }

    #[test]
    fn search_runs_matches_project_or_notes() {
        let db = test_db();
        db.insert_run(&sample_run("市医院设备采购", &["a"])).unwrap();
        let mut noted = sample_run("其他", &["b"]);
        noted.notes = Some("医院二期".into());
        db.insert_run(&noted).unwrap();
        db.insert_run(&sample_run("学校", &["c"])).unwrap();
        assert_eq!(db.search_runs("医院").unwrap().len(), 2);
    }

    #[test]
    fn stats_counts_rows() {
        let db = test_db();
        db.add_keyword(&entry("a")).unwrap();
        db.insert_run(&sample_run("p", &["a"])).unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.keyword_count, 1);
        assert_eq!(stats.run_count, 1);
    }
}
