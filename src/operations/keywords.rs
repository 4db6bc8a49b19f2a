//! Keyword catalog operations.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, TenderError};
use crate::models::keyword::parse_keyword_file;
use crate::models::{clean_keyword, KeywordEntry};

/// Outcome of adding or removing keywords.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordChange {
    /// Keywords that changed the catalog.
    pub changed: Vec<String>,
    /// Keywords left alone (already present on add, absent on remove).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unchanged: Vec<String>,
}

/// Outcome of importing a keyword file.
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    /// Distinct keywords read from the file.
    pub read: usize,
    /// Keywords that were new to the catalog.
    pub added: usize,
}

/// Add keywords (cleaned; empties ignored) with an optional category and description.
pub fn add_keywords(
    db: &Database,
    raw: &[String],
    category: Option<&str>,
    description: Option<&str>,
) -> Result<KeywordChange> {
    let mut change = KeywordChange::default();
    for keyword in raw.iter().map(|k| clean_keyword(k)).filter(|k| !k.is_empty()) {
        let entry = KeywordEntry::new(
            keyword.clone(),
            category.map(String::from),
            description.map(String::from),
        );
        if db.add_keyword(&entry)? {
            change.changed.push(keyword);
        } else {
            change.unchanged.push(keyword);
        }
    }
    Ok(change)
}

/// Remove keywords from the catalog.
pub fn remove_keywords(db: &Database, raw: &[String]) -> Result<KeywordChange> {
    let mut change = KeywordChange::default();
    for keyword in raw.iter().map(|k| clean_keyword(k)).filter(|k| !k.is_empty()) {
        if db.delete_keyword(&keyword)? {
            change.changed.push(keyword);
        } else {
            change.unchanged.push(keyword);
        }
    }
    Ok(change)
}

/// Rename a keyword, optionally replacing its category and description.
pub fn update_keyword(
    db: &Database,
    old: &str,
    new: &str,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<KeywordEntry> {
    let old = clean_keyword(old);
    let new = clean_keyword(new);
    if new.is_empty() {
        return Err(TenderError::Other("new keyword is empty".into()));
    }
    if !db.update_keyword(&old, &new, category, description)? {
        return Err(TenderError::KeywordNotFound { keyword: old });
    }
    db.get_all_keywords()?
        .into_iter()
        .find(|e| e.keyword == new)
        .ok_or(TenderError::KeywordNotFound { keyword: new })
}

/// List the catalog.
pub fn list_keywords(db: &Database) -> Result<Vec<KeywordEntry>> {
    db.get_all_keywords()
}

/// Delete every keyword. Returns how many were removed.
pub fn clear_keywords(db: &Database) -> Result<usize> {
    let removed = db.clear_keywords()?;
    tracing::info!(removed, "keyword catalog cleared");
    Ok(removed)
}

/// Import a keyword file (see [`parse_keyword_file`] for the format).
pub fn import_keywords(db: &mut Database, path: &Path) -> Result<ImportResult> {
    let text = std::fs::read_to_string(path)?;
    let entries = parse_keyword_file(&text);
    let added = db.add_keywords(&entries)?;
    Ok(ImportResult {
        read: entries.len(),
        added,
    })
}

/// Write the catalog as `keyword<TAB>category<TAB>description` lines.
/// Returns the number of keywords written.
pub fn export_keywords(db: &Database, path: &Path) -> Result<usize> {
    let entries = db.get_all_keywords()?;
    let mut out = String::new();
    for e in &entries {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            e.keyword,
            e.category.as_deref().unwrap_or_default(),
            e.description.as_deref().unwrap_or_default()
        );
    }
    std::fs::write(path, out)?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn add_reports_new_and_existing() {
        let db = Database::open_in_memory().unwrap();
        add_keywords(&db, &strings(&["计算机"]), None, None).unwrap();
        let change =
            add_keywords(&db, &strings(&["\"计算机\"", "服务器", "  "]), Some("技术"), None)
                .unwrap();
        assert_eq!(change.changed, vec!["服务器"]);
        assert_eq!(change.unchanged, vec!["计算机"]);
    }

    #[test]
    fn remove_reports_missing() {
        let db = Database::open_in_memory().unwrap();
        add_keywords(&db, &strings(&["a", "b"]), None, None).unwrap();
        let change = remove_keywords(&db, &strings(&["a", "zz"])).unwrap();
        assert_eq!(change.changed, vec!["a"]);
        assert_eq!(change.unchanged, vec!["zz"]);
    }

    #[test]
    fn update_missing_keyword_errors() {
        let db = Database::open_in_memory().unwrap();
        let err = update_keyword(&db, "不存在", "新", None, None).unwrap_err();
        assert!(matches!(err, TenderError::KeywordNotFound { .. }));
    }

    #[test]
    fn update_returns_renamed_entry() {
        let db = Database::open_in_memory().unwrap();
        add_keywords(&db, &strings(&["旧词"]), Some("商务"), None).unwrap();
        let entry = update_keyword(&db, "旧词", " 新词 ", None, None).unwrap();
        assert_eq!(entry.keyword, "新词");
        assert_eq!(entry.category.as_deref(), Some("商务"));
    }

    #[test]
    fn export_then_import_round_trips_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("keywords.txt");

        let db = Database::open_in_memory().unwrap();
        add_keywords(&db, &strings(&["资质"]), Some("商务"), Some("营业执照")).unwrap();
        add_keywords(&db, &strings(&["内存"]), None, None).unwrap();
        assert_eq!(export_keywords(&db, &file).unwrap(), 2);

        let mut other = Database::open_in_memory().unwrap();
        let result = import_keywords(&mut other, &file).unwrap();
        assert_eq!(result.read, 2);
        assert_eq!(result.added, 2);
        let entries = list_keywords(&other).unwrap();
        let zizhi = entries.iter().find(|e| e.keyword == "资质").unwrap();
        assert_eq!(zizhi.category.as_deref(), Some("商务"));
        assert_eq!(zizhi.description.as_deref(), Some("营业执照"));
    }

    #[test]
    fn import_counts_only_new() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("kw.txt");
        std::fs::write(&file, "计算机，服务器\n交换机\n").unwrap();
        let mut db = Database::open_in_memory().unwrap();
        add_keywords(&db, &strings(&["计算机"]), None, None).unwrap();
        let result = import_keywords(&mut db, &file).unwrap();
        assert_eq!(result.read, 3);
        assert_eq!(result.added, 2);
        assert_eq!(clear_keywords(&db).unwrap(), 3);
    }
}
