use std::path::Path;

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, TenderError};
use crate::extract::{DocumentFormat, SourceDocument};
use crate::locate::analyze_source;
use crate::models::{MatchRecord, RunSummary};
use crate::operations::keywords::import_keywords;

/// Inputs for one document analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest<'a> {
    /// Document to analyze (.pdf or .docx).
    pub path: &'a Path,
    /// Ad hoc keywords for this run only.
    pub extra_keywords: &'a [String],
    /// Keyword file to import into the catalog before the run.
    pub keywords_file: Option<&'a Path>,
    /// Project name for the run history (defaults to the file stem).
    pub project: Option<&'a str>,
    /// Whether to append a run summary to the history.
    pub record_history: bool,
}

impl<'a> AnalyzeRequest<'a> {
    /// Catalog keywords only, no history.
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            extra_keywords: &[],
            keywords_file: None,
            project: None,
            record_history: false,
        }
    }
}

/// Result of analyzing one document.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub file: String,
    pub format: String,
    /// What `position` means for this format (`page` or `paragraph`).
    pub position_kind: String,
    /// Keywords searched, in search order.
    pub keywords: Vec<String>,
    pub matches: Vec<MatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<i64>,
}

/// Analyze a document against the catalog plus any ad hoc keywords.
///
/// The format is checked before anything else, so an unsupported file never
/// touches the catalog. The keyword set is a snapshot taken before extraction.
pub fn analyze(db: &mut Database, req: &AnalyzeRequest<'_>) -> Result<AnalysisReport> {
    let format = DocumentFormat::from_path(req.path)?;

    if let Some(file) = req.keywords_file {
        let imported = import_keywords(db, file)?;
        tracing::info!(added = imported.added, read = imported.read, "keywords imported");
    }

    let mut keywords = db.keyword_set()?;
    keywords.extend(req.extra_keywords);
    if keywords.is_empty() {
        return Err(TenderError::NoKeywords);
    }

    let doc = SourceDocument::read(req.path)?;
    let matches = analyze_source(&doc, &keywords)?;

    let run_id = if req.record_history {
        let summary = RunSummary::from_records(
            project_name(req),
            req.path.to_string_lossy().into(),
            doc.sha256(),
            format.as_str(),
            doc.size(),
            &matches,
        );
        Some(db.insert_run(&summary)?)
    } else {
        None
    };

    let report = AnalysisReport {
        file: req.path.to_string_lossy().into(),
        format: format.as_str().into(),
        position_kind: format.position_kind().into(),
        keywords: keywords.iter().map(String::from).collect(),
        matches,
        run_id,
    };
    Ok(report)
}

fn project_name(req: &AnalyzeRequest<'_>) -> String {
    match req.project {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => req
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
