//! Writing match records to a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TenderError};
use crate::models::MatchRecord;

/// One exported match, numbered in result order.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow<'a> {
    pub seq: usize,
    pub section: &'a str,
    pub position: u32,
    pub keyword: &'a str,
    pub sentence: &'a str,
}

impl<'a> ExportRow<'a> {
    fn rows(records: &'a [MatchRecord]) -> impl Iterator<Item = Self> + 'a {
        records.iter().enumerate().map(|(i, r)| Self {
            seq: i + 1,
            section: &r.section,
            position: r.position,
            keyword: &r.keyword,
            sentence: &r.sentence,
        })
    }
}

/// Export file layout, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `.json`: one pretty-printed array.
    Json,
    /// `.jsonl`: one object per line.
    JsonLines,
}

impl ExportFormat {
    /// Detect the layout from the extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "jsonl" => Ok(Self::JsonLines),
            _ => Err(TenderError::UnsupportedExport {
                path: path.to_string_lossy().into(),
            }),
        }
    }
}

/// Write records to a `.json` or `.jsonl` file. Any other extension fails
/// before the file is created. Returns the number of rows written.
pub fn export_records(records: &[MatchRecord], path: &Path) -> Result<usize> {
    let format = ExportFormat::from_path(path)?;
    let mut out = BufWriter::new(File::create(path)?);

    if format == ExportFormat::JsonLines {
        for row in ExportRow::rows(records) {
            serde_json::to_writer(&mut out, &row)?;
            out.write_all(b"\n")?;
        }
    } else {
        let rows: Vec<ExportRow<'_>> = ExportRow::rows(records).collect();
        serde_json::to_writer_pretty(&mut out, &rows)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(rows = records.len(), path = %path.display(), "results exported");
    Ok(records.len())
}
