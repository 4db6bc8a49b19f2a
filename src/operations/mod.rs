//! Operations behind the CLI commands.
//!
//! Each takes the catalog database and plain arguments and returns a
//! serializable result, so the CLI only parses arguments and prints.

pub mod analyze;
pub mod export;
pub mod history;
pub mod keywords;
pub mod stats;
pub mod supported;

pub use analyze::{analyze, AnalysisReport, AnalyzeRequest};
pub use export::{export_records, ExportFormat, ExportRow};
pub use history::{list_runs, search_runs, show_run, HistoryResult};
pub use keywords::{
    add_keywords, clear_keywords, export_keywords, import_keywords, list_keywords,
    remove_keywords, update_keyword, ImportResult, KeywordChange,
};
pub use stats::{get_stats, StatsResult};
pub use supported::{list_supported, SupportedResult};
