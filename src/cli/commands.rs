use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "tenderscan",
    version,
    about = "Locate keywords in tender documents (PDF, DOCX) and list the sentences around them",
    after_help = "Keywords and run history are kept in .tenderscan/catalog.db under the current \
                  directory. Settings are read from .tenderscan/config.toml."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// How analysis results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Numbered list of sentences with section and position.
    Checklist,
    /// Minified JSON.
    Json,
    /// Indented JSON.
    Pretty,
}

impl OutputFormat {
    /// Parse a config value, falling back to the checklist.
    #[must_use]
    pub fn from_setting(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value, true).unwrap_or(Self::Checklist)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Find catalog keywords in a document and print the sentences containing them.
    ///
    /// Keywords are the catalog plus any imported with --keywords-file (which
    /// are kept in the catalog) plus any given with -k (this run only).
    Analyze {
        /// Document to analyze (.pdf or .docx)
        file: PathBuf,
        /// Extra keyword for this run only (repeatable)
        #[arg(short, long = "keyword")]
        keyword: Vec<String>,
        /// Import keywords from a file into the catalog first
        #[arg(long)]
        keywords_file: Option<PathBuf>,
        /// Project name recorded in history (default: file stem)
        #[arg(short, long)]
        project: Option<String>,
        /// Export results to a .json or .jsonl file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (default from config: checklist)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Do not record this run in history
        #[arg(long)]
        no_history: bool,
    },

    /// Manage the keyword catalog
    #[command(subcommand)]
    Keywords(KeywordsCommand),

    /// Show past analysis runs
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,
        /// Maximum number of runs
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Runs to skip
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Only runs with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Keyword and project statistics (latest run per project)
    Stats,

    /// List supported document formats
    Supported,
}

#[derive(Subcommand)]
pub enum KeywordsCommand {
    /// Add keywords
    Add {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove keywords
    Remove {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Rename a keyword, optionally changing category and description
    Update {
        old: String,
        new: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List the catalog
    List,
    /// Import keywords from a text file.
    ///
    /// Lines are either `keyword<TAB>category<TAB>description` or keywords
    /// separated by commas (ASCII or full-width).
    Import { file: PathBuf },
    /// Export the catalog as tab-separated lines
    Export { file: PathBuf },
    /// Delete every keyword
    Clear,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Show one run
    Show { id: i64 },
    /// Find runs by project name or notes
    Search { term: String },
}
