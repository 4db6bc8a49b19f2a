#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::fn_params_excessive_bools,
    clippy::needless_pass_by_value
)]

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;

use tenderscan::cli::commands::{Cli, Command, HistoryCommand, KeywordsCommand, OutputFormat};
use tenderscan::cli::output::{self, ChecklistStyle};
use tenderscan::config::Config;
use tenderscan::db::Database;
use tenderscan::logging;
use tenderscan::operations::{self, AnalyzeRequest};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CmdResult {
    let config = get_config()?;
    logging::init(&config).map_err(map_err)?;

    match cli.command {
        Command::Analyze {
            file,
            keyword,
            keywords_file,
            project,
            output,
            format,
            no_history,
        } => cmd_analyze(
            &config,
            &AnalyzeArgs {
                file: &file,
                keywords: &keyword,
                keywords_file: keywords_file.as_deref(),
                project: project.as_deref(),
                output: output.as_deref(),
                format,
                no_history,
            },
        ),
        Command::Keywords(action) => cmd_keywords(&config, action),
        Command::History {
            action,
            limit,
            offset,
            status,
        } => cmd_history(&config, action, limit, offset, status.as_deref()),
        Command::Stats => cmd_stats(&config),
        Command::Supported => cmd_supported(),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> Result<Config, Box<dyn std::fmt::Display>> {
    Config::from_cwd().map_err(map_err)
}

fn get_db(config: &Config) -> Result<Database, Box<dyn std::fmt::Display>> {
    config.ensure_data_dir().map_err(map_err)?;
    Database::open(&config.db_path).map_err(map_err)
}

struct AnalyzeArgs<'a> {
    file: &'a Path,
    keywords: &'a [String],
    keywords_file: Option<&'a Path>,
    project: Option<&'a str>,
    output: Option<&'a Path>,
    format: Option<OutputFormat>,
    no_history: bool,
}

fn cmd_analyze(config: &Config, args: &AnalyzeArgs<'_>) -> CmdResult {
    if let Some(path) = args.output {
        operations::ExportFormat::from_path(path).map_err(map_err)?;
    }
    let mut db = get_db(config)?;
    let request = AnalyzeRequest {
        path: args.file,
        extra_keywords: args.keywords,
        keywords_file: args.keywords_file,
        project: args.project,
        record_history: config.settings.analysis.record_history && !args.no_history,
    };
    let report = operations::analyze(&mut db, &request).map_err(map_err)?;

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_setting(&config.settings.output.format));
    match format {
        OutputFormat::Json => println!("{}", output::format_json(&report)),
        OutputFormat::Pretty => println!("{}", output::format_pretty(&report)),
        OutputFormat::Checklist => {
            let style = ChecklistStyle {
                color: config.settings.output.highlight && std::io::stdout().is_terminal(),
                truncate_chars: config.settings.output.truncate_chars,
            };
            print!("{}", output::render_checklist(&report, style));
        }
    }

    if let Some(path) = args.output {
        let rows = operations::export_records(&report.matches, path).map_err(map_err)?;
        eprintln!("已导出 {rows} 条结果到 {}", path.display());
    }
    Ok(())
}

fn cmd_keywords(config: &Config, action: KeywordsCommand) -> CmdResult {
    let mut db = get_db(config)?;
    match action {
        KeywordsCommand::Add {
            keywords,
            category,
            description,
        } => {
            let result = operations::add_keywords(
                &db,
                &keywords,
                category.as_deref(),
                description.as_deref(),
            )
            .map_err(map_err)?;
            println!("{}", output::format_json(&result));
        }
        KeywordsCommand::Remove { keywords } => {
            let result = operations::remove_keywords(&db, &keywords).map_err(map_err)?;
            println!("{}", output::format_json(&result));
        }
        KeywordsCommand::Update {
            old,
            new,
            category,
            description,
        } => {
            let entry = operations::update_keyword(
                &db,
                &old,
                &new,
                category.as_deref(),
                description.as_deref(),
            )
            .map_err(map_err)?;
            println!("{}", output::format_json(&entry));
        }
        KeywordsCommand::List => {
            let entries = operations::list_keywords(&db).map_err(map_err)?;

            #[derive(serde::Serialize)]
            struct KeywordList {
                count: usize,
                keywords: Vec<tenderscan::models::KeywordEntry>,
            }

            println!(
                "{}",
                output::format_json(&KeywordList {
                    count: entries.len(),
                    keywords: entries,
                })
            );
        }
        KeywordsCommand::Import { file } => {
            let result = operations::import_keywords(&mut db, &file).map_err(map_err)?;
            println!("{}", output::format_json(&result));
        }
        KeywordsCommand::Export { file } => {
            let count = operations::export_keywords(&db, &file).map_err(map_err)?;
            println!(
                "{}",
                output::format_json(&serde_json::json!({
                    "exported": count,
                    "file": file.display().to_string(),
                }))
            );
        }
        KeywordsCommand::Clear => {
            let removed = operations::clear_keywords(&db).map_err(map_err)?;
            println!("{{\"removed\":{removed}}}");
        }
    }
    Ok(())
}

fn cmd_history(
    config: &Config,
    action: Option<HistoryCommand>,
    limit: usize,
    offset: usize,
    status: Option<&str>,
) -> CmdResult {
    let db = get_db(config)?;
    match action {
        None => {
            let result = operations::list_runs(&db, limit, offset, status).map_err(map_err)?;
            println!("{}", output::format_json(&result));
        }
        Some(HistoryCommand::Show { id }) => {
            let run = operations::show_run(&db, id).map_err(map_err)?;
            println!("{}", output::format_pretty(&run));
        }
        Some(HistoryCommand::Search { term }) => {
            let result = operations::search_runs(&db, &term).map_err(map_err)?;
            println!("{}", output::format_json(&result));
        }
    }
    Ok(())
}

fn cmd_stats(config: &Config) -> CmdResult {
    let db = get_db(config)?;
    let result = operations::get_stats(&db).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_supported() -> CmdResult {
    let result = operations::list_supported();
    println!("{}", output::format_json(&result));
    Ok(())
}
