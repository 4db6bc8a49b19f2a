use std::fmt::Write as _;

use serde::Serialize;

use crate::locate::sentence::is_terminator;
use crate::locate::Highlighter;
use crate::models::{KeywordSet, MatchRecord};
use crate::operations::AnalysisReport;

const CYAN: &str = "\x1b[96m";
const GREEN: &str = "\x1b[92m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const RULE_WIDTH: usize = 65;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format a result as indented JSON.
pub fn format_pretty<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    format_json(&serde_json::json!({ "error": err.to_string() }))
}

/// Shorten `text` to at most `max` characters plus `...`.
///
/// Prefers to cut just after a sentence terminator found in the second half
/// of the allowed length. `max == 0` leaves the text untouched.
#[must_use]
pub fn truncate_sentence(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if max == 0 || chars.len() <= max {
        return text.to_string();
    }

    let mut cutoff = max;
    while cutoff > max / 2 {
        if is_terminator(chars[cutoff - 1]) {
            return chars[..cutoff].iter().collect::<String>() + "...";
        }
        cutoff -= 1;
    }
    chars[..max].iter().collect::<String>() + "..."
}

/// Options for the human-readable checklist.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistStyle {
    /// Emit ANSI colours and keyword emphasis.
    pub color: bool,
    /// Sentence display limit in characters (0 disables).
    pub truncate_chars: usize,
}

impl ChecklistStyle {
    fn paint(&self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Location label: `<section> | 第N页` for pages, `第N段` for paragraphs.
fn location(record: &MatchRecord, position_kind: &str) -> String {
    let unit = if position_kind == "paragraph" { "段" } else { "页" };
    let place = format!("第{}{unit}", record.position);
    if record.section.is_empty() {
        place
    } else {
        format!("{} | {place}", record.section)
    }
}

/// Render an analysis report as a numbered checklist.
#[must_use]
pub fn render_checklist(report: &AnalysisReport, style: ChecklistStyle) -> String {
    let mut out = String::new();
    if report.matches.is_empty() {
        out.push_str("未找到任何匹配的段落。\n");
        return out;
    }

    let keywords: KeywordSet = report.keywords.iter().collect();
    let highlighter = Highlighter::ansi();
    let rule = style.paint(CYAN, &"-".repeat(RULE_WIDTH));

    let _ = writeln!(
        out,
        "{}",
        style.paint(BOLD, &format!("找到 {} 个匹配段落：", report.matches.len()))
    );
    let _ = writeln!(out, "{rule}");

    for (i, record) in report.matches.iter().enumerate() {
        let shown = truncate_sentence(&record.sentence, style.truncate_chars);
        let shown = if style.color {
            highlighter.highlight(&shown, &keywords)
        } else {
            shown
        };

        let _ = writeln!(
            out,
            "{} {}",
            style.paint(CYAN, &format!("[{}]", i + 1)),
            style.paint(GREEN, &location(record, &report.position_kind))
        );
        let _ = writeln!(out, "{shown}");
        if style.truncate_chars > 0 && record.original_length > style.truncate_chars {
            let remaining = record.original_length - style.truncate_chars;
            let _ = writeln!(
                out,
                "{}",
                style.paint(GRAY, &format!("... 已省略后续 {remaining} 字"))
            );
        }
        let _ = writeln!(out, "{rule}");
    }
    out
}
