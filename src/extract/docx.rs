use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, TenderError};
use crate::extract::Extractor;
use crate::models::TextUnit;

/// Main document part inside the DOCX zip container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph/table-row DOCX text extractor.
///
/// Body paragraphs come first, then the rows of top-level tables. Positions
/// are a single running counter over both, not page numbers.
pub struct DocxExtractor;

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build text units from the WordprocessingML of `word/document.xml`.
    pub fn units_from_xml(xml: &str) -> std::result::Result<Vec<TextUnit>, quick_xml::Error> {
        let body = BodyText::parse(xml)?;

        let mut units = Vec::new();
        let mut position = 1u32;
        let texts = body
            .paragraphs
            .iter()
            .map(|p| p.trim())
            .chain(body.table_rows.iter().map(String::as_str));
        for text in texts {
            if text.is_empty() {
                continue;
            }
            units.push(TextUnit::new(position, text));
            position += 1;
        }
        Ok(units)
    }
}

impl Extractor for DocxExtractor {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn extract_bytes(&self, path: &Path, bytes: &[u8]) -> Result<Vec<TextUnit>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| TenderError::extraction(path, format!("not a DOCX container: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| TenderError::extraction(path, format!("{DOCUMENT_PART}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| TenderError::extraction(path, format!("{DOCUMENT_PART}: {e}")))?;

        Self::units_from_xml(&xml)
            .map_err(|e| TenderError::extraction(path, format!("malformed document XML: {e}")))
    }
}

/// Text collected from a document body.
#[derive(Debug, Default)]
struct BodyText {
    /// Top-level body paragraphs, untrimmed, in order.
    paragraphs: Vec<String>,
    /// Rows of top-level tables: non-empty trimmed cell texts joined by a space.
    table_rows: Vec<String>,
}

/// Walk state while reading `document.xml`.
#[derive(Default)]
struct Walker {
    body: BodyText,
    /// Open paragraphs; more than one only inside text boxes.
    paragraphs: Vec<String>,
    run_depth: usize,
    in_text: bool,
    table_depth: usize,
    row_cells: Vec<String>,
    cell_paragraphs: Vec<String>,
}

impl BodyText {
    fn parse(xml: &str) -> std::result::Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        let mut walker = Walker::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => walker.open(e.local_name().as_ref()),
                Event::End(e) => walker.close(e.local_name().as_ref()),
                Event::Empty(e) => walker.empty(e.local_name().as_ref()),
                Event::Text(t) => {
                    if walker.in_text {
                        let text = t.unescape()?;
                        walker.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(walker.body)
    }
}

impl Walker {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"p" => self.paragraphs.push(String::new()),
            b"r" => self.run_depth += 1,
            b"t" => self.in_text = self.run_depth > 0,
            b"tbl" => self.table_depth += 1,
            b"tr" if self.table_depth == 1 => self.row_cells.clear(),
            b"tc" if self.table_depth == 1 => self.cell_paragraphs.clear(),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"p" => {
                let Some(text) = self.paragraphs.pop() else {
                    return;
                };
                // Nested paragraphs (text boxes) are not part of the body flow.
                if !self.paragraphs.is_empty() {
                    return;
                }
                match self.table_depth {
                    0 => self.body.paragraphs.push(text),
                    1 => self.cell_paragraphs.push(text),
                    _ => {}
                }
            }
            b"r" => self.run_depth = self.run_depth.saturating_sub(1),
            b"t" => self.in_text = false,
            b"tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            b"tc" if self.table_depth == 1 => {
                let cell = self.cell_paragraphs.join("\n");
                self.row_cells.push(cell.trim().to_string());
            }
            b"tr" if self.table_depth == 1 => {
                let row = self
                    .row_cells
                    .iter()
                    .filter(|c| !c.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.body.table_rows.push(row);
            }
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        if self.run_depth == 0 {
            return;
        }
        match name {
            b"tab" => self.push_text("\t"),
            b"br" | b"cr" => self.push_text("\n"),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(current) = self.paragraphs.last_mut() {
            current.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>")
    }

    fn row(cells: &[&str]) -> String {
        let cells: String = cells
            .iter()
            .map(|c| format!("<w:tc>{}</w:tc>", para(c)))
            .collect();
        format!("<w:tr>{cells}</w:tr>")
    }

    #[test]
    fn paragraphs_then_table_rows_share_counter() {
        let xml = document(&format!(
            "{}<w:tbl>{}{}</w:tbl>{}",
            para("第一章 总则"),
            row(&["品目", "数量"]),
            row(&["计算机", "10台"]),
            para("本项目采购计算机设备。"),
        ));
        let units = DocxExtractor::units_from_xml(&xml).unwrap();
        let got: Vec<(u32, &str)> = units
            .iter()
            .map(|u| (u.position, u.content.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, "第一章 总则"),
                (2, "本项目采购计算机设备。"),
                (3, "品目 数量"),
                (4, "计算机 10台"),
            ]
        );
    }

    #[test]
    fn empty_paragraphs_and_cells_skipped() {
        let xml = document(&format!(
            "{}<w:p/>{}<w:tbl>{}{}</w:tbl>",
            para("  "),
            para(" 有效段落 "),
            row(&["", "  "]),
            row(&["", "只有一格"]),
        ));
        let units = DocxExtractor::units_from_xml(&xml).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0], TextUnit::new(1, "有效段落"));
        assert_eq!(units[1], TextUnit::new(2, "只有一格"));
    }

    #[test]
    fn runs_concatenate_with_tabs_and_breaks() {
        let xml = document(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>Part</w:t></w:r><w:r><w:tab/><w:t>A</w:t><w:br/><w:t>B &amp; C</w:t></w:r></w:p>",
        );
        let units = DocxExtractor::units_from_xml(&xml).unwrap();
        assert_eq!(units[0].content, "Part\tA\nB & C");
    }

    #[test]
    fn nested_tables_not_reported_as_rows() {
        let inner = format!("<w:tbl>{}</w:tbl>", row(&["内层"]));
        let xml = document(&format!(
            "<w:tbl><w:tr><w:tc>{}{inner}</w:tc></w:tr></w:tbl>",
            para("外层")
        ));
        let units = DocxExtractor::units_from_xml(&xml).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].content, "外层");
    }

    #[test]
    fn extracts_from_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tender.docx");
        let file = File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file(DOCUMENT_PART, zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(document(&para("交货期30天。")).as_bytes())
            .unwrap();
        zip.finish().unwrap();

        let units = DocxExtractor::new().extract(&path).unwrap();
        assert_eq!(units, vec![TextUnit::new(1, "交货期30天。")]);
    }

    #[test]
    fn non_zip_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, "plain text pretending to be docx").unwrap();
        let err = DocxExtractor::new().extract(&path).unwrap_err();
        assert!(matches!(err, TenderError::Extraction { .. }));
    }
}
