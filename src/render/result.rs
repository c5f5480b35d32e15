//! Rendering result with metadata and statistics.

use crate::detect::DocumentFamily;
use crate::model::{Block, TableModel, WordDocument, Workbook};
use serde::Serialize;

/// Which stage of the fallback chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    /// Full structured preview from the family walker
    Primary,
    /// Text preview from best-effort extraction
    TextPreview,
    /// Original bytes with the extension's content type
    RawPassthrough,
}

impl RenderStage {
    /// Short name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            RenderStage::Primary => "primary",
            RenderStage::TextPreview => "text preview",
            RenderStage::RawPassthrough => "raw passthrough",
        }
    }
}

impl std::fmt::Display for RenderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A rendered document: bytes ready to deliver plus how they were made.
#[derive(Debug, Clone, Serialize)]
pub struct Rendered {
    /// Output bytes (UTF-8 HTML unless passed through raw)
    #[serde(skip)]
    pub content: Vec<u8>,

    /// MIME type of `content`
    pub content_type: &'static str,

    /// Fallback stage that produced the output
    pub stage: RenderStage,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl Rendered {
    /// Create a result.
    pub fn new(
        content: Vec<u8>,
        content_type: &'static str,
        stage: RenderStage,
        stats: RenderStats,
    ) -> Self {
        Self {
            content,
            content_type,
            stage,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// The content as text, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    /// Whether the content is an HTML preview.
    pub fn is_html(&self) -> bool {
        self.content_type.starts_with("text/html")
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderStats {
    /// Document family that handled the input
    pub family: Option<DocumentFamily>,

    /// Number of sheets (spreadsheets)
    pub sheet_count: u32,

    /// Number of sheets that failed to load
    pub failed_sheet_count: u32,

    /// Data rows rendered across all tables
    pub rendered_rows: u32,

    /// Non-empty rows in the source across all tables
    pub total_rows: u32,

    /// Widest table, in rendered columns
    pub column_count: u32,

    /// Whether any table hit the row cap
    pub rows_truncated: bool,

    /// Whether any table hit the column cap
    pub columns_truncated: bool,

    /// Number of paragraphs (word documents)
    pub paragraph_count: u32,

    /// Number of headings (word documents)
    pub heading_count: u32,

    /// Number of tables (word documents)
    pub table_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for a delimited-text table.
    pub fn from_table(table: &TableModel) -> Self {
        let mut stats = Self {
            family: Some(DocumentFamily::Delimited),
            ..Self::default()
        };
        stats.add_table(table);
        stats
    }

    /// Statistics for a workbook.
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let mut stats = Self {
            family: Some(DocumentFamily::Spreadsheet),
            sheet_count: workbook.sheet_count() as u32,
            failed_sheet_count: workbook.failed_sheet_count() as u32,
            ..Self::default()
        };
        for table in workbook.sheets.iter().filter_map(|s| s.table()) {
            stats.add_table(table);
        }
        stats
    }

    /// Statistics for a word-processing document.
    pub fn from_document(doc: &WordDocument) -> Self {
        let mut stats = Self {
            family: Some(DocumentFamily::WordProcessing),
            ..Self::default()
        };
        for block in &doc.blocks {
            match block {
                Block::Paragraph(p) => {
                    stats.paragraph_count += 1;
                    if p.heading_level.is_some() {
                        stats.heading_count += 1;
                    }
                    stats.count_text(&p.plain_text());
                }
                Block::Table(t) => {
                    stats.table_count += 1;
                    stats.count_text(&t.plain_text());
                }
            }
        }
        stats
    }

    /// Statistics for extracted text.
    pub fn from_text(family: DocumentFamily, text: &str) -> Self {
        let mut stats = Self {
            family: Some(family),
            ..Self::default()
        };
        stats.count_text(text);
        stats
    }

    /// Fold one table into the statistics.
    pub fn add_table(&mut self, table: &TableModel) {
        self.rendered_rows += table.rows.len() as u32;
        self.total_rows += table.total_rows as u32;
        self.column_count = self.column_count.max(table.column_count as u32);
        self.rows_truncated |= table.rows_truncated;
        self.columns_truncated |= table.columns_truncated;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, ParsedRow, TableLimits, TextRun, WordTable};

    #[test]
    fn test_render_stats_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_stats_from_table() {
        let rows = vec![
            ParsedRow::new(vec!["a".into(), "b".into()]),
            ParsedRow::new(vec!["c".into(), "d".into()]),
        ];
        let table = TableModel::from_delimited(&rows, TableLimits::default());
        let stats = RenderStats::from_table(&table);
        assert_eq!(stats.family, Some(DocumentFamily::Delimited));
        assert_eq!(stats.rendered_rows, 1);
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.column_count, 2);
        assert!(!stats.rows_truncated);
    }

    #[test]
    fn test_stats_from_document() {
        let mut doc = WordDocument::new();
        doc.push(Block::Paragraph(Paragraph::heading("Title", 1)));
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("two words"));
        doc.push(Block::Paragraph(p));
        doc.push(Block::Table(WordTable::new()));

        let stats = RenderStats::from_document(&doc);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn test_rendered_helpers() {
        let rendered = Rendered::new(
            b"<html></html>".to_vec(),
            "text/html; charset=UTF-8",
            RenderStage::Primary,
            RenderStats::new(),
        );
        assert!(rendered.is_html());
        assert_eq!(rendered.as_str(), Some("<html></html>"));
        assert_eq!(rendered.content_len(), 13);
    }
}
