//! Word-processing document types.

use serde::{Deserialize, Serialize};

/// A walked word-processing document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDocument {
    /// Body elements in document order
    pub blocks: Vec<Block>,
}

impl WordDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the body.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the body has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of paragraphs in the body.
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count()
    }

    /// Number of tables in the body.
    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => p.plain_text(),
                Block::Table(t) => t.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A body element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(WordTable),
}

/// A paragraph of styled runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in order
    pub runs: Vec<TextRun>,

    /// Heading level (1-6) when the paragraph style is a heading
    pub heading_level: Option<u8>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.heading_level = Some(level.clamp(1, 6));
        p
    }

    /// Add a styled run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// A paragraph is empty when its text is blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A run of text with consistent formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content (may contain `\n` for line breaks and `\t`)
    pub text: String,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
}

impl TextRun {
    /// Create a plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::new(text)
        }
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::new(text)
        }
    }

    /// Create an underlined run.
    pub fn underline(text: impl Into<String>) -> Self {
        Self {
            underline: true,
            ..Self::new(text)
        }
    }

    /// Check if the run has any formatting.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

/// A table whose cells are flattened to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTable {
    /// Rows of cell texts; the first row renders as the header
    pub rows: Vec<Vec<String>>,
}

impl WordTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row.
    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_empty() {
        assert!(Paragraph::new().is_empty());
        assert!(Paragraph::with_text("  \t ").is_empty());
        assert!(!Paragraph::with_text("x").is_empty());
    }

    #[test]
    fn test_heading_clamped() {
        assert_eq!(Paragraph::heading("T", 9).heading_level, Some(6));
        assert_eq!(Paragraph::heading("T", 0).heading_level, Some(1));
    }

    #[test]
    fn test_plain_text() {
        let mut doc = WordDocument::new();
        let mut p = Paragraph::new();
        p.add_run(TextRun::bold("Hello "));
        p.add_run(TextRun::new("world"));
        doc.push(Block::Paragraph(p));
        let mut t = WordTable::new();
        t.add_row(vec!["a".into(), "b".into()]);
        doc.push(Block::Table(t));

        assert_eq!(doc.plain_text(), "Hello world\n\na\tb");
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.table_count(), 1);
    }
}
