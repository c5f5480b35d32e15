//! # docpreview
//!
//! Self-contained HTML previews for CSV, spreadsheet and word-processing
//! documents.
//!
//! The library takes raw bytes plus a filename and returns a rendered
//! byte buffer: a single UTF-8 HTML page with inline styles and scripts,
//! suitable for inline display in a browser.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpreview::render;
//!
//! fn main() -> docpreview::Result<()> {
//!     let data = std::fs::read("report.xlsx")?;
//!     let rendered = render(&data, "report.xlsx", "html")?;
//!     std::fs::write("report.html", &rendered.content)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Delimited text**: quote-aware CSV parsing, header detection,
//!   search and pagination
//! - **Spreadsheets**: xlsx, xlsm, xls and ods with one tab per sheet
//! - **Word documents**: paragraphs, run formatting, headings and tables
//! - **Cell classification**: numbers, dates, emails, urls and long text
//!   are styled by content
//! - **Fallback chain**: structured preview, then a plain text preview,
//!   then the original bytes
//! - **Parallel processing**: Uses Rayon for batch rendering

pub mod classify;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use classify::classify;
pub use convert::{ConverterRegistry, DocumentConverter, RenderDispatcher, StageOutcome};
pub use detect::{content_type_for, DocumentFamily, TargetFormat};
pub use error::{Error, FailureKind, Result};
pub use model::{
    CellCategory, CellDescriptor, CellValue, ParsedRow, RawDocument, TableModel, WordDocument,
    Workbook,
};
pub use render::{RenderOptions, RenderStage, RenderStats, Rendered};

use rayon::prelude::*;
use std::path::Path;

/// Render a document with default options.
///
/// # Arguments
///
/// * `content` - Document bytes
/// * `filename` - Original filename; its extension selects the renderer
/// * `target` - Output representation, only `html` is supported
///
/// # Example
///
/// ```
/// use docpreview::{render, RenderStage};
///
/// let rendered = render(b"Name,Age\nAnn,30\n", "people.csv", "html").unwrap();
/// assert_eq!(rendered.stage, RenderStage::Primary);
/// assert_eq!(rendered.content_type, "text/html; charset=UTF-8");
/// ```
pub fn render(content: &[u8], filename: &str, target: &str) -> Result<Rendered> {
    Previewer::new().render(content, filename, target)
}

/// Read a file and render it with default options.
///
/// # Example
///
/// ```no_run
/// use docpreview::render_file;
///
/// let rendered = render_file("minutes.docx", "html").unwrap();
/// println!("{} bytes", rendered.content_len());
/// ```
pub fn render_file<P: AsRef<Path>>(path: P, target: &str) -> Result<Rendered> {
    Previewer::new().render_file(path, target)
}

/// Render many documents in parallel with default options.
///
/// Results are returned in input order.
pub fn render_batch(docs: &[RawDocument], target: &str) -> Vec<Result<Rendered>> {
    Previewer::new().render_batch(docs, target)
}

/// Builder for rendering documents with custom options.
///
/// # Example
///
/// ```no_run
/// use docpreview::Previewer;
///
/// let rendered = Previewer::new()
///     .with_max_rows(500)
///     .with_multiline_quotes(true)
///     .strict()
///     .render_file("export.csv", "html")?;
/// # Ok::<(), docpreview::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Previewer {
    options: RenderOptions,
    registry: Option<ConverterRegistry>,
}

impl Previewer {
    /// Create a new previewer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the row cap.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.options = self.options.with_max_rows(rows);
        self
    }

    /// Set the column cap.
    pub fn with_max_columns(mut self, columns: usize) -> Self {
        self.options = self.options.with_max_columns(columns);
        self
    }

    /// Set the initial rows per page.
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.options = self.options.with_rows_per_page(rows);
        self
    }

    /// Set the date pattern for spreadsheet dates.
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.options = self.options.with_date_format(pattern);
        self
    }

    /// Keep newlines inside quoted CSV fields.
    pub fn with_multiline_quotes(mut self, enabled: bool) -> Self {
        self.options = self.options.with_multiline_quotes(enabled);
        self
    }

    /// Disable the fallback chain; primary failures are returned as errors.
    pub fn strict(mut self) -> Self {
        self.options = self.options.with_fallback(false);
        self
    }

    /// Use a custom converter registry.
    pub fn with_registry(mut self, registry: ConverterRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The configured options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Build the dispatcher these settings describe.
    pub fn dispatcher(&self) -> RenderDispatcher {
        let registry = self.registry.clone().unwrap_or_default();
        RenderDispatcher::with_registry(registry, self.options.clone())
    }

    /// Render a document from bytes.
    pub fn render(&self, content: &[u8], filename: &str, target: &str) -> Result<Rendered> {
        let doc = RawDocument::new(content.to_vec(), filename);
        self.dispatcher().render(&doc, target)
    }

    /// Read a file and render it; the file name drives dispatch.
    pub fn render_file<P: AsRef<Path>>(&self, path: P, target: &str) -> Result<Rendered> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let doc = RawDocument::new(content, filename);
        self.dispatcher().render(&doc, target)
    }

    /// Render many documents in parallel. Results keep input order.
    pub fn render_batch(&self, docs: &[RawDocument], target: &str) -> Vec<Result<Rendered>> {
        let dispatcher = self.dispatcher();
        docs.par_iter()
            .map(|doc| dispatcher.render(doc, target))
            .collect()
    }
}
