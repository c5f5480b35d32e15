//! Spreadsheet converter.

use crate::detect::{DocumentFamily, HTML_CONTENT_TYPE};
use crate::error::Result;
use crate::model::RawDocument;
use crate::parser::SpreadsheetWalker;
use crate::render::{RenderOptions, RenderStage, Rendered, WorkbookRenderer};

use super::DocumentConverter;

/// Converts workbooks (xlsx, xlsm, xls, ods) to a tabbed HTML preview.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetConverter {
    _private: (),
}

impl SpreadsheetConverter {
    /// Create a new spreadsheet converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for SpreadsheetConverter {
    fn supported_extensions(&self) -> &[&str] {
        DocumentFamily::Spreadsheet.extensions()
    }

    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn family(&self) -> DocumentFamily {
        DocumentFamily::Spreadsheet
    }

    fn convert(&self, doc: &RawDocument, options: &RenderOptions) -> Result<Rendered> {
        let workbook = SpreadsheetWalker::new(options.limits())
            .with_date_format(options.date_format.clone())
            .walk(&doc.content)?;
        log::debug!(
            "Walked {} sheets from {}",
            workbook.sheet_count(),
            doc.filename
        );

        let (html, stats) = WorkbookRenderer::new().render_with_stats(&workbook, &doc.filename);
        Ok(Rendered::new(
            html.into_bytes(),
            HTML_CONTENT_TYPE,
            RenderStage::Primary,
            stats,
        ))
    }
}
