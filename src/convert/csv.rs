//! Delimited text converter.

use crate::detect::{DocumentFamily, HTML_CONTENT_TYPE};
use crate::error::Result;
use crate::model::{RawDocument, TableModel};
use crate::parser::DelimitedTextParser;
use crate::render::{CsvRenderer, RenderOptions, RenderStage, Rendered};

use super::DocumentConverter;

/// Converts CSV and plain-text tables to a paginated HTML preview.
#[derive(Debug, Clone, Default)]
pub struct CsvConverter {
    _private: (),
}

impl CsvConverter {
    /// Create a new CSV converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for CsvConverter {
    fn supported_extensions(&self) -> &[&str] {
        DocumentFamily::Delimited.extensions()
    }

    fn name(&self) -> &str {
        "csv"
    }

    fn family(&self) -> DocumentFamily {
        DocumentFamily::Delimited
    }

    fn convert(&self, doc: &RawDocument, options: &RenderOptions) -> Result<Rendered> {
        let rows = DelimitedTextParser::new()
            .multiline(options.multiline_quotes)
            .parse_bytes(&doc.content)?;
        log::debug!("Parsed {} rows from {}", rows.len(), doc.filename);

        let table = TableModel::from_delimited(&rows, options.limits());
        let (html, stats) =
            CsvRenderer::new(options.clone()).render_with_stats(&table, &doc.filename);

        Ok(Rendered::new(
            html.into_bytes(),
            HTML_CONTENT_TYPE,
            RenderStage::Primary,
            stats,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_csv() {
        let doc = RawDocument::new(b"Name,Age\nAnn,30\n".to_vec(), "people.csv");
        let rendered = CsvConverter::new()
            .convert(&doc, &RenderOptions::default())
            .unwrap();
        assert_eq!(rendered.stage, RenderStage::Primary);
        assert_eq!(rendered.content_type, HTML_CONTENT_TYPE);
        assert!(rendered.as_str().unwrap().contains("<th>Name</th><th>Age</th>"));
        assert_eq!(rendered.stats.rendered_rows, 1);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let doc = RawDocument::new(b"caf\xE9,1\n".to_vec(), "legacy.csv");
        let err = CsvConverter::new()
            .convert(&doc, &RenderOptions::default())
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
