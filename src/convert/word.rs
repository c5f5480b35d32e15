//! Word-processing converter.

use crate::detect::{sniff_container, Container, DocumentFamily, HTML_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::model::RawDocument;
use crate::parser::DocumentWalker;
use crate::render::{RenderOptions, RenderStage, Rendered, WordRenderer};

use super::DocumentConverter;

/// Converts docx documents, and `.doc` files that are really docx, to HTML.
///
/// Legacy binary `.doc` files fail here and are left to the text preview.
#[derive(Debug, Clone, Default)]
pub struct WordConverter {
    _private: (),
}

impl WordConverter {
    /// Create a new word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for WordConverter {
    fn supported_extensions(&self) -> &[&str] {
        DocumentFamily::WordProcessing.extensions()
    }

    fn name(&self) -> &str {
        "word"
    }

    fn family(&self) -> DocumentFamily {
        DocumentFamily::WordProcessing
    }

    fn convert(&self, doc: &RawDocument, _options: &RenderOptions) -> Result<Rendered> {
        if sniff_container(&doc.content) == Container::Ole {
            return Err(Error::malformed(
                "doc",
                "legacy binary document has no structured preview",
            ));
        }

        let document = DocumentWalker::new().walk(&doc.content)?;

        let (html, stats) = WordRenderer::new().render_with_stats(&document, &doc.filename);
        Ok(Rendered::new(
            html.into_bytes(),
            HTML_CONTENT_TYPE,
            RenderStage::Primary,
            stats,
        ))
    }
}
