//! Document converters and the fallback dispatcher.
//!
//! Each document family has a [`DocumentConverter`] producing the full
//! preview. Converters are registered by extension in a
//! [`ConverterRegistry`]; the [`RenderDispatcher`] validates the request,
//! picks the converter and runs the fallback chain:
//!
//! 1. primary: the family converter's structured preview
//! 2. text preview: best-effort text extraction as an escaped page
//! 3. raw passthrough: the original bytes with their own content type
//!
//! # Example
//!
//! ```no_run
//! use docpreview::convert::RenderDispatcher;
//! use docpreview::{RawDocument, RenderOptions};
//!
//! fn main() -> docpreview::Result<()> {
//!     let dispatcher = RenderDispatcher::new(RenderOptions::default());
//!     let doc = RawDocument::new(b"a,b\n1,2\n".to_vec(), "data.csv");
//!     let rendered = dispatcher.render(&doc, "html")?;
//!     println!("{} bytes via {}", rendered.content_len(), rendered.stage);
//!     Ok(())
//! }
//! ```

mod csv;
mod spreadsheet;
mod word;

pub use csv::CsvConverter;
pub use spreadsheet::SpreadsheetConverter;
pub use word::WordConverter;

use crate::detect::{content_type_for_extension, DocumentFamily, TargetFormat, HTML_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::model::RawDocument;
use crate::parser::extract_text;
use crate::render::{to_text_preview, RenderOptions, RenderStage, RenderStats, Rendered};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Trait for document converters.
///
/// Implement this trait to add support for a new document format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["csv"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Family used for text extraction when the primary preview fails.
    fn family(&self) -> DocumentFamily;

    /// Render the full preview of a document.
    fn convert(&self, doc: &RawDocument, options: &RenderOptions) -> Result<Rendered>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters, case-insensitively.
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the CSV, spreadsheet and word converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CsvConverter::new()));
        registry.register(Arc::new(SpreadsheetConverter::new()));
        registry.register(Arc::new(WordConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions,
    /// replacing any previous converter for them.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Outcome of one stage of the fallback chain.
#[derive(Debug)]
pub enum StageOutcome {
    /// The stage produced output.
    Success(Rendered),
    /// The stage failed; a later stage may still succeed.
    Retry(Error),
    /// The stage failed and the chain stops.
    Failure(Error),
}

impl From<Result<Rendered>> for StageOutcome {
    fn from(result: Result<Rendered>) -> Self {
        match result {
            Ok(rendered) => StageOutcome::Success(rendered),
            Err(e) if e.is_retryable() => StageOutcome::Retry(e),
            Err(e) => StageOutcome::Failure(e),
        }
    }
}

/// Validates render requests and runs the fallback chain.
#[derive(Clone)]
pub struct RenderDispatcher {
    registry: ConverterRegistry,
    options: RenderOptions,
}

impl RenderDispatcher {
    /// Create a dispatcher with the default converters.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_registry(ConverterRegistry::with_defaults(), options)
    }

    /// Create a dispatcher over a custom registry.
    pub fn with_registry(registry: ConverterRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    /// The options every render uses.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The converter registry.
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Render a document to the requested target.
    ///
    /// Validation happens first: empty content, then the extension, then
    /// the target. After that the chain only fails in strict mode (fallback
    /// disabled) or when a stage reports a non-retryable failure.
    pub fn render(&self, doc: &RawDocument, target: &str) -> Result<Rendered> {
        let (ext, converter) = self.validate(doc, target)?;

        let stages: &[RenderStage] = if self.options.fallback {
            &[RenderStage::Primary, RenderStage::TextPreview]
        } else {
            &[RenderStage::Primary]
        };

        for &stage in stages {
            match self.attempt(stage, converter.as_ref(), doc) {
                StageOutcome::Success(rendered) => {
                    log::info!("Rendered {} via {} stage", doc.filename, stage);
                    return Ok(rendered);
                }
                StageOutcome::Retry(err) if self.options.fallback => {
                    log::warn!("{} stage failed for {}: {}", stage, doc.filename, err);
                }
                StageOutcome::Retry(err) | StageOutcome::Failure(err) => {
                    log::warn!("Rendering {} failed: {}", doc.filename, err);
                    return Err(err);
                }
            }
        }

        log::info!("Serving {} as raw passthrough", doc.filename);
        Ok(passthrough(doc, &ext, converter.family()))
    }

    fn validate(
        &self,
        doc: &RawDocument,
        target: &str,
    ) -> Result<(String, Arc<dyn DocumentConverter>)> {
        if doc.is_empty() {
            return Err(Error::EmptyInput);
        }
        if doc.filename.trim().is_empty() {
            return Err(Error::UnsupportedExtension(doc.filename.clone()));
        }
        TargetFormat::parse(target)?;
        let ext = doc
            .extension()
            .ok_or_else(|| Error::UnsupportedExtension(doc.filename.clone()))?;
        let converter = self
            .registry
            .get_by_extension(&ext)
            .ok_or_else(|| Error::UnsupportedExtension(format!(".{}", ext)))?;
        Ok((ext, converter))
    }

    /// Run one stage of the chain.
    pub fn attempt(
        &self,
        stage: RenderStage,
        converter: &dyn DocumentConverter,
        doc: &RawDocument,
    ) -> StageOutcome {
        match stage {
            RenderStage::Primary => {
                log::debug!("Trying {} converter for {}", converter.name(), doc.filename);
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    converter.convert(doc, &self.options)
                }));
                match result {
                    Ok(result) => result.into(),
                    Err(_) => StageOutcome::Retry(Error::malformed(
                        converter.family().name(),
                        "converter panicked",
                    )),
                }
            }
            RenderStage::TextPreview => text_preview(doc, converter.family()),
            RenderStage::RawPassthrough => {
                let ext = doc.extension().unwrap_or_default();
                StageOutcome::Success(passthrough(doc, &ext, converter.family()))
            }
        }
    }
}

impl Default for RenderDispatcher {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn text_preview(doc: &RawDocument, family: DocumentFamily) -> StageOutcome {
    match extract_text(&doc.content, family) {
        Some(text) => {
            let html = to_text_preview(&text, &doc.filename, family);
            StageOutcome::Success(Rendered::new(
                html.into_bytes(),
                HTML_CONTENT_TYPE,
                RenderStage::TextPreview,
                RenderStats::from_text(family, &text),
            ))
        }
        None => StageOutcome::Retry(Error::malformed(family.name(), "no extractable text")),
    }
}

fn passthrough(doc: &RawDocument, ext: &str, family: DocumentFamily) -> Rendered {
    let stats = RenderStats {
        family: Some(family),
        ..RenderStats::default()
    };
    Rendered::new(
        doc.content.clone(),
        content_type_for_extension(ext),
        RenderStage::RawPassthrough,
        stats,
    )
}
