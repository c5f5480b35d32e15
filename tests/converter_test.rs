//! Integration tests for the converter registry and fallback dispatcher.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docpreview::convert::{
    ConverterRegistry, CsvConverter, DocumentConverter, RenderDispatcher, StageOutcome,
};
use docpreview::{
    DocumentFamily, Error, Previewer, RawDocument, RenderOptions, RenderStage, RenderStats,
    Rendered,
};

/// How the mock converter behaves.
#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Malformed,
    Panic,
}

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str, behavior: Behavior) -> Self {
        Self {
            extensions,
            name,
            behavior,
            calls: AtomicUsize::new(0),
        }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn family(&self) -> DocumentFamily {
        DocumentFamily::WordProcessing
    }

    fn convert(&self, doc: &RawDocument, _options: &RenderOptions) -> docpreview::Result<Rendered> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Succeed => Ok(Rendered::new(
                format!("Converted {} by {}", doc.filename, self.name).into_bytes(),
                "text/html; charset=UTF-8",
                RenderStage::Primary,
                RenderStats::new(),
            )),
            Behavior::Malformed => Err(Error::malformed("mock", "cannot parse")),
            Behavior::Panic => panic!("mock converter exploded"),
        }
    }
}

fn dispatcher_with(converter: Arc<MockConverter>, options: RenderOptions) -> RenderDispatcher {
    let mut registry = ConverterRegistry::new();
    registry.register(converter);
    RenderDispatcher::with_registry(registry, options)
}

fn ole_bytes(stream_text: Option<&str>) -> Vec<u8> {
    let mut compound = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    if let Some(text) = stream_text {
        let data: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        let mut stream = compound.create_stream("/WordDocument").unwrap();
        stream.write_all(&data).unwrap();
        stream.flush().unwrap();
    }
    compound.flush().unwrap();
    compound.into_inner().into_inner()
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();
    assert!(registry.supported_extensions().is_empty());
    assert!(!registry.supports("csv"));
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MockConverter::new(
        vec!["rtf", "odt"],
        "Mock",
        Behavior::Succeed,
    )));

    assert!(registry.supports("rtf"));
    assert!(registry.supports("ODT"));
    assert!(registry.get_by_name("mock").is_some());
    assert_eq!(registry.supported_extensions(), vec!["odt", "rtf"]);
}

#[test]
fn test_registration_replaces_extension() {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Arc::new(MockConverter::new(
        vec!["csv"],
        "custom-csv",
        Behavior::Succeed,
    )));

    let converter = registry.get_by_extension("csv").unwrap();
    assert_eq!(converter.name(), "custom-csv");
    assert_eq!(registry.get_by_extension("xlsx").unwrap().name(), "spreadsheet");
}

#[test]
fn test_custom_converter_through_previewer() {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Arc::new(MockConverter::new(
        vec!["docx"],
        "stub",
        Behavior::Succeed,
    )));

    let rendered = Previewer::new()
        .with_registry(registry)
        .render(b"anything", "memo.docx", "html")
        .unwrap();
    assert_eq!(rendered.as_str(), Some("Converted memo.docx by stub"));
}

#[test]
fn test_primary_failure_falls_back_to_text_preview() {
    let mock = Arc::new(MockConverter::new(vec!["doc"], "mock", Behavior::Malformed));
    let dispatcher = dispatcher_with(mock.clone(), RenderOptions::default());

    let doc = RawDocument::new(b"Quarterly notes & plans".to_vec(), "notes.doc");
    let rendered = dispatcher.render(&doc, "html").unwrap();

    assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    assert_eq!(rendered.stage, RenderStage::TextPreview);
    assert!(rendered.is_html());
    let html = rendered.as_str().unwrap();
    assert!(html.contains("<title>Word Document</title>"));
    assert!(html.contains("Quarterly notes &amp; plans"));
    assert_eq!(rendered.stats.word_count, 4);
}

#[test]
fn test_panicking_converter_is_contained() {
    let mock = Arc::new(MockConverter::new(vec!["doc"], "mock", Behavior::Panic));
    let dispatcher = dispatcher_with(mock, RenderOptions::default());

    let doc = RawDocument::new(b"survivable text".to_vec(), "boom.doc");
    let rendered = dispatcher.render(&doc, "html").unwrap();
    assert_eq!(rendered.stage, RenderStage::TextPreview);
}

#[test]
fn test_strict_mode_returns_primary_error() {
    let mock = Arc::new(MockConverter::new(vec!["doc"], "mock", Behavior::Malformed));
    let dispatcher = dispatcher_with(mock, RenderOptions::new().with_fallback(false));

    let doc = RawDocument::new(b"Quarterly notes".to_vec(), "notes.doc");
    let err = dispatcher.render(&doc, "html").unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
}

#[test]
fn test_binary_garbage_passes_through() {
    let data: Vec<u8> = (0u8..32).cycle().take(512).collect();
    let rendered = docpreview::render(&data, "broken.xlsx", "html").unwrap();

    assert_eq!(rendered.stage, RenderStage::RawPassthrough);
    assert_eq!(rendered.content, data);
    assert_eq!(
        rendered.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(!rendered.is_html());
}

#[test]
fn test_legacy_doc_uses_text_preview() {
    let data = ole_bytes(Some("Minutes of the annual meeting"));
    let rendered = docpreview::render(&data, "minutes.doc", "html").unwrap();

    assert_eq!(rendered.stage, RenderStage::TextPreview);
    let html = rendered.as_str().unwrap();
    assert!(html.contains("Minutes of the annual meeting"));
    assert!(html.contains("<div class='text-notice'>"));
}

#[test]
fn test_empty_legacy_doc_passes_through() {
    let data = ole_bytes(None);
    let rendered = docpreview::render(&data, "blank.doc", "html").unwrap();

    assert_eq!(rendered.stage, RenderStage::RawPassthrough);
    assert_eq!(rendered.content_type, "application/msword");
}

#[test]
fn test_attempt_raw_passthrough_stage() {
    let dispatcher = RenderDispatcher::default();
    let converter = CsvConverter::new();
    let doc = RawDocument::new(b"a,b\n".to_vec(), "data.csv");

    match dispatcher.attempt(RenderStage::RawPassthrough, &converter, &doc) {
        StageOutcome::Success(rendered) => {
            assert_eq!(rendered.content_type, "text/csv");
            assert_eq!(rendered.content, b"a,b\n");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_validation_errors_ignore_fallback() {
    let err = docpreview::render(b"", "data.csv", "html").unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
    assert!(!err.is_retryable());

    let err = docpreview::render(b"%PDF-1.4", "manual.pdf", "html").unwrap_err();
    assert!(matches!(err, Error::UnsupportedExtension(ref ext) if ext == ".pdf"));

    let err = docpreview::render(b"a,b", "data.csv", "markdown").unwrap_err();
    assert!(matches!(err, Error::UnsupportedTarget(_)));
}
