//! Word-processing document walking.
//!
//! Reads `word/document.xml` from an OOXML container and collects body
//! paragraphs (with run-level bold/italic/underline) and tables in order.
//! Paragraphs whose text is blank are skipped. Table cells are flattened
//! to the non-empty texts of their paragraphs joined by single spaces;
//! nested tables flatten into the enclosing cell. Text-box paragraphs
//! follow the paragraph that anchors them; `mc:Fallback` copies are
//! skipped.

use crate::error::{Error, Result};
use crate::model::{Block, Paragraph, TextRun, WordDocument, WordTable};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Main document part inside a docx container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Walks docx body elements into a [`WordDocument`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentWalker;

impl DocumentWalker {
    /// Create a walker.
    pub fn new() -> Self {
        Self
    }

    /// Open a docx container from bytes and walk its body.
    pub fn walk(&self, data: &[u8]) -> Result<WordDocument> {
        let xml = read_zip_entry(data, DOCUMENT_PART)?;
        self.walk_xml(&xml)
    }

    /// Walk a `document.xml` body.
    pub fn walk_xml(&self, xml: &str) -> Result<WordDocument> {
        let mut reader = XmlReader::from_str(xml);
        reader.trim_text(false);
        let mut buf = Vec::new();
        let mut state = WalkState::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => state.start(&reader, e, false),
                Ok(Event::Empty(ref e)) => state.start(&reader, e, true),
                Ok(Event::Text(e)) => {
                    if state.in_text {
                        if let Ok(text) = e.unescape() {
                            state.push_text(&text);
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    state.end(name.as_ref());
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::malformed(
                        "docx",
                        format!("XML error at position {}: {}", reader.buffer_position(), e),
                    ))
                }
                _ => {}
            }
            buf.clear();
        }

        log::debug!(
            "Walked document: {} paragraphs, {} tables",
            state.doc.paragraph_count(),
            state.doc.table_count()
        );
        Ok(state.doc)
    }
}

/// Walk state. Paragraphs and runs are stacks because text boxes nest a
/// whole paragraph inside a run of the anchoring paragraph.
#[derive(Default)]
struct WalkState {
    doc: WordDocument,

    paragraphs: Vec<Paragraph>,
    runs: Vec<TextRun>,
    /// Blocks found inside an open paragraph, emitted after it closes
    deferred: Vec<Block>,
    in_run_props: bool,
    in_text: bool,
    /// Depth inside `mc:Fallback`, which repeats its `mc:Choice` sibling
    fallback_depth: usize,

    table_depth: usize,
    table: WordTable,
    row: Vec<String>,
    cell_parts: Vec<String>,
    cell_paragraph_depth: usize,
    cell_paragraph: String,
}

impl WalkState {
    fn start<B: std::io::BufRead>(&mut self, reader: &XmlReader<B>, e: &BytesStart, empty: bool) {
        let name = e.local_name();
        if name.as_ref() == b"Fallback" {
            if !empty {
                self.fallback_depth += 1;
            }
            return;
        }
        if self.fallback_depth > 0 {
            return;
        }

        match name.as_ref() {
            b"p" if !empty => {
                if self.table_depth > 0 {
                    if self.cell_paragraph_depth == 0 {
                        self.cell_paragraph.clear();
                    } else {
                        self.cell_paragraph.push(' ');
                    }
                    self.cell_paragraph_depth += 1;
                } else {
                    self.paragraphs.push(Paragraph::new());
                }
            }
            b"pStyle" => {
                if self.table_depth == 0 {
                    if let Some(p) = self.paragraphs.last_mut() {
                        p.heading_level = heading_level(attr_value(reader, e, b"val").as_deref());
                    }
                }
            }
            b"r" if !empty => self.runs.push(TextRun::default()),
            b"rPr" if !empty => {
                self.in_run_props = !self.runs.is_empty();
            }
            b"b" | b"i" | b"u" if self.in_run_props => {
                let on = toggle_value(attr_value(reader, e, b"val").as_deref());
                if let Some(run) = self.runs.last_mut() {
                    match name.as_ref() {
                        b"b" => run.bold = on,
                        b"i" => run.italic = on,
                        _ => run.underline = on,
                    }
                }
            }
            b"t" if !empty => self.in_text = true,
            b"br" | b"cr" if !self.runs.is_empty() => self.push_text("\n"),
            b"tab" if !self.runs.is_empty() => self.push_text("\t"),
            b"tbl" if !empty => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = WordTable::new();
                }
            }
            b"tr" if !empty && self.table_depth == 1 => self.row.clear(),
            b"tc" if !empty && self.table_depth == 1 => self.cell_parts.clear(),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if name == b"Fallback" && self.fallback_depth > 0 {
            self.fallback_depth -= 1;
            return;
        }
        if self.fallback_depth > 0 {
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"r" => {
                if let Some(run) = self.runs.pop() {
                    if self.table_depth > 0 {
                        self.cell_paragraph.push_str(&run.text);
                    } else if let Some(p) = self.paragraphs.last_mut() {
                        p.add_run(run);
                    }
                }
            }
            b"p" => {
                if self.table_depth > 0 {
                    self.end_cell_paragraph();
                } else if let Some(p) = self.paragraphs.pop() {
                    if !p.is_empty() {
                        self.emit(Block::Paragraph(p));
                    }
                    if self.paragraphs.is_empty() {
                        let deferred = std::mem::take(&mut self.deferred);
                        self.doc.blocks.extend(deferred);
                    }
                }
            }
            b"tc" if self.table_depth == 1 => {
                let text = self.cell_parts.join(" ");
                self.row.push(text);
            }
            b"tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.row);
                self.table.add_row(row);
            }
            b"tbl" if self.table_depth > 0 => {
                if self.table_depth == 1 {
                    let table = std::mem::take(&mut self.table);
                    if !table.is_empty() {
                        self.emit(Block::Table(table));
                    }
                }
                self.table_depth -= 1;
            }
            _ => {}
        }
    }

    fn end_cell_paragraph(&mut self) {
        self.cell_paragraph_depth = self.cell_paragraph_depth.saturating_sub(1);
        if self.cell_paragraph_depth > 0 {
            // text box inside a cell paragraph
            self.cell_paragraph.push(' ');
            return;
        }
        let text = self.cell_paragraph.trim();
        if !text.is_empty() {
            self.cell_parts.push(text.to_string());
        }
        self.cell_paragraph.clear();
    }

    /// Push a finished block, holding it back while an enclosing
    /// paragraph is still open.
    fn emit(&mut self, block: Block) {
        if self.paragraphs.is_empty() {
            self.doc.push(block);
        } else {
            self.deferred.push(block);
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.runs.last_mut() {
            run.text.push_str(text);
        }
    }
}

/// Heading level for a paragraph style id (`Heading1`..`Heading6`, `Title`).
fn heading_level(style: Option<&str>) -> Option<u8> {
    let style = style?.trim().to_ascii_lowercase();
    if style.starts_with("title") {
        return Some(1);
    }
    let digits = style.strip_prefix("heading")?.trim();
    match digits.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

/// On/off value of a run property such as `<w:b w:val="0"/>`.
fn toggle_value(val: Option<&str>) -> bool {
    !matches!(
        val.map(str::trim),
        Some("0") | Some("false") | Some("off") | Some("none")
    )
}

fn attr_value<B: std::io::BufRead>(
    reader: &XmlReader<B>,
    element: &BytesStart,
    key: &[u8],
) -> Option<String> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr.ok()?;
        if attr.key.local_name().as_ref() == key {
            if let Ok(value) = attr.decode_and_unescape_value(reader) {
                return Some(value.into_owned());
            }
        }
    }
    None
}

/// Read one entry of a zip container as UTF-8 text.
pub(crate) fn read_zip_entry(data: &[u8], name: &str) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut entry = archive
        .by_name(name)
        .map_err(|_| Error::malformed("docx", format!("missing {}", name)))?;
    let mut buffer = Vec::new();
    entry
        .read_to_end(&mut buffer)
        .map_err(|e| Error::malformed("zip", format!("{}: {}", name, e)))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn body(inner: &str) -> String {
        format!(r#"<?xml version="1.0"?><w:document {NS}><w:body>{inner}</w:body></w:document>"#)
    }

    fn walk(inner: &str) -> WordDocument {
        DocumentWalker::new().walk_xml(&body(inner)).unwrap()
    }

    #[test]
    fn test_paragraph_runs() {
        let doc = walk(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r><w:r><w:t xml:space="preserve"> plain</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.blocks.len(), 1);
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.runs.len(), 2);
        assert!(p.runs[0].bold);
        assert!(!p.runs[1].bold);
        assert_eq!(p.plain_text(), "Bold plain");
    }

    #[test]
    fn test_toggle_off_values() {
        let doc = walk(
            r#"<w:p><w:r><w:rPr><w:b w:val="0"/><w:i/><w:u w:val="none"/></w:rPr><w:t>x</w:t></w:r></w:p>"#,
        );
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(!p.runs[0].bold);
        assert!(p.runs[0].italic);
        assert!(!p.runs[0].underline);
    }

    #[test]
    fn test_paragraph_mark_props_ignored() {
        let doc = walk(
            r#"<w:p><w:pPr><w:rPr><w:b/></w:rPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(!p.runs[0].bold);
        assert_eq!(p.plain_text(), "x");
    }

    #[test]
    fn test_empty_paragraphs_skipped() {
        let doc = walk(r#"<w:p/><w:p><w:r><w:t>   </w:t></w:r></w:p><w:p><w:r><w:t>kept</w:t></w:r></w:p>"#);
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_breaks_and_tabs() {
        let doc = walk(r#"<w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t><w:tab/><w:t>c</w:t></w:r></w:p>"#);
        assert_eq!(doc.plain_text(), "a\nb\tc");
    }

    #[test]
    fn test_heading_style() {
        let doc = walk(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>"#,
        );
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.heading_level, Some(2));
    }

    #[test]
    fn test_heading_level_names() {
        assert_eq!(heading_level(Some("Title")), Some(1));
        assert_eq!(heading_level(Some("heading6")), Some(6));
        assert_eq!(heading_level(Some("Heading7")), None);
        assert_eq!(heading_level(Some("Normal")), None);
        assert_eq!(heading_level(None), None);
    }

    #[test]
    fn test_table_cells_joined() {
        let doc = walk(concat!(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc>"#,
            r#"<w:tc><w:p><w:r><w:t>Role</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t> Ann </w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Lee</w:t></w:r></w:p></w:tc>"#,
            r#"<w:tc><w:p><w:r><w:t>Dev</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        ));
        let Block::Table(t) = &doc.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(t.rows, vec![vec!["Name", "Role"], vec!["Ann Lee", "Dev"]]);
    }

    #[test]
    fn test_nested_table_flattened() {
        let doc = walk(concat!(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p>"#,
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            r#"</w:tc></w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        ));
        assert_eq!(doc.blocks.len(), 2);
        let Block::Table(t) = &doc.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(t.rows, vec![vec!["outer inner"]]);
        assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
    }

    #[test]
    fn test_body_order() {
        let doc = walk(concat!(
            r#"<w:p><w:r><w:t>one</w:t></w:r></w:p>"#,
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            r#"<w:p><w:r><w:t>two</w:t></w:r></w:p>"#,
        ));
        assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
        assert!(matches!(doc.blocks[1], Block::Table(_)));
        assert!(matches!(doc.blocks[2], Block::Paragraph(_)));
    }

    fn text_box(text: &str) -> String {
        format!(
            r#"<w:txbxContent><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:txbxContent>"#
        )
    }

    #[test]
    fn test_text_box_keeps_anchor_paragraph() {
        let boxed = text_box("box");
        let doc = walk(&format!(
            concat!(
                r#"<w:p><w:r><w:t xml:space="preserve">before </w:t></w:r>"#,
                r#"<w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing>{0}</w:drawing></mc:Choice>"#,
                r#"<mc:Fallback><w:pict>{0}</w:pict></mc:Fallback></mc:AlternateContent></w:r>"#,
                r#"<w:r><w:t>after</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>next</w:t></w:r></w:p>"#,
            ),
            boxed
        ));

        let texts: Vec<String> = doc
            .blocks
            .iter()
            .map(|b| match b {
                Block::Paragraph(p) => p.plain_text(),
                Block::Table(t) => t.plain_text(),
            })
            .collect();
        assert_eq!(texts, vec!["before after", "box", "next"]);
    }

    #[test]
    fn test_text_box_in_table_cell() {
        let doc = walk(&format!(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>left</w:t></w:r><w:r>{}</w:r><w:r><w:t>right</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            text_box("boxed")
        ));
        let Block::Table(t) = &doc.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(t.rows, vec![vec!["left boxed right"]]);
    }

    #[test]
    fn test_not_a_zip() {
        let err = DocumentWalker::new().walk(b"plain text").unwrap_err();
        assert!(err.is_retryable());
    }
}
