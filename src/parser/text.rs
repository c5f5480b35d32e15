//! Best-effort plain-text extraction.
//!
//! Used when a structured walker gave up on a document. Nothing here is
//! exact: zip containers yield the text nodes of their main XML parts,
//! OLE compound files yield UTF-16 runs from their main stream, and
//! anything else is decoded as text with a legacy-encoding fallback.

use crate::detect::{sniff_container, Container, DocumentFamily};
use encoding_rs::{Encoding, WINDOWS_1252};
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use std::collections::HashSet;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Minimum UTF-16 run length kept from OLE streams.
const MIN_RUN_LEN: usize = 3;

/// Share of control characters above which decoded text is rejected.
const MAX_CONTROL_RATIO: f64 = 0.05;

/// XML parts holding document text, by preference.
const XML_TEXT_PARTS: &[&str] = &[
    "word/document.xml",
    "xl/sharedStrings.xml",
    "content.xml",
];

/// OLE streams holding document text, by preference.
const OLE_TEXT_STREAMS: &[&str] = &["WordDocument", "Workbook", "Book"];

/// OLE directory names that show up as UTF-16 runs but are not content.
const OLE_NOISE: &[&str] = &[
    "Root Entry",
    "SummaryInformation",
    "DocumentSummaryInformation",
    "WordDocument",
    "Workbook",
    "0Table",
    "1Table",
    "CompObj",
    "Normal.dotm",
];

/// Extract readable text from a document, or `None` when nothing usable
/// was found.
pub fn extract_text(data: &[u8], family: DocumentFamily) -> Option<String> {
    let text = match sniff_container(data) {
        Container::Zip => extract_zip_text(data),
        Container::Ole => extract_ole_text(data),
        Container::Other => decode_lossy(data, family),
    }?;

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn extract_zip_text(data: &[u8]) -> Option<String> {
    let mut archive = ZipArchive::new(Cursor::new(data)).ok()?;
    for part in XML_TEXT_PARTS {
        let Ok(mut entry) = archive.by_name(part) else {
            continue;
        };
        let mut xml = String::new();
        if entry.read_to_string(&mut xml).is_err() {
            continue;
        }
        let text = xml_text(&xml);
        if !text.trim().is_empty() {
            log::debug!("Extracted text from zip part {}", part);
            return Some(text);
        }
    }
    None
}

/// Text nodes of an XML document; paragraph-like elements end a line.
pub fn xml_text(xml: &str) -> String {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut line = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                if let Ok(text) = e.unescape() {
                    line.push_str(&text);
                }
            }
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => line.push('\t'),
                b"br" | b"line-break" => line.push(' '),
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if matches!(e.local_name().as_ref(), b"p" | b"h" | b"si" | b"tr") {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        out.push_str(trimmed);
                        out.push('\n');
                    }
                    line.clear();
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    let trimmed = line.trim();
    if !trimmed.is_empty() {
        out.push_str(trimmed);
    }
    out
}

fn extract_ole_text(data: &[u8]) -> Option<String> {
    let mut ole = cfb::CompoundFile::open(Cursor::new(data)).ok()?;
    for name in OLE_TEXT_STREAMS {
        let Ok(mut stream) = ole.open_stream(name) else {
            continue;
        };
        let mut bytes = Vec::new();
        if stream.read_to_end(&mut bytes).is_err() {
            continue;
        }
        let text = extract_utf16_text(&bytes);
        if !text.trim().is_empty() {
            log::debug!("Extracted text from OLE stream {}", name);
            return Some(text);
        }
    }
    None
}

/// Runs of printable UTF-16LE code units, one run per line.
///
/// Surrogates and control characters end a run; runs shorter than three
/// units, OLE directory names and duplicates are dropped.
pub fn extract_utf16_text(data: &[u8]) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut current: Vec<u16> = Vec::new();

    for pair in data.chunks_exact(2) {
        let unit = u16::from_le_bytes([pair[0], pair[1]]);
        let printable = unit >= 0x20 && !(0xD800..=0xDFFF).contains(&unit) && unit < 0xFFFE;
        if printable {
            current.push(unit);
        } else if unit == 0x0D || unit == 0x0A {
            current.push(0x0A);
        } else {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);

    let mut seen = HashSet::new();
    runs.iter()
        .flat_map(|run| run.lines())
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_RUN_LEN && !OLE_NOISE.contains(line))
        .filter(|line| seen.insert(line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn flush_run(current: &mut Vec<u16>, runs: &mut Vec<String>) {
    if current.len() >= MIN_RUN_LEN {
        runs.push(String::from_utf16_lossy(current));
    }
    current.clear();
}

fn decode_lossy(data: &[u8], family: DocumentFamily) -> Option<String> {
    let text = if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        encoding
            .decode_without_bom_handling(&data[bom_len..])
            .0
            .into_owned()
    } else if let Ok(text) = std::str::from_utf8(data) {
        text.to_string()
    } else {
        let (text, _, _) = WINDOWS_1252.decode(data);
        log::debug!("Decoded {} content as windows-1252", family);
        text.into_owned()
    };

    if looks_like_text(&text) {
        Some(text)
    } else {
        None
    }
}

fn looks_like_text(text: &str) -> bool {
    let total = text.chars().count();
    if total == 0 {
        return false;
    }
    let control = text
        .chars()
        .filter(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        .count();
    (control as f64 / total as f64) <= MAX_CONTROL_RATIO
}
