//! Format detection: extension families, target representations,
//! content types and container sniffing.

use crate::error::{Error, Result};
use serde::Serialize;

/// Extensions rendered by the delimited-text path.
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Extensions rendered by the spreadsheet path.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Extensions rendered by the word-processing path.
const WORD_EXTENSIONS: &[&str] = &["docx", "doc"];

/// ZIP local file header magic (OOXML and ODF containers).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// OLE2 compound file magic (legacy .doc/.xls).
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Fallback content type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type of every HTML preview.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// A family of documents sharing one walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFamily {
    /// CSV and plain text tables.
    Delimited,
    /// Workbooks (xlsx, xls, ods, ...).
    Spreadsheet,
    /// Word-processing documents (docx, doc).
    WordProcessing,
}

impl DocumentFamily {
    /// All families, in registration order.
    pub const ALL: [DocumentFamily; 3] = [
        DocumentFamily::Delimited,
        DocumentFamily::Spreadsheet,
        DocumentFamily::WordProcessing,
    ];

    /// Look up the family for a lowercase extension (without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| family.extensions().contains(&ext.as_str()))
    }

    /// Extensions belonging to this family.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFamily::Delimited => DELIMITED_EXTENSIONS,
            DocumentFamily::Spreadsheet => SPREADSHEET_EXTENSIONS,
            DocumentFamily::WordProcessing => WORD_EXTENSIONS,
        }
    }

    /// Short name used in logs and statistics.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFamily::Delimited => "csv",
            DocumentFamily::Spreadsheet => "spreadsheet",
            DocumentFamily::WordProcessing => "word",
        }
    }
}

impl std::fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output representation requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// Self-contained HTML page.
    #[default]
    Html,
}

impl TargetFormat {
    /// Parse a target name (case-insensitive). Only `html` is supported.
    pub fn parse(target: &str) -> Result<Self> {
        match target.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(TargetFormat::Html),
            _ => Err(Error::UnsupportedTarget(target.to_string())),
        }
    }
}

/// Physical container of an office document, from its magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// ZIP archive (docx, xlsx, ods).
    Zip,
    /// OLE2 compound file (doc, xls).
    Ole,
    /// Anything else (plain text, unknown binary).
    Other,
}

/// Sniff the container type from the leading bytes.
pub fn sniff_container(data: &[u8]) -> Container {
    if data.starts_with(ZIP_MAGIC) {
        Container::Zip
    } else if data.starts_with(OLE_MAGIC) {
        Container::Ole
    } else {
        Container::Other
    }
}

/// Extract the lowercase extension (without the dot) from a filename.
///
/// Returns `None` when there is no dot or the name ends with one.
pub fn extract_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.trim().rsplit_once('.')?;
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Best-guess content type for a filename, derived purely from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extract_extension(filename) {
        Some(ext) => content_type_for_extension(&ext),
        None => OCTET_STREAM,
    }
}

/// Content type for a lowercase extension (without the dot).
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsm" => "application/vnd.ms-excel.sheet.macroEnabled.12",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        "msg" => "application/vnd.ms-outlook",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_extension() {
        assert_eq!(extract_extension("report.CSV"), Some("csv".to_string()));
        assert_eq!(extract_extension("a.b.xlsx"), Some("xlsx".to_string()));
        assert_eq!(extract_extension("noext"), None);
        assert_eq!(extract_extension("trailing."), None);
        assert_eq!(extract_extension("dir.d/file"), None);
    }

    #[test]
    fn test_family_lookup() {
        assert_eq!(
            DocumentFamily::from_extension("csv"),
            Some(DocumentFamily::Delimited)
        );
        assert_eq!(
            DocumentFamily::from_extension("XLSX"),
            Some(DocumentFamily::Spreadsheet)
        );
        assert_eq!(
            DocumentFamily::from_extension("doc"),
            Some(DocumentFamily::WordProcessing)
        );
        assert_eq!(DocumentFamily::from_extension("pdf"), None);
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(TargetFormat::parse("html").unwrap(), TargetFormat::Html);
        assert_eq!(TargetFormat::parse("HTML").unwrap(), TargetFormat::Html);
        assert!(matches!(
            TargetFormat::parse("pdf"),
            Err(Error::UnsupportedTarget(_))
        ));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("a.csv"), "text/csv");
        assert_eq!(content_type_for("a.DOC"), "application/msword");
        assert_eq!(content_type_for("a.unknown"), OCTET_STREAM);
        assert_eq!(content_type_for("no_extension"), OCTET_STREAM);
    }

    #[test]
    fn test_sniff_container() {
        assert_eq!(sniff_container(b"PK\x03\x04rest"), Container::Zip);
        assert_eq!(
            sniff_container(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0]),
            Container::Ole
        );
        assert_eq!(sniff_container(b"a,b,c"), Container::Other);
        assert_eq!(sniff_container(b""), Container::Other);
    }
}
