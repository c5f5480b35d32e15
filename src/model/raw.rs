//! Input-side types: raw documents and parsed delimited rows.

use crate::detect::extract_extension;
use serde::{Deserialize, Serialize};

/// An uploaded document: its bytes plus the filename it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Document content
    pub content: Vec<u8>,
    /// Original filename, used for extension dispatch and titles
    pub filename: String,
}

impl RawDocument {
    /// Create a raw document.
    pub fn new(content: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }

    /// Lowercase extension of the filename, if any.
    pub fn extension(&self) -> Option<String> {
        extract_extension(&self.filename)
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One record of delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedRow {
    fields: Vec<String>,
}

impl ParsedRow {
    /// Create a row from its fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `index`, or `None` when the row is shorter.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// All fields in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// A row is empty when every field is blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

impl From<Vec<String>> for ParsedRow {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}
