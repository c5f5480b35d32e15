//! Cell-level types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel shown for error cells and failed extractions.
pub const ERROR_SENTINEL: &str = "#ERROR!";

/// A raw spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// No content
    Empty,
    /// Literal text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Numeric value carrying a date format
    Date(NaiveDateTime),
    /// Formula with its last cached result, if any
    Formula {
        /// Formula text without the leading `=`
        expression: String,
        /// Cached evaluation result
        cached: Option<FormulaResult>,
    },
    /// Error value (#DIV/0!, #REF!, ...)
    Error,
}

impl CellValue {
    /// Check if the cell has no content.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Cached result of a formula cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FormulaResult {
    /// Numeric result
    Number(f64),
    /// Numeric result carrying a date format
    Date(NaiveDateTime),
    /// Text result
    Text(String),
    /// Boolean result
    Boolean(bool),
}

/// Semantic category of a cell, used for styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellCategory {
    /// No special category
    #[default]
    None,
    /// Numeric value
    Number,
    /// Date value
    Date,
    /// Email address
    Email,
    /// Web address
    Url,
    /// Boolean value
    Boolean,
    /// Formula source
    Formula,
    /// Error value
    Error,
    /// Text longer than the large-text threshold
    LargeText,
}

impl CellCategory {
    /// CSS class applied to cells of this category.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            CellCategory::None => None,
            CellCategory::Number => Some("number"),
            CellCategory::Date => Some("date"),
            CellCategory::Email => Some("email"),
            CellCategory::Url => Some("url"),
            CellCategory::Boolean => Some("boolean"),
            CellCategory::Formula => Some("formula"),
            CellCategory::Error => Some("error"),
            CellCategory::LargeText => Some("large-text"),
        }
    }
}

/// Display text plus category for one rendered cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellDescriptor {
    /// Unescaped display text
    pub text: String,
    /// Styling category
    pub category: CellCategory,
}

impl CellDescriptor {
    /// Create a descriptor.
    pub fn new(text: impl Into<String>, category: CellCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// Create an empty descriptor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Descriptor for an error cell.
    pub fn error() -> Self {
        Self::new(ERROR_SENTINEL, CellCategory::Error)
    }

    /// Check if the display text is blank.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class() {
        assert_eq!(CellCategory::None.css_class(), None);
        assert_eq!(CellCategory::LargeText.css_class(), Some("large-text"));
        assert_eq!(CellCategory::Number.css_class(), Some("number"));
    }

    #[test]
    fn test_empty_values() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(CellValue::Text("  ".into()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::Error.is_empty());
    }

    #[test]
    fn test_error_descriptor() {
        let d = CellDescriptor::error();
        assert_eq!(d.text, "#ERROR!");
        assert_eq!(d.category, CellCategory::Error);
    }
}
