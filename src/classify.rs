//! Semantic cell classification.
//!
//! Maps the text of a cell to a [`CellCategory`] used purely for styling.
//! Rules are tried in order and the first match wins; every input maps to
//! exactly one category.

use crate::model::CellCategory;
use regex::Regex;
use std::sync::OnceLock;

/// Text longer than this many characters is classified as large text.
pub const LARGE_TEXT_THRESHOLD: usize = 100;

struct Patterns {
    number: Regex,
    email: Regex,
    url: Regex,
    dates: [Regex; 3],
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        number: Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap(),
        email: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap(),
        url: Regex::new(r"^(https?://)?(www\.)?[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(/.*)?$").unwrap(),
        dates: [
            Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").unwrap(),
            Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap(),
            Regex::new(r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}$").unwrap(),
        ],
    })
}

/// Classify the text of a cell.
pub fn classify(text: &str) -> CellCategory {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CellCategory::None;
    }

    let p = patterns();
    if p.number.is_match(trimmed) {
        CellCategory::Number
    } else if p.email.is_match(trimmed) {
        CellCategory::Email
    } else if p.url.is_match(trimmed) {
        CellCategory::Url
    } else if p.dates.iter().any(|re| re.is_match(trimmed)) {
        CellCategory::Date
    } else if trimmed.chars().count() > LARGE_TEXT_THRESHOLD {
        CellCategory::LargeText
    } else {
        CellCategory::None
    }
}

/// Whether the trimmed text is a plain decimal number.
///
/// Used by header detection, where only the number rule matters.
pub fn is_numeric(text: &str) -> bool {
    patterns().number.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_none() {
        assert_eq!(classify(""), CellCategory::None);
        assert_eq!(classify("   \t"), CellCategory::None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(classify("42"), CellCategory::Number);
        assert_eq!(classify("-3.5"), CellCategory::Number);
        assert_eq!(classify("  7  "), CellCategory::Number);
        assert_ne!(classify("1,000"), CellCategory::Number);
        assert_ne!(classify("3."), CellCategory::Number);
        assert_ne!(classify("+3"), CellCategory::Number);
    }

    #[test]
    fn test_email_and_url() {
        assert_eq!(classify("jane.doe@example.com"), CellCategory::Email);
        assert_eq!(classify("https://example.com/path?q=1"), CellCategory::Url);
        assert_eq!(classify("www.example.org"), CellCategory::Url);
        assert_eq!(classify("example.io"), CellCategory::Url);
    }

    #[test]
    fn test_dates() {
        assert_eq!(classify("1/2/2024"), CellCategory::Date);
        assert_eq!(classify("12/31/1999"), CellCategory::Date);
        assert_eq!(classify("2024-01-15"), CellCategory::Date);
        assert_eq!(classify("15-1-2024"), CellCategory::Date);
        assert_ne!(classify("2024/01/15"), CellCategory::Date);
    }

    #[test]
    fn test_decimal_looks_like_number_not_url() {
        assert_eq!(classify("3.14"), CellCategory::Number);
    }

    #[test]
    fn test_large_text() {
        let long = "word ".repeat(30);
        assert_eq!(classify(&long), CellCategory::LargeText);
        let exactly = "a".repeat(LARGE_TEXT_THRESHOLD);
        assert_eq!(classify(&exactly), CellCategory::None);
        let multibyte = "é".repeat(LARGE_TEXT_THRESHOLD);
        assert_eq!(classify(&multibyte), CellCategory::None);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(classify("hello world"), CellCategory::None);
        assert_eq!(classify("Name"), CellCategory::None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("10"));
        assert!(is_numeric(" 10.5 "));
        assert!(!is_numeric("ten"));
        assert!(!is_numeric(""));
    }
}
