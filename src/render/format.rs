//! Escaping and value formatting shared by all renderers.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

/// Default date rendering, e.g. `Jan 05, 2024 14:30`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y %H:%M";

/// Title used when no name can be derived from the filename.
pub const DEFAULT_DOCUMENT_NAME: &str = "Document";

/// Escape text for HTML element content and quoted attributes.
///
/// Newlines become `<br>`. Escaping is one-shot: applying it twice
/// double-encodes `&`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a number with thousands separators and at most two decimals.
///
/// Trailing zeros in the fraction are dropped: `1000000.0` gives
/// `1,000,000`, `3.14159` gives `3.14`, `2.50` gives `2.5`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Format a numeric spreadsheet cell.
///
/// Integral values within the `i64` range render as plain integers
/// without separators; everything else goes through [`format_number`].
pub fn format_cell_number(value: f64) -> String {
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value <= i64::MAX as f64
    {
        (value as i64).to_string()
    } else {
        format_number(value)
    }
}

/// Format a date-time with a strftime pattern.
///
/// An invalid pattern falls back to [`DEFAULT_DATE_FORMAT`].
pub fn format_datetime(value: &NaiveDateTime, pattern: &str) -> String {
    let items = if is_valid_date_format(pattern) {
        StrftimeItems::new(pattern)
    } else {
        StrftimeItems::new(DEFAULT_DATE_FORMAT)
    };
    value.format_with_items(items).to_string()
}

/// Whether a strftime pattern parses cleanly.
pub fn is_valid_date_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Human-readable document name derived from a filename.
///
/// Drops the extension, turns `_` and `-` into spaces and title-cases
/// each word: `quarterly_sales-REPORT.csv` becomes `Quarterly Sales Report`.
pub fn document_name(filename: &str) -> String {
    let filename = filename.trim();
    let stem = match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    };

    let name = stem
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        DEFAULT_DOCUMENT_NAME.to_string()
    } else {
        name
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a>&'\"\n"),
            "&lt;a&gt;&amp;&#x27;&quot;<br>"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_escape_is_one_shot() {
        let once = escape_html("a & b");
        assert_eq!(once, "a &amp; b");
        assert_eq!(escape_html(&once), "a &amp;amp; b");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(3.14159), "3.14");
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-1234.567), "-1,234.57");
        assert_eq!(format_number(0.001), "0");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(999.999), "1,000");
    }

    #[test]
    fn test_format_cell_number() {
        assert_eq!(format_cell_number(1_000_000.0), "1000000");
        assert_eq!(format_cell_number(-42.0), "-42");
        assert_eq!(format_cell_number(1234.5), "1,234.5");
        assert_eq!(format_cell_number(1e20), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(format_datetime(&dt, DEFAULT_DATE_FORMAT), "Jan 05, 2024 14:30");
        assert_eq!(format_datetime(&dt, "%Y-%m-%d"), "2024-01-05");
        assert_eq!(format_datetime(&dt, "%"), "Jan 05, 2024 14:30");
    }

    #[test]
    fn test_document_name() {
        assert_eq!(
            document_name("quarterly_sales-REPORT.csv"),
            "Quarterly Sales Report"
        );
        assert_eq!(document_name("notes"), "Notes");
        assert_eq!(document_name(".hidden"), ".hidden");
        assert_eq!(document_name(""), "Document");
        assert_eq!(document_name("__.csv"), "Document");
    }
}
