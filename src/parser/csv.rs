//! Delimited text parsing.
//!
//! Records are split on `\n` and `\r\n`; fields on commas outside quotes.
//! Inside a quoted region a doubled quote is a literal quote, while a lone
//! quote toggles the region. Lines that are blank after trimming never
//! produce rows.
//!
//! By default splitting is line-first: a newline always ends the record,
//! even inside quotes. [`DelimitedTextParser::multiline`] switches to
//! quote-aware record assembly so that quoted newlines stay in their field.

use crate::error::{Error, Result};
use crate::model::ParsedRow;
use encoding_rs::Encoding;

/// Parser for comma-separated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedTextParser {
    multiline: bool,
}

impl DelimitedTextParser {
    /// Create a line-first parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep newlines inside quoted fields instead of ending the record.
    pub fn multiline(mut self, enabled: bool) -> Self {
        self.multiline = enabled;
        self
    }

    /// Decode and parse raw bytes.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Vec<ParsedRow>> {
        let text = decode_text(data)?;
        Ok(self.parse(&text))
    }

    /// Parse text into rows. Row widths are left as found.
    pub fn parse(&self, text: &str) -> Vec<ParsedRow> {
        let mut records = RecordBuilder::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    records.blank = false;
                    if in_quotes && chars.peek() == Some(&'"') {
                        records.field.push('"');
                        chars.next();
                    } else {
                        in_quotes = !in_quotes;
                    }
                }
                ',' if !in_quotes => {
                    records.blank = false;
                    records.end_field();
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' if self.multiline && in_quotes => records.field.push('\n'),
                '\n' => {
                    records.end_record();
                    in_quotes = false;
                }
                _ => {
                    if c > ' ' {
                        records.blank = false;
                    }
                    records.field.push(c);
                }
            }
        }
        records.end_record();

        records.rows
    }
}

struct RecordBuilder {
    rows: Vec<ParsedRow>,
    fields: Vec<String>,
    field: String,
    /// No character above U+0020 seen in the current record
    blank: bool,
}

impl RecordBuilder {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            fields: Vec::new(),
            field: String::new(),
            blank: true,
        }
    }

    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
    }

    fn end_record(&mut self) {
        if self.blank {
            self.fields.clear();
            self.field.clear();
        } else {
            self.end_field();
            self.rows.push(ParsedRow::new(std::mem::take(&mut self.fields)));
        }
        self.blank = true;
    }
}

/// Parse a single line with the line-first rules.
pub fn parse_line(line: &str) -> Vec<String> {
    DelimitedTextParser::new()
        .parse(line)
        .into_iter()
        .next()
        .map(|row| row.fields().to_vec())
        .unwrap_or_else(|| vec![String::new()])
}

/// Decode delimited text bytes.
///
/// UTF-8 and UTF-16 are accepted when marked with a byte-order mark;
/// otherwise the content must be valid UTF-8.
pub fn decode_text(data: &[u8]) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&data[bom_len..]);
        if had_errors {
            return Err(Error::malformed(
                "csv",
                format!("invalid {} sequence", encoding.name()),
            ));
        }
        return Ok(text.into_owned());
    }

    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|e| Error::malformed("csv", format!("invalid UTF-8 at byte {}", e.valid_up_to())))
}
