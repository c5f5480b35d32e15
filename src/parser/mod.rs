//! Format walkers: delimited text, spreadsheets, word-processing documents
//! and best-effort text extraction.

pub mod csv;
pub mod docx;
pub mod spreadsheet;
pub mod text;

pub use csv::{decode_text, parse_line, DelimitedTextParser};
pub use docx::DocumentWalker;
pub use spreadsheet::{column_name, describe, SpreadsheetWalker};
pub use text::extract_text;
