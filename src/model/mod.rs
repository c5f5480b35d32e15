//! Document model types.
//!
//! This module defines the intermediate representation that sits between
//! the format walkers and the HTML renderers. Walkers produce these types;
//! renderers only read them.

mod cell;
mod document;
mod raw;
mod table;
mod workbook;

pub use cell::{CellCategory, CellDescriptor, CellValue, FormulaResult, ERROR_SENTINEL};
pub use document::{Block, Paragraph, TextRun, WordDocument, WordTable};
pub use raw::{ParsedRow, RawDocument};
pub use table::{
    detect_header, ColumnLabels, TableLimits, TableModel, TableRow, DEFAULT_MAX_COLUMNS,
    DEFAULT_MAX_ROWS,
};
pub use workbook::{Sheet, SheetContent, Workbook};
