//! Table types shared by the delimited-text and spreadsheet paths.

use super::{CellDescriptor, ParsedRow};
use crate::classify::{classify, is_numeric};
use crate::parser::column_name;
use serde::{Deserialize, Serialize};

/// Default cap on rendered data rows.
pub const DEFAULT_MAX_ROWS: usize = 2000;

/// Default cap on rendered columns.
pub const DEFAULT_MAX_COLUMNS: usize = 100;

/// Row and column caps applied while building a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLimits {
    /// Maximum number of data rows rendered
    pub max_rows: usize,
    /// Maximum number of columns rendered
    pub max_columns: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

/// How column headers are labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "labels", rename_all = "snake_case")]
pub enum ColumnLabels {
    /// Labels taken from a detected header row
    Header(Vec<String>),
    /// `Column 1`, `Column 2`, ...
    Numbered,
    /// Spreadsheet letters `A`, `B`, ..., `AA`
    Letters,
}

impl ColumnLabels {
    /// Label for the column at `index`.
    pub fn label(&self, index: usize) -> String {
        match self {
            ColumnLabels::Header(labels) => match labels.get(index) {
                Some(label) if !label.is_empty() => label.clone(),
                _ => numbered(index),
            },
            ColumnLabels::Numbered => numbered(index),
            ColumnLabels::Letters => column_name(index),
        }
    }

    /// Whether labels come from the document itself.
    pub fn is_header(&self) -> bool {
        matches!(self, ColumnLabels::Header(_))
    }
}

fn numbered(index: usize) -> String {
    format!("Column {}", index + 1)
}

/// A rendered data row with its display number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Number shown in the row-header column
    pub number: usize,
    /// Cells, exactly `column_count` of them
    pub cells: Vec<CellDescriptor>,
}

/// A capped, render-ready table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableModel {
    /// Column header labels
    pub labels: ColumnLabels,

    /// Rendered data rows
    pub rows: Vec<TableRow>,

    /// Number of rendered columns (after the column cap)
    pub column_count: usize,

    /// Number of columns in the source
    pub total_columns: usize,

    /// Non-empty row count shown in the summary
    pub total_rows: usize,

    /// Non-empty data rows offered to the table, rendered or not
    pub available_rows: usize,

    /// Whether the row cap cut off data rows
    pub rows_truncated: bool,

    /// Whether the column cap cut off columns
    pub columns_truncated: bool,

    limits: TableLimits,
}

impl TableModel {
    /// Create an empty table for `total_columns` source columns.
    pub fn new(labels: ColumnLabels, total_columns: usize, limits: TableLimits) -> Self {
        let column_count = total_columns.min(limits.max_columns);
        Self {
            labels,
            rows: Vec::new(),
            column_count,
            total_columns,
            total_rows: 0,
            available_rows: 0,
            rows_truncated: false,
            columns_truncated: column_count < total_columns,
            limits,
        }
    }

    /// Build a table from delimited rows.
    ///
    /// Empty rows are dropped before numbering, so data rows are numbered
    /// `1..n` in emission order. The header row, when detected, becomes the
    /// column labels and still counts towards `total_rows`.
    pub fn from_delimited(rows: &[ParsedRow], limits: TableLimits) -> Self {
        let total_columns = rows.iter().map(ParsedRow::len).max().unwrap_or(0);
        let has_header = detect_header(rows);

        let labels = match rows.first() {
            Some(first) if has_header => ColumnLabels::Header(
                first.fields().iter().map(|f| f.trim().to_string()).collect(),
            ),
            _ => ColumnLabels::Numbered,
        };

        let mut table = Self::new(labels, total_columns, limits);
        let skip = usize::from(has_header);

        for row in rows.iter().skip(skip).filter(|r| !r.is_empty()) {
            if !table.accepts_rows() {
                table.note_overflow_row();
                continue;
            }
            let number = table.rows.len() + 1;
            let cells = (0..table.column_count)
                .map(|i| {
                    let text = row.get(i).unwrap_or_default();
                    CellDescriptor::new(text, classify(text))
                })
                .collect();
            table.push_row(number, cells);
        }

        table.total_rows = rows.iter().filter(|r| !r.is_empty()).count();
        table
    }

    /// Whether another data row still fits under the row cap.
    pub fn accepts_rows(&self) -> bool {
        self.rows.len() < self.limits.max_rows
    }

    /// Append a non-empty data row.
    ///
    /// Cells are padded or cut to `column_count`. Rows beyond the row cap
    /// are counted but not stored.
    pub fn push_row(&mut self, number: usize, mut cells: Vec<CellDescriptor>) {
        if !self.accepts_rows() {
            self.note_overflow_row();
            return;
        }
        cells.resize_with(self.column_count, CellDescriptor::empty);
        self.rows.push(TableRow { number, cells });
        self.available_rows += 1;
        self.total_rows += 1;
    }

    /// Count a non-empty data row that did not fit under the row cap.
    pub fn note_overflow_row(&mut self) {
        self.rows_truncated = true;
        self.available_rows += 1;
        self.total_rows += 1;
    }

    /// Check if the table has no data rows and no header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && !self.labels.is_header() && !self.rows_truncated
    }

    /// The limits this table was built with.
    pub fn limits(&self) -> TableLimits {
        self.limits
    }

    /// Count of rendered cells.
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.column_count
    }
}

/// Header heuristic for delimited data.
///
/// Among the non-blank cells of the first row, a header is present when
/// non-numeric cells outnumber numeric ones and the document has more
/// than one row.
pub fn detect_header(rows: &[ParsedRow]) -> bool {
    let Some(first) = rows.first() else {
        return false;
    };

    let (numbers, texts) = first
        .fields()
        .iter()
        .filter(|f| !f.trim().is_empty())
        .fold((0usize, 0usize), |(n, t), f| {
            if is_numeric(f) {
                (n + 1, t)
            } else {
                (n, t + 1)
            }
        });

    texts > numbers && rows.len() > 1
}
