//! Spreadsheet walking.
//!
//! Opens xlsx/xlsm/xls/ods workbooks with calamine and turns every sheet
//! into a [`TableModel`] labelled with spreadsheet column letters. A sheet
//! that cannot be read becomes a failed [`Sheet`] instead of aborting the
//! workbook.

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::model::{
    CellCategory, CellDescriptor, CellValue, ColumnLabels, FormulaResult, Sheet, TableLimits,
    TableModel, Workbook,
};
use crate::render::format::{format_cell_number, format_datetime, DEFAULT_DATE_FORMAT};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use std::io::Cursor;

/// Bijective base-26 column name: `0 → A`, `25 → Z`, `26 → AA`, `702 → AAA`.
pub fn column_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Walks a workbook into sheets of display cells.
#[derive(Debug, Clone)]
pub struct SpreadsheetWalker {
    limits: TableLimits,
    date_format: String,
}

impl Default for SpreadsheetWalker {
    fn default() -> Self {
        Self::new(TableLimits::default())
    }
}

impl SpreadsheetWalker {
    /// Create a walker with the given caps.
    pub fn new(limits: TableLimits) -> Self {
        Self {
            limits,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Set the strftime pattern for date cells.
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Open a workbook from bytes and walk all of its sheets.
    pub fn walk(&self, data: &[u8]) -> Result<Workbook> {
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))
            .map_err(|e| Error::malformed("spreadsheet", e.to_string()))?;

        let mut workbook = Workbook::new();
        for name in sheets.sheet_names() {
            let values = match sheets.worksheet_range(&name) {
                Ok(range) => range,
                Err(e) => {
                    log::warn!("Failed to read sheet '{}': {}", name, e);
                    workbook.sheets.push(Sheet::failed(name, e.to_string()));
                    continue;
                }
            };
            let formulas = match sheets.worksheet_formula(&name) {
                Ok(range) => Some(range),
                Err(e) => {
                    log::debug!("No formulas for sheet '{}': {}", name, e);
                    None
                }
            };

            let table = self.walk_sheet(&values, formulas.as_ref());
            log::debug!(
                "Sheet '{}': {} rows, {} columns",
                name,
                table.total_rows,
                table.total_columns
            );
            workbook.sheets.push(Sheet::loaded(name, table));
        }

        Ok(workbook)
    }

    /// Build the table for one sheet.
    ///
    /// Row numbers are sheet row numbers: empty rows are skipped but
    /// still advance the index.
    pub fn walk_sheet(&self, values: &Range<Data>, formulas: Option<&Range<String>>) -> TableModel {
        let value_end = values.end();
        let formula_end = formulas.and_then(|f| f.end());
        let (last_row, last_col) = match (value_end, formula_end) {
            (Some(v), Some(f)) => (v.0.max(f.0), v.1.max(f.1)),
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => {
                return TableModel::new(ColumnLabels::Letters, 0, self.limits);
            }
        };

        let total_columns = last_col as usize + 1;
        let mut table = TableModel::new(ColumnLabels::Letters, total_columns, self.limits);

        for row in 0..=last_row {
            let cells: Vec<CellValue> = (0..=last_col)
                .map(|col| cell_value(values, formulas, row, col))
                .collect();
            if cells.iter().all(CellValue::is_empty) {
                continue;
            }
            if !table.accepts_rows() {
                table.note_overflow_row();
                continue;
            }

            let descriptors = cells
                .iter()
                .take(table.column_count)
                .map(|value| describe(value, &self.date_format))
                .collect();
            table.push_row(row as usize + 1, descriptors);
        }

        table
    }
}

/// Resolve the cell at an absolute position into a [`CellValue`].
fn cell_value(
    values: &Range<Data>,
    formulas: Option<&Range<String>>,
    row: u32,
    col: u32,
) -> CellValue {
    let data = values.get_value((row, col));
    let expression = formulas
        .and_then(|f| f.get_value((row, col)))
        .filter(|f| !f.is_empty());

    if let Some(expression) = expression {
        return CellValue::Formula {
            expression: expression.trim_start_matches('=').to_string(),
            cached: data.and_then(formula_result),
        };
    }

    match data {
        Some(data) => data_value(data),
        None => CellValue::Empty,
    }
}

fn data_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.replace('\r', "")),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_datetime() {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Error,
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Error,
    }
}

fn formula_result(data: &Data) -> Option<FormulaResult> {
    match data_value(data) {
        CellValue::Number(n) => Some(FormulaResult::Number(n)),
        CellValue::Date(d) => Some(FormulaResult::Date(d)),
        CellValue::Text(s) => Some(FormulaResult::Text(s)),
        CellValue::Boolean(b) => Some(FormulaResult::Boolean(b)),
        _ => None,
    }
}

/// Display text and category for a cell value.
///
/// A formula shows its cached result when one exists, otherwise `=` and
/// the formula text; its category is always [`CellCategory::Formula`].
pub fn describe(value: &CellValue, date_format: &str) -> CellDescriptor {
    match value {
        CellValue::Empty => CellDescriptor::empty(),
        CellValue::Text(s) => CellDescriptor::new(s.clone(), classify(s)),
        CellValue::Number(n) => CellDescriptor::new(format_cell_number(*n), CellCategory::Number),
        CellValue::Boolean(b) => CellDescriptor::new(bool_text(*b), CellCategory::Boolean),
        CellValue::Date(d) => {
            CellDescriptor::new(format_datetime(d, date_format), CellCategory::Date)
        }
        CellValue::Formula { expression, cached } => {
            let text = match cached {
                Some(FormulaResult::Number(n)) => format_cell_number(*n),
                Some(FormulaResult::Date(d)) => format_datetime(d, date_format),
                Some(FormulaResult::Text(s)) => s.clone(),
                Some(FormulaResult::Boolean(b)) => bool_text(*b).to_string(),
                None => format!("={}", expression),
            };
            CellDescriptor::new(text, CellCategory::Formula)
        }
        CellValue::Error => CellDescriptor::error(),
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}
