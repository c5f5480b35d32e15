//! Workbook types.

use super::TableModel;
use serde::{Deserialize, Serialize};

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in workbook order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a new empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Number of sheets that failed to load.
    pub fn failed_sheet_count(&self) -> usize {
        self.sheets
            .iter()
            .filter(|s| matches!(s.content, SheetContent::Failed(_)))
            .count()
    }
}

/// One worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as shown on its tab
    pub name: String,
    /// Loaded table or the reason it could not be read
    pub content: SheetContent,
}

impl Sheet {
    /// Create a loaded sheet.
    pub fn loaded(name: impl Into<String>, table: TableModel) -> Self {
        Self {
            name: name.into(),
            content: SheetContent::Table(table),
        }
    }

    /// Create a sheet that failed to load.
    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: SheetContent::Failed(reason.into()),
        }
    }

    /// The table, when the sheet loaded.
    pub fn table(&self) -> Option<&TableModel> {
        match &self.content {
            SheetContent::Table(t) => Some(t),
            SheetContent::Failed(_) => None,
        }
    }
}

/// Content of a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SheetContent {
    /// Sheet data
    Table(TableModel),
    /// Per-sheet read failure
    Failed(String),
}
