//! Rendering options and configuration.

use super::format::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::model::{TableLimits, DEFAULT_MAX_COLUMNS, DEFAULT_MAX_ROWS};

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [50, 100, 250, 500];

/// Default rows per page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 100;

/// Options for rendering document previews.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Maximum number of data rows rendered per table
    pub max_rows: usize,

    /// Maximum number of columns rendered per table
    pub max_columns: usize,

    /// Rows per page initially selected in paginated tables
    pub rows_per_page: usize,

    /// strftime pattern for date cells
    pub date_format: String,

    /// Keep newlines inside quoted delimited fields
    pub multiline_quotes: bool,

    /// Continue with text preview and raw passthrough when the primary
    /// renderer fails
    pub fallback: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row cap (at least 1).
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows.max(1);
        self
    }

    /// Set the column cap (at least 1).
    pub fn with_max_columns(mut self, columns: usize) -> Self {
        self.max_columns = columns.max(1);
        self
    }

    /// Set the initial page size (at least 1).
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows.max(1);
        self
    }

    /// Set the date pattern. Invalid patterns are ignored.
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if is_valid_date_format(&pattern) {
            self.date_format = pattern;
        } else {
            log::warn!("Ignoring invalid date format '{}'", pattern);
        }
        self
    }

    /// Enable or disable quote-aware record assembly for delimited text.
    pub fn with_multiline_quotes(mut self, enabled: bool) -> Self {
        self.multiline_quotes = enabled;
        self
    }

    /// Enable or disable the fallback chain.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    /// Row and column caps as table limits.
    pub fn limits(&self) -> TableLimits {
        TableLimits {
            max_rows: self.max_rows,
            max_columns: self.max_columns,
        }
    }

    /// Page sizes for the selector, including the configured one.
    pub fn page_size_choices(&self) -> Vec<usize> {
        let mut choices = PAGE_SIZE_CHOICES.to_vec();
        if !choices.contains(&self.rows_per_page) {
            choices.push(self.rows_per_page);
            choices.sort_unstable();
        }
        choices
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_columns: DEFAULT_MAX_COLUMNS,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            multiline_quotes: false,
            fallback: true,
        }
    }
}
