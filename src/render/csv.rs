//! HTML rendering for delimited text.

use super::page::{push_empty_state, HtmlPage, CSV_SCRIPT, CSV_STYLE, TABLE_STYLE};
use super::table::{push_summary, TabularRenderer};
use super::{RenderOptions, RenderStats};
use crate::model::TableModel;

/// Page title for delimited text.
pub const CSV_TITLE: &str = "CSV Document";

/// Renders a delimited-text table as a searchable, paginated page.
pub struct CsvRenderer {
    options: RenderOptions,
}

impl CsvRenderer {
    /// Create a new CSV renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the table to a complete HTML page.
    pub fn render(&self, table: &TableModel, filename: &str) -> String {
        let mut page = HtmlPage::new(CSV_TITLE, filename)
            .with_style(TABLE_STYLE)
            .with_style(CSV_STYLE)
            .with_script(CSV_SCRIPT);

        let body = page.body_mut();
        if table.is_empty() {
            push_empty_state(
                body,
                "empty-csv",
                "\u{1f4ca}",
                "This CSV is empty",
                "No data found in this file",
            );
        } else {
            self.render_controls(body);
            push_summary(
                body,
                "csv-summary",
                &[
                    ("Total Rows", table.total_rows.to_string()),
                    ("Columns", table.total_columns.to_string()),
                    ("File", filename.to_string()),
                ],
            );
            push_pagination(body);
            TabularRenderer::new(table, "CSV Data").render(body);
            push_pagination(body);
        }

        page.finish()
    }

    /// Render the table and collect statistics.
    pub fn render_with_stats(&self, table: &TableModel, filename: &str) -> (String, RenderStats) {
        (self.render(table, filename), RenderStats::from_table(table))
    }

    fn render_controls(&self, out: &mut String) {
        out.push_str("<div class='csv-controls'>");
        out.push_str("<div class='control-group'>");
        out.push_str("<label class='control-label' for='searchInput'>Search:</label>");
        out.push_str(
            "<input type='text' id='searchInput' class='control-input' \
             placeholder='Filter rows...' oninput='filterTable()'>",
        );
        out.push_str("</div>");
        out.push_str("<div class='control-group'>");
        out.push_str("<label class='control-label' for='rowsPerPageSelect'>Rows per page:</label>");
        out.push_str(
            "<select id='rowsPerPageSelect' class='control-input' onchange='changeRowsPerPage()'>",
        );
        for size in self.options.page_size_choices() {
            let selected = if size == self.options.rows_per_page {
                " selected"
            } else {
                ""
            };
            out.push_str(&format!("<option value='{size}'{selected}>{size}</option>"));
        }
        out.push_str("</select></div></div>");
    }
}

fn push_pagination(out: &mut String) {
    out.push_str("<div class='pagination-container'><div class='pagination-info'></div></div>");
}
