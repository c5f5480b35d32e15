//! Shared HTML rendering of capped tables.

use super::format::escape_html;
use crate::model::{ColumnLabels, TableModel};

/// Renders a [`TableModel`] as a scrollable grid with a row-header column.
pub struct TabularRenderer<'a> {
    table: &'a TableModel,
    caption: &'a str,
}

impl<'a> TabularRenderer<'a> {
    /// Create a renderer for `table` titled `caption`.
    pub fn new(table: &'a TableModel, caption: &'a str) -> Self {
        Self { table, caption }
    }

    /// Append the table markup to `out`.
    pub fn render(&self, out: &mut String) {
        let table = self.table;

        out.push_str("<div class='table-container'><div class='table-header'>");
        out.push_str(&escape_html(self.caption));
        out.push_str("</div><div class='table-wrapper'><table>");
        self.render_head(out);

        out.push_str("<tbody>");
        for row in &table.rows {
            out.push_str(&format!("<tr><td class='row-header'>{}</td>", row.number));
            for cell in &row.cells {
                match cell.category.css_class() {
                    Some(class) => {
                        out.push_str(&format!("<td class='{}'>", class));
                    }
                    None => out.push_str("<td>"),
                }
                if cell.text.is_empty() {
                    out.push_str("&nbsp;");
                } else {
                    out.push_str(&escape_html(&cell.text));
                }
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
        if table.rows_truncated {
            self.render_banner(out);
        }
        out.push_str("</tbody></table></div></div>");

        if table.columns_truncated {
            out.push_str(&format!(
                "<div class='column-notice'>Showing first {} of {} columns</div>",
                table.column_count, table.total_columns
            ));
        }
    }

    fn render_head(&self, out: &mut String) {
        let corner = match self.table.labels {
            ColumnLabels::Letters => "",
            _ => "#",
        };
        out.push_str(&format!("<thead><tr><th class='row-header'>{}</th>", corner));
        for i in 0..self.table.column_count {
            out.push_str("<th>");
            out.push_str(&escape_html(&self.table.labels.label(i)));
            out.push_str("</th>");
        }
        out.push_str("</tr></thead>");
    }

    /// One banner row spanning all data columns.
    fn render_banner(&self, out: &mut String) {
        let table = self.table;
        out.push_str(&format!(
            "<tr class='truncation-banner'><td class='row-header'>...</td>\
             <td colspan='{}'>\u{26a0}\u{fe0f} Data truncated - Showing first {} rows of {} total rows</td></tr>",
            table.column_count.max(1),
            table.rows.len(),
            table.available_rows
        ));
    }
}

/// Append a summary bar of `label: value` items.
pub fn push_summary(out: &mut String, class: &str, items: &[(&str, String)]) {
    out.push_str(&format!("<div class='{}'>", class));
    for (label, value) in items {
        out.push_str(&format!(
            "<div class='summary-item'><strong>{}:</strong> {}</div>",
            label,
            escape_html(value)
        ));
    }
    out.push_str("</div>");
}
