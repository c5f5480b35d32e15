//! HTML rendering for workbooks.

use super::format::escape_html;
use super::page::{push_empty_state, HtmlPage, SHEET_SCRIPT, SHEET_STYLE, TABLE_STYLE};
use super::table::{push_summary, TabularRenderer};
use super::RenderStats;
use crate::model::{Sheet, SheetContent, Workbook};

/// Page title for workbooks.
pub const SHEET_TITLE: &str = "Excel Workbook";

/// Renders every sheet of a workbook as a tabbed section.
#[derive(Debug, Default)]
pub struct WorkbookRenderer;

impl WorkbookRenderer {
    /// Create a new workbook renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the workbook to a complete HTML page.
    ///
    /// Tabs appear only when there is more than one sheet; the first
    /// sheet is the one initially shown.
    pub fn render(&self, workbook: &Workbook, filename: &str) -> String {
        let mut page = HtmlPage::new(SHEET_TITLE, filename)
            .with_style(TABLE_STYLE)
            .with_style(SHEET_STYLE)
            .with_script(SHEET_SCRIPT);

        let body = page.body_mut();
        if workbook.sheets.is_empty() {
            push_empty_state(
                body,
                "empty-sheet",
                "\u{1f4c4}",
                "This workbook is empty",
                "No worksheets found in this file",
            );
            return page.finish();
        }

        if workbook.sheet_count() > 1 {
            body.push_str("<div class='sheet-tabs-container'>");
            for (i, sheet) in workbook.sheets.iter().enumerate() {
                let active = if i == 0 { " active" } else { "" };
                body.push_str(&format!(
                    "<button class='sheet-tab{}' data-sheet-index='{}'>{}</button>",
                    active,
                    i,
                    escape_html(&sheet.name)
                ));
            }
            body.push_str("</div>");
        }

        for (i, sheet) in workbook.sheets.iter().enumerate() {
            let active = if i == 0 { " active" } else { "" };
            body.push_str(&format!("<div class='sheet-content{}'>", active));
            render_sheet(body, sheet);
            body.push_str("</div>");
        }

        page.finish()
    }

    /// Render the workbook and collect statistics.
    pub fn render_with_stats(&self, workbook: &Workbook, filename: &str) -> (String, RenderStats) {
        (
            self.render(workbook, filename),
            RenderStats::from_workbook(workbook),
        )
    }
}

fn render_sheet(out: &mut String, sheet: &Sheet) {
    let table = match &sheet.content {
        SheetContent::Table(table) => table,
        SheetContent::Failed(reason) => {
            out.push_str(&format!(
                "<div class='sheet-error'><strong>{}</strong> could not be read: {}</div>",
                escape_html(&sheet.name),
                escape_html(reason)
            ));
            return;
        }
    };

    if table.is_empty() {
        push_empty_state(
            out,
            "empty-sheet",
            "\u{1f4c4}",
            "This sheet is empty",
            "No data found in this worksheet",
        );
        return;
    }

    push_summary(
        out,
        "sheet-summary",
        &[
            ("Rows", table.total_rows.to_string()),
            ("Columns", table.total_columns.to_string()),
            ("Sheet", sheet.name.clone()),
        ],
    );
    TabularRenderer::new(table, &sheet.name).render(out);
}
