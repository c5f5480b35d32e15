//! HTML rendering for word-processing documents.

use super::format::escape_html;
use super::page::{push_empty_state, HtmlPage, WORD_STYLE};
use super::RenderStats;
use crate::model::{Block, Paragraph, TextRun, WordDocument, WordTable};

/// Page title for word-processing documents.
pub const WORD_TITLE: &str = "Word Document";

/// Renders paragraphs and tables in body order.
#[derive(Debug, Default)]
pub struct WordRenderer;

impl WordRenderer {
    /// Create a new word renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the document to a complete HTML page.
    pub fn render(&self, doc: &WordDocument, filename: &str) -> String {
        let mut page = HtmlPage::new(WORD_TITLE, filename).with_style(WORD_STYLE);
        let body = page.body_mut();

        if doc.is_empty() {
            push_empty_state(
                body,
                "empty-document",
                "\u{1f4dd}",
                "This document is empty",
                "No text found in this document",
            );
            return page.finish();
        }

        body.push_str("<div class='word-body'>");
        for block in &doc.blocks {
            match block {
                Block::Paragraph(p) => render_paragraph(body, p),
                Block::Table(t) => render_table(body, t),
            }
        }
        body.push_str("</div>");

        page.finish()
    }

    /// Render the document and collect statistics.
    pub fn render_with_stats(&self, doc: &WordDocument, filename: &str) -> (String, RenderStats) {
        (self.render(doc, filename), RenderStats::from_document(doc))
    }
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph) {
    if paragraph.is_empty() {
        return;
    }

    match paragraph.heading_level {
        Some(level) => {
            out.push_str(&format!("<h{}>", level));
        }
        None => out.push_str("<p class='paragraph'>"),
    }
    for run in &paragraph.runs {
        render_run(out, run);
    }
    match paragraph.heading_level {
        Some(level) => {
            out.push_str(&format!("</h{}>", level));
        }
        None => out.push_str("</p>"),
    }
}

/// Bold innermost, then italic, then underline.
fn render_run(out: &mut String, run: &TextRun) {
    if run.text.is_empty() {
        return;
    }
    let mut text = escape_html(&run.text).replace('\t', "&emsp;");
    if run.bold {
        text = format!("<strong>{}</strong>", text);
    }
    if run.italic {
        text = format!("<em>{}</em>", text);
    }
    if run.underline {
        text = format!("<u>{}</u>", text);
    }
    out.push_str(&text);
}

/// First row is always the header row.
fn render_table(out: &mut String, table: &WordTable) {
    if table.is_empty() {
        return;
    }
    out.push_str("<table>");
    for (i, row) in table.rows.iter().enumerate() {
        let tag = if i == 0 { "th" } else { "td" };
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<{tag}>{}</{tag}>", escape_html(cell.trim())));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
}
