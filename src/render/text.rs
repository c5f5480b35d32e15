//! Escaped plain-text preview page.

use super::format::escape_html;
use super::page::{HtmlPage, TEXT_STYLE};
use super::{CSV_TITLE, SHEET_TITLE, WORD_TITLE};
use crate::detect::DocumentFamily;

/// Page title for a family's text preview.
pub fn preview_title(family: DocumentFamily) -> &'static str {
    match family {
        DocumentFamily::Delimited => CSV_TITLE,
        DocumentFamily::Spreadsheet => SHEET_TITLE,
        DocumentFamily::WordProcessing => WORD_TITLE,
    }
}

/// Render extracted text as an HTML page.
///
/// Text is escaped once; line breaks become `<br>`.
pub fn to_text_preview(text: &str, filename: &str, family: DocumentFamily) -> String {
    let mut page = HtmlPage::new(preview_title(family), filename).with_style(TEXT_STYLE);
    let body = page.body_mut();
    body.push_str(
        "<div class='text-notice'>Showing a simplified text preview; \
         formatting could not be rendered.</div>",
    );
    body.push_str("<div class='text-preview'>");
    body.push_str(&escape_html(text));
    body.push_str("</div>");
    page.finish()
}
