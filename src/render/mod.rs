//! Rendering module for turning walked documents into HTML previews.

mod csv;
pub mod format;
mod options;
pub mod page;
mod result;
mod sheet;
mod table;
mod text;
mod word;

pub use csv::{CsvRenderer, CSV_TITLE};
pub use format::{
    document_name, escape_html, format_cell_number, format_datetime, format_number,
    DEFAULT_DATE_FORMAT,
};
pub use options::{RenderOptions, DEFAULT_ROWS_PER_PAGE, PAGE_SIZE_CHOICES};
pub use page::HtmlPage;
pub use result::{RenderStage, RenderStats, Rendered};
pub use sheet::{WorkbookRenderer, SHEET_TITLE};
pub use table::{push_summary, TabularRenderer};
pub use text::{preview_title, to_text_preview};
pub use word::{WordRenderer, WORD_TITLE};
