//! Self-contained HTML page shell with inline styles and scripts.

use super::format::{document_name, escape_html};

/// Styles shared by every preview page.
pub const BASE_STYLE: &str = concat!(
    "* { box-sizing: border-box; }",
    "body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; ",
    "line-height: 1.6; color: #2c3e50; margin: 0; padding: 0; ",
    "background: linear-gradient(135deg, #f5f7fa 0%, #e8eaed 100%); min-height: 100vh; }",
    ".document-container { max-width: 98%; margin: 10px auto; padding: 20px; ",
    "background: rgba(255, 255, 255, 0.95); border-radius: 12px; ",
    "box-shadow: 0 10px 30px rgba(0,0,0,0.08), 0 0 0 1px rgba(255,255,255,0.2); }",
    ".document-name-header { background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); ",
    "padding: 15px 20px; border-radius: 8px; margin-bottom: 15px; border-left: 4px solid #A90C2B; }",
    ".document-name { font-size: 1.1em; font-weight: 600; color: #2c3e50; }",
    ".document-title { font-size: 2.2em; font-weight: 700; color: #2c3e50; text-align: center; ",
    "margin-bottom: 25px; background: linear-gradient(135deg, #D0715B 0%, #8B0A23 100%); ",
    "-webkit-background-clip: text; -webkit-text-fill-color: transparent; background-clip: text; }",
    "@media (max-width: 768px) {",
    " .document-container { margin: 5px; padding: 10px; }",
    " .document-title { font-size: 1.8em; }",
    " .document-name-header { padding: 10px 15px; }",
    " .document-name { font-size: 1em; }",
    "}",
);

/// Grid styles for CSV and spreadsheet tables.
pub const TABLE_STYLE: &str = concat!(
    ".table-container { margin: 15px 0; background: white; border-radius: 8px; ",
    "overflow: hidden; box-shadow: 0 4px 20px rgba(0,0,0,0.08); border: 1px solid #e1e5e9; }",
    ".table-header { background: linear-gradient(135deg, #D0715B 0%, #8B0A23 100%); ",
    "color: white; padding: 12px 15px; font-weight: 600; font-size: 1em; }",
    ".table-wrapper { overflow: auto; max-height: 70vh; background: white; }",
    "table { border-collapse: separate; border-spacing: 0; width: auto; min-width: 100%; font-size: 0.85em; ",
    "font-family: 'Segoe UI', Arial, sans-serif; }",
    "th { background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); ",
    "font-weight: 600; padding: 8px 12px; text-align: left; border: 1px solid #d0d7de; ",
    "position: sticky; top: 0; z-index: 10; white-space: nowrap; font-size: 0.85em; ",
    "color: #495057; min-width: 60px; max-width: 300px; }",
    "th.row-header { background: linear-gradient(135deg, #f1f3f4 0%, #e8eaed 100%); ",
    "text-align: center; color: #5f6368; min-width: 50px; max-width: 50px; left: 0; z-index: 11; }",
    "td { padding: 6px 10px; border: 1px solid #d0d7de; vertical-align: top; ",
    "white-space: pre-wrap; word-wrap: break-word; min-width: 80px; max-width: 300px; background: white; }",
    "td.row-header { background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); ",
    "font-weight: 500; text-align: center; color: #5f6368; min-width: 50px; max-width: 50px; ",
    "position: sticky; left: 0; z-index: 10; border-right: 2px solid #d0d7de; }",
    "tr:nth-child(even) td:not(.row-header) { background-color: #fafbfc; }",
    "tr:hover td:not(.row-header) { background-color: #e8f0fe; }",
    "td.number { text-align: right; font-family: 'Consolas', 'Monaco', monospace; color: #1565c0; }",
    "td.date { color: #1a73e8; }",
    "td.email { color: #7b1fa2; }",
    "td.url { color: #1976d2; text-decoration: underline; }",
    "td.large-text { max-width: 400px; }",
    "td.boolean { text-align: center; font-weight: bold; color: #137333; }",
    "td.formula { background-color: #fef7e0; font-family: 'Consolas', 'Monaco', monospace; color: #b7651c; }",
    "td.error { background-color: #fce8e6; color: #d73027; font-weight: bold; text-align: center; }",
    "tr.truncation-banner td:not(.row-header) { text-align: center; padding: 15px; ",
    "background: #fff3cd; color: #856404; font-weight: bold; }",
    ".column-notice { margin: 8px 0; font-size: 0.85em; color: #856404; }",
    ".summary-item { display: flex; align-items: center; gap: 5px; }",
    ".summary-item strong { color: #D0715B; }",
    ".empty-state { text-align: center; padding: 50px 20px; color: #6c757d; }",
    ".empty-icon { font-size: 3em; margin-bottom: 20px; opacity: 0.3; }",
    "@media (max-width: 768px) {",
    " table { font-size: 0.75em; }",
    " th, td { padding: 4px 8px; min-width: 80px; max-width: 200px; }",
    " .table-wrapper { max-height: 50vh; }",
    "}",
);

/// Controls, summary and pagination for CSV pages.
pub const CSV_STYLE: &str = concat!(
    ".csv-controls { margin: 20px 0 15px 0; display: flex; flex-wrap: wrap; gap: 15px; align-items: center; }",
    ".control-group { display: flex; align-items: center; gap: 8px; }",
    ".control-label { font-weight: 600; color: #495057; font-size: 0.9em; }",
    ".control-input { padding: 8px 12px; border: 2px solid #e1e5e9; border-radius: 6px; font-size: 0.9em; }",
    ".control-input:focus { outline: none; border-color: #D0715B; }",
    ".csv-summary { background: #f8f9fa; padding: 12px 15px; border-radius: 6px; ",
    "margin-bottom: 15px; font-size: 0.85em; color: #6c757d; display: flex; justify-content: space-between; ",
    "flex-wrap: wrap; gap: 15px; border-left: 4px solid #D0715B; }",
    ".pagination-container { margin: 15px 0; display: flex; justify-content: center; align-items: center; gap: 10px; }",
    ".pagination-button { background: #f8f9fa; border: 1px solid #d0d7de; padding: 8px 12px; ",
    "border-radius: 6px; cursor: pointer; }",
    ".pagination-button:hover { background: #e9ecef; }",
    ".pagination-info { color: #6c757d; font-size: 0.9em; }",
    "@media (max-width: 768px) {",
    " .csv-controls { flex-direction: column; align-items: stretch; }",
    " .control-group { justify-content: space-between; }",
    "}",
);

/// Tabs and per-sheet sections for workbook pages.
pub const SHEET_STYLE: &str = concat!(
    ".sheet-tabs-container { margin: 20px 0 15px 0; display: flex; flex-wrap: wrap; gap: 6px; }",
    ".sheet-tab { background: linear-gradient(135deg, #D0715B 0%, #8B0A23 100%); color: white; ",
    "padding: 10px 20px; border-radius: 20px; font-weight: 600; font-size: 0.9em; ",
    "box-shadow: 0 3px 12px rgba(169, 12, 43, 0.3); cursor: pointer; border: none; user-select: none; }",
    ".sheet-tab.active { background: linear-gradient(135deg, #8B0A23 0%, #D0715B 100%); }",
    ".sheet-content { display: none; margin-top: 15px; }",
    ".sheet-content.active { display: block; }",
    ".sheet-summary { background: #f8f9fa; padding: 12px 15px; border-radius: 6px; ",
    "margin-bottom: 15px; font-size: 0.85em; color: #6c757d; display: flex; justify-content: space-between; ",
    "flex-wrap: wrap; gap: 15px; border-left: 4px solid #D0715B; }",
    ".sheet-error { background: #fce8e6; color: #d73027; padding: 12px 15px; border-radius: 6px; }",
    "th { text-align: center; }",
    "@media (max-width: 768px) {",
    " .sheet-tab { padding: 8px 16px; font-size: 0.8em; }",
    "}",
);

/// Paragraph and simple table styles for word-processing pages.
pub const WORD_STYLE: &str = concat!(
    ".paragraph { margin: 12px 0; font-size: 1.1em; line-height: 1.8; }",
    ".word-body { max-width: 900px; margin: 0 auto; }",
    ".word-body table { border-collapse: collapse; margin: 15px 0; width: 100%; }",
    ".word-body th, .word-body td { border: 1px solid #d0d7de; padding: 8px 10px; text-align: left; vertical-align: top; }",
    ".word-body th { background: #f1f3f4; font-weight: 600; }",
    "@media (max-width: 768px) {",
    " .word-body table { font-size: 0.9em; }",
    " .word-body th, .word-body td { padding: 6px 8px; }",
    "}",
);

/// Plain text preview styles.
pub const TEXT_STYLE: &str = concat!(
    ".text-notice { background: #fff3cd; color: #856404; padding: 10px 15px; border-radius: 6px; ",
    "margin-bottom: 15px; font-size: 0.9em; }",
    ".text-preview { white-space: pre-wrap; word-wrap: break-word; font-family: 'Consolas', 'Monaco', monospace; ",
    "font-size: 0.9em; background: white; padding: 15px; border: 1px solid #e1e5e9; border-radius: 8px; }",
);

/// Client-side search and pagination over the CSV table body.
///
/// The truncation banner row is never paginated or filtered.
pub const CSV_SCRIPT: &str = concat!(
    "var allRows = [];",
    "var filteredRows = [];",
    "var currentPage = 0;",
    "var rowsPerPage = 100;",
    "function initializeCsv() {",
    "  var tableBody = document.querySelector('tbody');",
    "  if (!tableBody) return;",
    "  var select = document.getElementById('rowsPerPageSelect');",
    "  if (select) rowsPerPage = parseInt(select.value);",
    "  var rows = tableBody.querySelectorAll('tr:not(.truncation-banner)');",
    "  for (var i = 0; i < rows.length; i++) allRows.push(rows[i]);",
    "  filteredRows = allRows.slice();",
    "  updatePagination();",
    "}",
    "function filterTable() {",
    "  var searchInput = document.getElementById('searchInput');",
    "  if (!searchInput) return;",
    "  var searchTerm = searchInput.value.toLowerCase();",
    "  filteredRows = [];",
    "  for (var i = 0; i < allRows.length; i++) {",
    "    var cells = allRows[i].querySelectorAll('td:not(.row-header)');",
    "    for (var j = 0; j < cells.length; j++) {",
    "      if (cells[j].textContent.toLowerCase().indexOf(searchTerm) !== -1) {",
    "        filteredRows.push(allRows[i]);",
    "        break;",
    "      }",
    "    }",
    "  }",
    "  currentPage = 0;",
    "  updatePagination();",
    "}",
    "function changeRowsPerPage() {",
    "  var select = document.getElementById('rowsPerPageSelect');",
    "  if (!select) return;",
    "  rowsPerPage = parseInt(select.value);",
    "  currentPage = 0;",
    "  updatePagination();",
    "}",
    "function changePage(page) {",
    "  currentPage = page;",
    "  updatePagination();",
    "}",
    "function updatePagination() {",
    "  for (var i = 0; i < allRows.length; i++) allRows[i].style.display = 'none';",
    "  var startIndex = currentPage * rowsPerPage;",
    "  var endIndex = Math.min(startIndex + rowsPerPage, filteredRows.length);",
    "  for (var i = startIndex; i < endIndex; i++) filteredRows[i].style.display = '';",
    "  var totalPages = Math.max(1, Math.ceil(filteredRows.length / rowsPerPage));",
    "  var infos = document.querySelectorAll('.pagination-info');",
    "  for (var i = 0; i < infos.length; i++) {",
    "    infos[i].textContent = 'Page ' + (currentPage + 1) + ' of ' + totalPages + ' (' + filteredRows.length + ' rows)';",
    "  }",
    "  updatePaginationButtons(totalPages);",
    "}",
    "function updatePaginationButtons(totalPages) {",
    "  var containers = document.querySelectorAll('.pagination-container');",
    "  for (var c = 0; c < containers.length; c++) {",
    "    var container = containers[c];",
    "    var buttons = container.querySelectorAll('.pagination-button');",
    "    for (var i = 0; i < buttons.length; i++) buttons[i].remove();",
    "    if (totalPages <= 1) continue;",
    "    var info = container.querySelector('.pagination-info');",
    "    if (currentPage > 0) {",
    "      var prevBtn = document.createElement('button');",
    "      prevBtn.className = 'pagination-button';",
    "      prevBtn.textContent = '\u{2190} Previous';",
    "      prevBtn.onclick = function() { changePage(currentPage - 1); };",
    "      container.insertBefore(prevBtn, info);",
    "    }",
    "    if (currentPage < totalPages - 1) {",
    "      var nextBtn = document.createElement('button');",
    "      nextBtn.className = 'pagination-button';",
    "      nextBtn.textContent = 'Next \u{2192}';",
    "      nextBtn.onclick = function() { changePage(currentPage + 1); };",
    "      container.appendChild(nextBtn);",
    "    }",
    "  }",
    "}",
    "initializeCsv();",
);

/// Client-side sheet tab switching.
pub const SHEET_SCRIPT: &str = concat!(
    "function showSheet(index) {",
    "  var contents = document.querySelectorAll('.sheet-content');",
    "  var tabs = document.querySelectorAll('.sheet-tab');",
    "  for (var i = 0; i < contents.length; i++) {",
    "    if (i === index) contents[i].classList.add('active');",
    "    else contents[i].classList.remove('active');",
    "  }",
    "  for (var i = 0; i < tabs.length; i++) {",
    "    if (i === index) tabs[i].classList.add('active');",
    "    else tabs[i].classList.remove('active');",
    "  }",
    "}",
    "var sheetTabs = document.querySelectorAll('.sheet-tab');",
    "for (var i = 0; i < sheetTabs.length; i++) {",
    "  sheetTabs[i].onclick = function() {",
    "    var sheetIndex = parseInt(this.getAttribute('data-sheet-index'));",
    "    if (!isNaN(sheetIndex)) showSheet(sheetIndex);",
    "  };",
    "}",
);

/// Builder for a complete preview page.
///
/// Every page has the same frame: a title heading, the document name
/// header, the family-specific body and optional inline script.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    title: &'static str,
    document_name: String,
    styles: Vec<&'static str>,
    script: Option<&'static str>,
    body: String,
}

impl HtmlPage {
    /// Start a page with a title, naming the document after `filename`.
    pub fn new(title: &'static str, filename: &str) -> Self {
        Self {
            title,
            document_name: document_name(filename),
            styles: vec![BASE_STYLE],
            script: None,
            body: String::new(),
        }
    }

    /// Add a stylesheet after the base styles.
    pub fn with_style(mut self, style: &'static str) -> Self {
        self.styles.push(style);
        self
    }

    /// Set the inline script run after the body.
    pub fn with_script(mut self, script: &'static str) -> Self {
        self.script = Some(script);
        self
    }

    /// Mutable access to the body markup.
    pub fn body_mut(&mut self) -> &mut String {
        &mut self.body
    }

    /// Assemble the final document.
    pub fn finish(self) -> String {
        let style_len: usize = self.styles.iter().map(|s| s.len()).sum();
        let mut html = String::with_capacity(self.body.len() + style_len + 1024);

        html.push_str("<!DOCTYPE html><html><head><meta charset='UTF-8'>");
        html.push_str("<meta name='viewport' content='width=device-width, initial-scale=1'>");
        html.push_str("<title>");
        html.push_str(self.title);
        html.push_str("</title><style>");
        for style in &self.styles {
            html.push_str(style);
        }
        html.push_str("</style></head><body>");

        html.push_str("<div class='document-container'>");
        html.push_str("<h1 class='document-title'>");
        html.push_str(self.title);
        html.push_str("</h1>");
        html.push_str("<div class='document-name-header'><div class='document-name'>");
        html.push_str(&escape_html(&self.document_name));
        html.push_str("</div></div>");
        html.push_str(&self.body);
        html.push_str("</div>");

        if let Some(script) = self.script {
            html.push_str("<script>");
            html.push_str(script);
            html.push_str("</script>");
        }
        html.push_str("</body></html>");
        html
    }
}

/// Append an empty-state block.
pub fn push_empty_state(out: &mut String, class: &str, icon: &str, title: &str, detail: &str) {
    out.push_str("<div class='empty-state ");
    out.push_str(class);
    out.push_str("'><div class='empty-icon'>");
    out.push_str(icon);
    out.push_str("</div><h3>");
    out.push_str(&escape_html(title));
    out.push_str("</h3><p>");
    out.push_str(&escape_html(detail));
    out.push_str("</p></div>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_frame() {
        let mut page = HtmlPage::new("CSV Document", "sales_<q1>.csv").with_style(CSV_STYLE);
        page.body_mut().push_str("<p>body</p>");
        let html = page.finish();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>CSV Document</title>"));
        assert!(html.contains("<h1 class='document-title'>CSV Document</h1>"));
        assert!(html.contains("<div class='document-name'>Sales &lt;q1&gt;</div>"));
        assert!(html.contains(".csv-controls"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("<script>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn test_page_is_self_contained() {
        let html = HtmlPage::new("Excel Workbook", "book.xlsx")
            .with_style(TABLE_STYLE)
            .with_style(SHEET_STYLE)
            .with_script(SHEET_SCRIPT)
            .finish();
        assert!(html.contains("function showSheet(index)"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("src="));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
    }

    #[test]
    fn test_empty_state() {
        let mut out = String::new();
        push_empty_state(&mut out, "empty-csv", "📊", "This CSV is empty", "No data found in this file");
        assert!(out.starts_with("<div class='empty-state empty-csv'>"));
        assert!(out.contains("<h3>This CSV is empty</h3>"));
    }

    #[test]
    fn test_csv_script_skips_banner() {
        assert!(CSV_SCRIPT.contains("tr:not(.truncation-banner)"));
        assert!(CSV_SCRIPT.contains("function filterTable()"));
        assert!(CSV_SCRIPT.contains("function changeRowsPerPage()"));
    }
}
