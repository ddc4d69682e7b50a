//! Page template for lab worksheets.
//!
//! Wraps rendered content in a self-contained HTML document with an
//! inline print stylesheet and, for browser output, an inline script that
//! keeps student answers in local storage.

use std::fmt::Write;

use crate::markdown::escape_html;

/// Print stylesheet for lab worksheets (US letter, 0.75in margins).
pub const LAB_CSS: &str = r#"@page {
    size: letter;
    margin: 0.75in;
}

body {
    font-family: 'Georgia', 'Times New Roman', serif;
    font-size: 11pt;
    line-height: 1.5;
    color: #1a1a1a;
}

h1 {
    font-size: 18pt;
    font-weight: bold;
    text-align: center;
    margin-bottom: 0.5em;
    border-bottom: 2px solid #333;
    padding-bottom: 0.3em;
}

h2 {
    font-size: 14pt;
    font-weight: bold;
    margin-top: 1.5em;
    margin-bottom: 0.5em;
    color: #2c5aa0;
}

h3 {
    font-size: 12pt;
    font-weight: bold;
    margin-top: 1em;
    margin-bottom: 0.3em;
}

.lab-course {
    text-align: center;
    font-style: italic;
}

.lab-header {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 1em;
    margin-bottom: 1.5em;
    padding: 1em;
    border: 1px solid #ccc;
    background-color: #f9f9f9;
}

.lab-header-field {
    display: flex;
    align-items: baseline;
    gap: 0.5em;
}

.lab-header-label {
    font-weight: bold;
    white-space: nowrap;
}

.lab-header-value {
    flex: 1;
    border-bottom: 1px solid #333;
    min-height: 1.5em;
}

.lab-table {
    width: 100%;
    border-collapse: collapse;
    margin: 1em 0;
}

.lab-table th {
    background-color: #e8e8e8;
    font-weight: bold;
    text-align: left;
    padding: 8px 12px;
    border: 1px solid #333;
}

.lab-table td {
    padding: 8px 12px;
    border: 1px solid #333;
    min-height: 2em;
    vertical-align: top;
}

.lab-table td.fillable {
    background-color: #fffef0;
    min-height: 2.5em;
}

.lab-table tr:nth-child(even) {
    background-color: #f5f5f5;
}

.fill-text,
.fill-number {
    display: inline-block;
    min-width: 200px;
    border: none;
    border-bottom: 1px solid #333;
    padding: 2px 4px;
    background-color: #fffef0;
}

.fill-number {
    min-width: 80px;
}

.fill-textarea {
    display: block;
    width: 100%;
    min-height: 3em;
    border: 1px solid #333;
    padding: 8px;
    margin: 0.5em 0;
    background-color: #fffef0;
}

.fill-checkbox {
    display: flex;
    align-items: flex-start;
    gap: 0.5em;
    margin: 0.3em 0;
}

.fill-checkbox input[type="checkbox"] {
    width: 1em;
    height: 1em;
    margin-top: 0.25em;
}

.measurement-table {
    width: 100%;
    border-collapse: collapse;
    margin: 1em 0;
}

.measurement-table th {
    background-color: #2c5aa0;
    color: white;
    font-weight: bold;
    text-align: center;
    padding: 10px 12px;
    border: 1px solid #1a3d6d;
}

.measurement-table td {
    padding: 12px;
    border: 1px solid #333;
    text-align: center;
}

.measurement-table td.fillable {
    background-color: #fffef0;
    min-height: 3em;
}

.measurement-table .row-number {
    width: 40px;
    background-color: #e8e8e8;
    font-weight: bold;
}

.object-selection {
    margin: 1em 0;
    padding: 1em;
    border: 2px solid #2c5aa0;
    border-radius: 8px;
    background-color: #f0f5ff;
}

.object-selection h3 {
    margin-top: 0;
    color: #2c5aa0;
}

.object-field {
    display: flex;
    align-items: baseline;
    gap: 0.5em;
    margin: 1em 0;
}

.object-label {
    font-weight: bold;
    min-width: 150px;
}

.object-input {
    flex: 1;
    border-bottom: 2px solid #333;
    min-height: 1.5em;
    background-color: #fffef0;
    padding: 4px;
}

.feasibility-section {
    margin: 1em 0;
    padding: 1em;
    border: 1px solid #ccc;
    border-radius: 4px;
}

.feasibility-question {
    font-weight: bold;
    margin-bottom: 0.5em;
}

.feasibility-options {
    margin-left: 1em;
}

.reflection-box {
    margin: 1em 0;
    padding: 1em;
    border: 2px dashed #666;
    background-color: #fafafa;
    min-height: 100px;
}

.calculation-box {
    margin: 1em 0;
    padding: 1em;
    border: 1px solid #2c5aa0;
    border-left: 6px solid #2c5aa0;
    background-color: #f7f9fc;
    font-variant-numeric: tabular-nums;
}

@media print {
    .lab-table td.fillable,
    .fill-text,
    .fill-number,
    .fill-textarea,
    .object-input {
        background-color: white !important;
    }

    .no-print {
        display: none !important;
    }

    h1, h2, h3 {
        page-break-after: avoid;
    }

    .lab-table, .measurement-table, .calculation-box {
        page-break-inside: avoid;
    }
}
"#;

/// Browser script: saves answers to `localStorage` keyed by document title.
pub const LAB_JS: &str = r"function labStorageKey() {
    return 'labManualData_' + document.title;
}

function collectLabInputs() {
    const form = document.querySelector('.lab-manual');
    return form ? Array.from(form.querySelectorAll('input, textarea')) : [];
}

function saveLabData() {
    const data = {};
    collectLabInputs().forEach((input, idx) => {
        const key = input.id || input.name || `field_${idx}`;
        data[key] = input.type === 'checkbox' ? input.checked : input.value;
    });
    localStorage.setItem(labStorageKey(), JSON.stringify(data));
    showSaveNotification();
}

function loadLabData() {
    const saved = localStorage.getItem(labStorageKey());
    if (!saved) {
        return;
    }
    const data = JSON.parse(saved);
    collectLabInputs().forEach((input, idx) => {
        const key = input.id || input.name || `field_${idx}`;
        if (data[key] === undefined) {
            return;
        }
        if (input.type === 'checkbox') {
            input.checked = data[key];
        } else {
            input.value = data[key];
        }
    });
}

function showSaveNotification() {
    let notification = document.getElementById('save-notification');
    if (!notification) {
        notification = document.createElement('div');
        notification.id = 'save-notification';
        notification.className = 'no-print';
        notification.style.cssText = 'position: fixed; bottom: 20px; right: 20px; background: #2c5aa0; color: white; padding: 10px 20px; border-radius: 4px; opacity: 0; transition: opacity 0.3s;';
        document.body.appendChild(notification);
    }
    notification.textContent = 'Progress saved!';
    notification.style.opacity = '1';
    setTimeout(() => { notification.style.opacity = '0'; }, 2000);
}

function clearLabData() {
    if (confirm('Clear all entered data? This cannot be undone.')) {
        localStorage.removeItem(labStorageKey());
        location.reload();
    }
}

document.addEventListener('DOMContentLoaded', () => {
    loadLabData();
    const form = document.querySelector('.lab-manual');
    if (form) {
        form.addEventListener('input', () => {
            clearTimeout(window.labSaveTimeout);
            window.labSaveTimeout = setTimeout(saveLabData, 1000);
        });
    }
});
";

/// Data for rendering a complete worksheet page.
pub struct PageData<'a> {
    /// Document title (escaped on output).
    pub title: &'a str,
    /// Body HTML placed inside `div.lab-manual`.
    pub content: &'a str,
    /// Inline stylesheet.
    pub css: &'a str,
    /// Inline script; omitted entirely when `None`.
    pub script: Option<&'a str>,
}

/// Render a complete self-contained HTML page.
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.content.len() + page.css.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(page.title));
    let _ = write!(html, "<style>\n{}</style>\n", page.css);
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"lab-manual\">\n");
    html.push_str(page.content);
    html.push_str("</div>\n");

    if let Some(script) = page.script {
        let _ = write!(html, "<script>\n{script}</script>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page<'a>(title: &'a str, script: Option<&'a str>) -> PageData<'a> {
        PageData {
            title,
            content: "<p>Hello world</p>\n",
            css: LAB_CSS,
            script,
        }
    }

    #[test]
    fn test_render_page_contains_content() {
        let html = render_page(&page("Lab 1", None));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Lab 1</title>"));
        assert!(html.contains("<div class=\"lab-manual\">\n<p>Hello world</p>\n</div>"));
        assert!(html.contains("size: letter;"));
    }

    #[test]
    fn test_render_page_with_script() {
        let html = render_page(&page("Lab", Some(LAB_JS)));
        assert!(html.contains("<script>"));
        assert!(html.contains("localStorage"));
    }

    #[test]
    fn test_render_page_without_script() {
        let html = render_page(&page("Lab", None));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_title_escaped() {
        let html = render_page(&page("Forces & <Motion>", None));
        assert!(html.contains("<title>Forces &amp; &lt;Motion&gt;</title>"));
    }

    #[test]
    fn test_stylesheet_covers_widget_classes() {
        for class in [
            ".lab-table",
            ".measurement-table",
            ".object-selection",
            ".feasibility-section",
            ".reflection-box",
            ".calculation-box",
            ".fill-text",
            ".fill-number",
            ".fill-textarea",
            ".lab-header",
        ] {
            assert!(LAB_CSS.contains(class), "missing {class}");
        }
    }
}
