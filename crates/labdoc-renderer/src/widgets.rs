//! HTML widgets for lab worksheets.
//!
//! Every function here is a pure transformation from typed parameters to
//! an HTML fragment. Fragments are spliced into the document after
//! Markdown conversion, so section bodies are converted exactly once.

use std::fmt::Write;

use crate::directive::{DirectiveElement, DirectiveKind, TableSpec};
use crate::markdown::{MarkdownConverter, escape_html};

/// Configuration for a measurement table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasurementSpec {
    /// Number of data rows.
    pub rows: usize,
    /// Pre-filled physical aspects for the first column, top to bottom.
    pub aspects: Vec<String>,
    /// Include the "Measurement Device" column.
    pub include_device: bool,
    /// Include the "Measurement Unit" column.
    pub include_unit: bool,
    /// Include the "Measured Value" column.
    pub include_value: bool,
}

impl Default for MeasurementSpec {
    fn default() -> Self {
        Self {
            rows: 5,
            aspects: Vec::new(),
            include_device: true,
            include_unit: true,
            include_value: false,
        }
    }
}

impl MeasurementSpec {
    fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec!["Physical Aspect"];
        if self.include_device {
            columns.push("Measurement Device");
        }
        if self.include_unit {
            columns.push("Measurement Unit");
        }
        if self.include_value {
            columns.push("Measured Value");
        }
        columns
    }
}

/// Student header block configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Lab title, rendered as `<h1>`.
    pub title: String,
    /// Optional course label shown under the title.
    pub course_label: Option<String>,
    pub include_name: bool,
    pub include_date: bool,
    pub include_section: bool,
}

impl HeaderSpec {
    /// Header with all student fields enabled.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            course_label: None,
            include_name: true,
            include_date: true,
            include_section: true,
        }
    }

    #[must_use]
    pub fn with_course_label(mut self, label: impl Into<String>) -> Self {
        self.course_label = Some(label.into());
        self
    }
}

/// Render a numbered data table.
///
/// # Example
///
/// ```
/// use labdoc_renderer::directive::TableSpec;
/// use labdoc_renderer::widgets::data_table;
///
/// let html = data_table(&TableSpec::default().with_rows(2).with_columns(["A", "B"]));
/// assert!(html.contains(r#"<table class="lab-table">"#));
/// assert_eq!(html.matches(r#"<td class="row-number">"#).count(), 2);
/// ```
#[must_use]
pub fn data_table(spec: &TableSpec) -> String {
    let mut html = String::with_capacity(256 + spec.rows * spec.columns.len() * 40);

    if let Some(title) = &spec.title {
        let _ = writeln!(html, "<h3>{}</h3>", escape_html(title));
    }

    html.push_str("<table class=\"lab-table\">\n");
    html.push_str("<thead><tr>\n<th class=\"row-number\">#</th>\n");
    for column in &spec.columns {
        let _ = writeln!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    let cell = if spec.fillable {
        "<td class=\"fillable\">&nbsp;</td>\n"
    } else {
        "<td>&nbsp;</td>\n"
    };
    for i in 1..=spec.rows {
        let _ = writeln!(html, "<tr>\n<td class=\"row-number\">{i}</td>");
        for _ in &spec.columns {
            html.push_str(cell);
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Render a measurement table with optional pre-filled aspects.
///
/// The first column shows the pre-filled aspect for that row when one is
/// given. All other cells are fillable.
#[must_use]
pub fn measurement_table(spec: &MeasurementSpec) -> String {
    let columns = spec.columns();
    let mut html = String::with_capacity(256 + spec.rows * columns.len() * 40);

    html.push_str("<table class=\"measurement-table\">\n");
    html.push_str("<thead><tr>\n<th class=\"row-number\">#</th>\n");
    for column in &columns {
        let _ = writeln!(html, "<th>{column}</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for i in 1..=spec.rows {
        let _ = writeln!(html, "<tr>\n<td class=\"row-number\">{i}</td>");
        match spec.aspects.get(i - 1) {
            Some(aspect) => {
                let _ = writeln!(html, "<td>{}</td>", escape_html(aspect));
            }
            None => html.push_str("<td class=\"fillable\">&nbsp;</td>\n"),
        }
        for _ in &columns[1..] {
            html.push_str("<td class=\"fillable\">&nbsp;</td>\n");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Render the object selection fields.
///
/// The directive path always enables both fields. Callers that need only
/// one of them use this function directly.
#[must_use]
pub fn object_selection(in_room: bool, not_in_room: bool) -> String {
    let mut html = String::from("<div class=\"object-selection\">\n<h3>Object Selection</h3>\n");

    let fields = [
        (in_room, "Object in room:"),
        (not_in_room, "Object NOT in room:"),
    ];
    for (_, label) in fields.iter().filter(|(enabled, _)| *enabled) {
        let _ = writeln!(
            html,
            "<div class=\"object-field\">\n<span class=\"object-label\">{label}</span>\n<span class=\"object-input\"></span>\n</div>"
        );
    }

    html.push_str("</div>\n");
    html
}

/// Render a feasibility question with one checkbox per option.
#[must_use]
pub fn feasibility_checklist(question: &str, options: &[&str]) -> String {
    let mut html = String::from("<div class=\"feasibility-section\">\n");
    let _ = writeln!(
        html,
        "<div class=\"feasibility-question\">{}</div>",
        escape_html(question)
    );
    html.push_str("<div class=\"feasibility-options\">\n");

    for (idx, option) in options.iter().enumerate() {
        let id = format!("feasibility-opt-{}", idx + 1);
        let _ = writeln!(
            html,
            "<div class=\"fill-checkbox\">\n<input type=\"checkbox\" id=\"{id}\" />\n<label for=\"{id}\">{}</label>\n</div>",
            escape_html(option)
        );
    }

    html.push_str("</div>\n</div>\n");
    html
}

/// Render a reflection box with an optional prompt and a free-form textarea.
#[must_use]
pub fn reflection_box(prompt: &str, min_height: &str) -> String {
    let mut html = String::from("<div class=\"reflection-box\">\n");
    if !prompt.is_empty() {
        let _ = writeln!(html, "<p><em>{}</em></p>", escape_html(prompt));
    }
    let _ = writeln!(
        html,
        "<textarea class=\"fill-textarea\" style=\"min-height: {}\"></textarea>",
        escape_html(min_height)
    );
    html.push_str("</div>\n");
    html
}

/// Container class for the wrapping directive kinds.
///
/// Returns `None` for kinds that build structured widgets instead.
#[must_use]
pub fn section_class(kind: DirectiveKind) -> Option<&'static str> {
    match kind {
        DirectiveKind::MeasurementFeasibility => Some("feasibility-section"),
        DirectiveKind::Reflection => Some("reflection-box"),
        DirectiveKind::Calculation => Some("calculation-box"),
        DirectiveKind::DataTable | DirectiveKind::ObjectSelection => None,
    }
}

/// Wrap already-rendered HTML in a styled section container.
#[must_use]
pub fn wrap_section(class: &str, body_html: &str) -> String {
    let mut html = String::with_capacity(body_html.len() + 64);
    let _ = writeln!(html, "<div class=\"{class}\">");
    html.push_str(body_html.trim_end_matches('\n'));
    if !body_html.trim().is_empty() {
        html.push('\n');
    }
    html.push_str("</div>\n");
    html
}

/// Render the lab title and the student information fields.
#[must_use]
pub fn lab_header(spec: &HeaderSpec) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&spec.title));

    if let Some(label) = spec.course_label.as_deref().filter(|l| !l.is_empty()) {
        let _ = writeln!(html, "<p class=\"lab-course\">{}</p>", escape_html(label));
    }

    html.push_str("<div class=\"lab-header\">\n");
    let fields = [
        (spec.include_name, "Name:"),
        (spec.include_date, "Date:"),
        (spec.include_section, "Section:"),
    ];
    for (_, label) in fields.iter().filter(|(enabled, _)| *enabled) {
        let _ = writeln!(
            html,
            "<div class=\"lab-header-field\">\n<span class=\"lab-header-label\">{label}</span>\n<span class=\"lab-header-value\"></span>\n</div>"
        );
    }
    html.push_str("</div>\n");
    html
}

/// Render a parsed directive element.
///
/// Section bodies are converted with `markdown` before wrapping.
#[must_use]
pub fn render_element(element: &DirectiveElement, markdown: &MarkdownConverter) -> String {
    match element.kind {
        DirectiveKind::DataTable => data_table(&TableSpec::from_element(element)),
        DirectiveKind::ObjectSelection => object_selection(true, true),
        kind @ (DirectiveKind::MeasurementFeasibility
        | DirectiveKind::Reflection
        | DirectiveKind::Calculation) => {
            let class = section_class(kind).unwrap_or("lab-section");
            wrap_section(class, &markdown.convert(&element.raw_content))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::{DirectiveAttrs, parse_directives};

    fn element(kind: DirectiveKind, body: &str) -> DirectiveElement {
        DirectiveElement {
            kind,
            raw_content: body.to_owned(),
            attrs: DirectiveAttrs::default(),
            span: 0..0,
        }
    }

    #[test]
    fn test_default_table() {
        let html = data_table(&TableSpec::default());
        assert!(html.contains(r#"<table class="lab-table">"#));
        assert!(html.contains("<thead>"));
        assert!(html.contains("<tbody>"));
        assert!(html.contains(r#"<th class="row-number">#</th>"#));
        assert!(html.contains("<th>Physical Aspect</th>"));
        assert_eq!(html.matches(r#"<td class="row-number">"#).count(), 5);
    }

    #[test]
    fn test_zero_rows_header_only() {
        let html = data_table(&TableSpec::default().with_rows(0));
        assert!(html.contains("<th>Measurement Unit</th>"));
        assert!(!html.contains(r#"<td class="row-number">"#));
        assert!(html.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn test_rows_numbered_from_one() {
        let html = data_table(&TableSpec::default().with_rows(3));
        assert_eq!(html.matches(r#"<td class="row-number">"#).count(), 3);
        for i in 1..=3 {
            assert!(html.contains(&format!(r#"<td class="row-number">{i}</td>"#)));
        }
        assert!(!html.contains(r#"<td class="row-number">4</td>"#));
    }

    #[test]
    fn test_cells_per_row() {
        let html = data_table(&TableSpec::default().with_rows(2).with_columns(["A", "B"]));
        assert_eq!(html.matches(r#"<td class="fillable">&nbsp;</td>"#).count(), 4);
    }

    #[test]
    fn test_non_fillable_cells() {
        let html = data_table(&TableSpec::default().with_rows(1).with_fillable(false));
        assert!(!html.contains("fillable"));
        assert_eq!(html.matches("<td>&nbsp;</td>").count(), 3);
    }

    #[test]
    fn test_table_title() {
        let html = data_table(&TableSpec::default().with_title("My Data Table"));
        assert!(html.starts_with("<h3>My Data Table</h3>\n"));
    }

    #[test]
    fn test_table_without_title_has_no_heading() {
        let html = data_table(&TableSpec::default());
        assert!(!html.contains("<h3>"));
    }

    #[test]
    fn test_headers_escaped() {
        let html = data_table(&TableSpec::default().with_columns(["Mass <g>"]));
        assert!(html.contains("<th>Mass &lt;g&gt;</th>"));
    }

    #[test]
    fn test_fragments_have_no_blank_lines() {
        let fragments = [
            data_table(&TableSpec::default().with_title("T")),
            measurement_table(&MeasurementSpec::default()),
            object_selection(true, true),
            feasibility_checklist("Q?", &["a", "b"]),
            reflection_box("Why?", "100px"),
            wrap_section("reflection-box", "<p>x</p>\n"),
            wrap_section("reflection-box", ""),
        ];
        for html in fragments {
            assert!(!html.contains("\n\n"), "blank line in {html}");
        }
    }

    #[test]
    fn test_measurement_table_default() {
        let html = measurement_table(&MeasurementSpec::default());
        assert!(html.contains(r#"<table class="measurement-table">"#));
        assert!(html.contains("Physical Aspect"));
        assert!(html.contains("Measurement Device"));
        assert!(html.contains("Measurement Unit"));
        assert!(!html.contains("Measured Value"));
    }

    #[test]
    fn test_measurement_table_aspects() {
        let spec = MeasurementSpec {
            aspects: vec!["Length".to_owned(), "Mass".to_owned(), "Volume".to_owned()],
            ..MeasurementSpec::default()
        };
        let html = measurement_table(&spec);
        for aspect in ["Length", "Mass", "Volume"] {
            assert!(html.contains(&format!("<td>{aspect}</td>")));
        }
        // Rows 4 and 5: first column fillable, plus two fillable columns each
        assert_eq!(html.matches(r#"<td class="fillable">"#).count(), 3 * 2 + 2 * 3);
    }

    #[test]
    fn test_measurement_table_columns() {
        let spec = MeasurementSpec {
            include_device: false,
            include_value: true,
            ..MeasurementSpec::default()
        };
        let html = measurement_table(&spec);
        assert!(!html.contains("Measurement Device"));
        assert!(html.contains("Measurement Unit"));
        assert!(html.contains("Measured Value"));
    }

    #[test]
    fn test_object_selection_both_fields() {
        let html = object_selection(true, true);
        assert!(html.contains("Object in room:"));
        assert!(html.contains("Object NOT in room:"));
        assert_eq!(html.matches(r#"class="object-field""#).count(), 2);
    }

    #[test]
    fn test_object_selection_single_field() {
        let html = object_selection(false, true);
        assert!(!html.contains("Object in room:"));
        assert!(html.contains("Object NOT in room:"));
    }

    #[test]
    fn test_feasibility_checklist() {
        let html = feasibility_checklist(
            "How might we get those other measurements?",
            &["Internet access", "Money/funding"],
        );
        assert!(html.contains("feasibility-question"));
        assert_eq!(html.matches(r#"type="checkbox""#).count(), 2);
        assert!(html.contains(r#"<label for="feasibility-opt-2">Money/funding</label>"#));
    }

    #[test]
    fn test_reflection_box() {
        let html = reflection_box("Compare both objects.", "150px");
        assert!(html.contains("<p><em>Compare both objects.</em></p>"));
        assert!(html.contains("min-height: 150px"));

        let bare = reflection_box("", "100px");
        assert!(!bare.contains("<em>"));
    }

    #[test]
    fn test_wrap_section() {
        assert_eq!(
            wrap_section("calculation-box", "<p>Show work</p>\n"),
            "<div class=\"calculation-box\">\n<p>Show work</p>\n</div>\n"
        );
    }

    #[test]
    fn test_lab_header_all_fields() {
        let html = lab_header(&HeaderSpec::new("Lab 1").with_course_label("BIOL 8"));
        assert!(html.starts_with("<h1>Lab 1</h1>\n"));
        assert!(html.contains(r#"<p class="lab-course">BIOL 8</p>"#));
        for label in ["Name:", "Date:", "Section:"] {
            assert!(html.contains(label));
        }
    }

    #[test]
    fn test_lab_header_fields_toggle_independently() {
        let spec = HeaderSpec {
            include_date: false,
            ..HeaderSpec::new("Lab")
        };
        let html = lab_header(&spec);
        assert!(html.contains("Name:"));
        assert!(!html.contains("Date:"));
        assert!(html.contains("Section:"));
        assert!(!html.contains("lab-course"));
    }

    #[test]
    fn test_render_data_table_element() {
        let text = "<!-- lab:data-table rows=2 -->\n| A | B |\n|---|---|\n<!-- /lab:data-table -->";
        let elements = parse_directives(text);
        let html = render_element(&elements[0], &MarkdownConverter::new());
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<th>B</th>"));
        assert_eq!(html.matches(r#"<td class="row-number">"#).count(), 2);
    }

    #[test]
    fn test_render_object_selection_ignores_body() {
        let html = render_element(
            &element(DirectiveKind::ObjectSelection, "in_room=false"),
            &MarkdownConverter::new(),
        );
        assert_eq!(html, object_selection(true, true));
    }

    #[test]
    fn test_render_wrapping_kinds() {
        let markdown = MarkdownConverter::new();
        let cases = [
            (DirectiveKind::MeasurementFeasibility, "feasibility-section"),
            (DirectiveKind::Reflection, "reflection-box"),
            (DirectiveKind::Calculation, "calculation-box"),
        ];
        for (kind, class) in cases {
            let html = render_element(&element(kind, "Some **bold** text"), &markdown);
            assert!(html.starts_with(&format!("<div class=\"{class}\">")));
            assert!(html.contains("<strong>bold</strong>"));
        }
    }
}
