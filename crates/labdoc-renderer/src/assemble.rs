//! Document assembly.
//!
//! Sequences directive parsing, element rendering, Markdown conversion,
//! fillable-field expansion and page templating for one document, then
//! writes the result as HTML or hands it to a [`PdfEngine`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::directive::{fenced_ranges, parse_directives};
use crate::error::RenderError;
use crate::fill::expand_fillable_fields;
use crate::markdown::MarkdownConverter;
use crate::page::{LAB_CSS, LAB_JS, PageData, render_page};
use crate::pdf::{CommandPdfEngine, PdfEngine};
use crate::widgets::{HeaderSpec, lab_header, render_element};

static H1_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());

/// Output artifact format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Paginated PDF via the configured [`PdfEngine`].
    Pdf,
    /// Self-contained interactive HTML page.
    Html,
}

impl OutputFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            _ => Err(RenderError::InvalidFormat(s.to_owned())),
        }
    }
}

/// Per-document rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Explicit title. Falls back to the first `#` heading, then the file name.
    pub title: Option<String>,
    /// Course label shown under the title in the header.
    pub course_label: Option<String>,
    /// Prepend the title and Name/Date/Section fields.
    pub include_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            course_label: None,
            include_header: true,
        }
    }
}

/// Renders lab manual Markdown into worksheets.
///
/// A renderer holds no per-document state, so one instance can render any
/// number of documents.
///
/// # Example
///
/// ```
/// use labdoc_renderer::LabRenderer;
///
/// let renderer = LabRenderer::new();
/// let html = renderer.process_content("Value: {fill:number}");
/// assert!(html.contains(r#"<input type="number" class="fill-number" />"#));
/// ```
pub struct LabRenderer {
    markdown: MarkdownConverter,
    pdf: Box<dyn PdfEngine>,
    options: RenderOptions,
}

impl Default for LabRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LabRenderer {
    /// Create a renderer with default options and the `weasyprint` PDF engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            markdown: MarkdownConverter::new(),
            pdf: Box::new(CommandPdfEngine::default()),
            options: RenderOptions::default(),
        }
    }

    /// Use a different PDF engine.
    #[must_use]
    pub fn with_pdf_engine<E: PdfEngine + 'static>(mut self, engine: E) -> Self {
        self.pdf = Box::new(engine);
        self
    }

    /// Use a differently configured Markdown converter.
    #[must_use]
    pub fn with_markdown(mut self, markdown: MarkdownConverter) -> Self {
        self.markdown = markdown;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_course_label(mut self, label: impl Into<String>) -> Self {
        self.options.course_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.options.include_header = include_header;
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Expand directives and fillable fields in Markdown, returning body HTML.
    ///
    /// Each directive block is swapped for a marker comment on its own
    /// line, last-to-first so the spans still waiting stay valid. After
    /// Markdown conversion the markers are replaced with the rendered
    /// fragments, so fragment HTML never goes through the Markdown parser.
    #[must_use]
    pub fn process_content(&self, markdown: &str) -> String {
        let elements = parse_directives(markdown);
        tracing::debug!(count = elements.len(), "Parsed lab directives");

        let mut working = markdown.to_owned();
        for (idx, element) in elements.iter().enumerate().rev() {
            working.replace_range(element.span.clone(), &format!("\n{}\n", fragment_marker(idx)));
        }

        let mut html = self.markdown.convert(&working);
        for (idx, element) in elements.iter().enumerate() {
            let fragment = render_element(element, &self.markdown);
            html = html.replacen(&fragment_marker(idx), fragment.trim_end_matches('\n'), 1);
        }

        expand_fillable_fields(&html)
    }

    /// Build the complete page for `markdown`.
    ///
    /// `fallback_title` is used when no explicit title is set and the
    /// document has no `#` heading. HTML pages carry the interactive
    /// script, PDF pages do not.
    #[must_use]
    pub fn assemble_page(&self, markdown: &str, fallback_title: &str, format: OutputFormat) -> String {
        let title = self
            .options
            .title
            .clone()
            .or_else(|| first_heading(markdown))
            .unwrap_or_else(|| fallback_title.to_owned());

        let mut content = String::new();
        if self.options.include_header {
            let mut header = HeaderSpec::new(title.as_str());
            header.course_label.clone_from(&self.options.course_label);
            content.push_str(&lab_header(&header));
        }
        content.push_str(&self.process_content(markdown));

        render_page(&PageData {
            title: &title,
            content: &content,
            css: LAB_CSS,
            script: match format {
                OutputFormat::Html => Some(LAB_JS),
                OutputFormat::Pdf => None,
            },
        })
    }

    /// Render the Markdown file at `source` to `output`.
    ///
    /// The parent directory of `output` is created if needed. Returns the
    /// output path.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] before touching the file system if
    /// `source` does not exist. I/O and PDF engine errors are propagated.
    pub fn render(
        &self,
        source: &Path,
        output: &Path,
        format: OutputFormat,
    ) -> Result<PathBuf, RenderError> {
        if !source.is_file() {
            return Err(RenderError::NotFound(source.to_path_buf()));
        }

        let markdown =
            std::fs::read_to_string(source).map_err(|e| RenderError::io(source, e))?;

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
        }

        let page = self.assemble_page(&markdown, &title_from_path(source), format);

        match format {
            OutputFormat::Html => {
                std::fs::write(output, page).map_err(|e| RenderError::io(output, e))?;
            }
            OutputFormat::Pdf => self.pdf.write_pdf(&page, LAB_CSS, output)?,
        }

        tracing::info!(
            source = %source.display(),
            output = %output.display(),
            format = %format,
            "Rendered lab manual"
        );
        Ok(output.to_path_buf())
    }
}

/// Render a lab manual with the default PDF engine.
///
/// `format` is `"pdf"` or `"html"` (case-insensitive).
///
/// # Errors
///
/// Returns [`RenderError::NotFound`] if `source` does not exist and
/// [`RenderError::InvalidFormat`] for any other format. In both cases no
/// output is created.
pub fn render(
    source: &Path,
    output: &Path,
    format: &str,
    title: Option<&str>,
    course_label: Option<&str>,
    include_header: bool,
) -> Result<PathBuf, RenderError> {
    if !source.is_file() {
        return Err(RenderError::NotFound(source.to_path_buf()));
    }
    let format: OutputFormat = format.parse()?;

    let renderer = LabRenderer::new().with_options(RenderOptions {
        title: title.map(str::to_owned),
        course_label: course_label.map(str::to_owned),
        include_header,
    });
    renderer.render(source, output, format)
}

/// Marker line standing in for the fragment of directive `idx`.
fn fragment_marker(idx: usize) -> String {
    format!("<!-- labdoc-fragment-{idx} -->")
}

/// Text of the first level-one ATX heading outside code fences.
fn first_heading(markdown: &str) -> Option<String> {
    let fenced = fenced_ranges(markdown);

    H1_PATTERN
        .captures_iter(markdown)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|m| !fenced.iter().any(|r| r.contains(&m.start())))
        })
        .find_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|t| !t.is_empty())
}

/// Title from a file stem: `lab-01_intro` becomes `Lab 01 Intro`.
fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    stem.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
