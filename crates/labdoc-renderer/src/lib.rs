//! Lab manual rendering from directive-annotated Markdown.
//!
//! Lab manuals are ordinary Markdown with two additions: directive blocks
//! wrapped in HTML comment markers (`<!-- lab:data-table rows=3 -->` ...
//! `<!-- /lab:data-table -->`) that become structured worksheet widgets,
//! and inline `{fill:...}` placeholders that become form inputs.
//!
//! # Pipeline
//!
//! 1. [`directive::parse_directives`] locates directive blocks and their
//!    byte spans.
//! 2. [`widgets::render_element`] turns each block into an HTML fragment,
//!    which replaces the block in the Markdown source.
//! 3. The Markdown is converted to HTML with pulldown-cmark
//!    ([`MarkdownConverter`]).
//! 4. [`expand_fillable_fields`] turns placeholders into inputs.
//! 5. The body is wrapped in a page with the worksheet stylesheet and
//!    written as HTML or handed to a [`PdfEngine`].
//!
//! [`LabRenderer`] runs the whole pipeline for one document and
//! [`render_directory`] for a directory of them.
//!
//! # Example
//!
//! ```
//! use labdoc_renderer::expand_fillable_fields;
//!
//! let html = expand_fillable_fields("<p>Mass: {fill:number} g</p>");
//! assert_eq!(html, r#"<p>Mass: <input type="number" class="fill-number" /> g</p>"#);
//! ```

mod assemble;
mod batch;
pub mod directive;
mod error;
mod fill;
mod markdown;
mod page;
mod pdf;
mod templates;
pub mod widgets;

pub use assemble::{LabRenderer, OutputFormat, RenderOptions, render};
pub use batch::{BatchFailure, BatchReport, render_directory};
pub use error::RenderError;
pub use fill::{DEFAULT_TEXTAREA_ROWS, expand_fillable_fields};
pub use markdown::{MarkdownConverter, escape_html};
pub use page::{LAB_CSS, LAB_JS, PageData, render_page};
pub use pdf::{CommandPdfEngine, PdfEngine, PdfError};
pub use templates::LabTemplate;
