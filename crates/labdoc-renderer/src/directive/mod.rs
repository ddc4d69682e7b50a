//! Lab directive parsing.
//!
//! Lab manuals embed structured widget requests in Markdown as HTML
//! comment pairs:
//!
//! ```text
//! <!-- lab:data-table rows=3 title="Observation Log" -->
//! | Time | Observation | Notes |
//! |------|-------------|-------|
//! <!-- /lab:data-table -->
//! ```
//!
//! [`parse_directives`] locates these blocks and returns them as
//! [`DirectiveElement`]s ordered by position. Each element carries the
//! byte span of the full block in the original text so the assembler can
//! substitute rendered HTML back in place.
//!
//! Recognized kinds are listed in [`DirectiveKind`]. Markers for any other
//! name are not directives and stay in the document untouched.

mod attrs;
mod fence;
mod kind;
mod parser;
mod table;

pub(crate) use fence::fenced_ranges;
pub use attrs::DirectiveAttrs;
pub use kind::DirectiveKind;
pub use parser::{DirectiveElement, parse_directives};
pub use table::{DEFAULT_MEASUREMENT_COLUMNS, DEFAULT_TABLE_ROWS, TableSpec};
