//! Directive scanner.
//!
//! Scans Markdown for `<!-- lab:<kind> attrs -->` ... `<!-- /lab:<kind> -->`
//! blocks. Each kind is scanned independently and the results are merged
//! into a single list ordered by position.
//!
//! Directives do not nest. When two matched blocks overlap, the one that
//! starts later is dropped and left as literal text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::fence::fenced_ranges;
use super::{DirectiveAttrs, DirectiveKind};

/// One compiled pattern per directive kind, in [`DirectiveKind::ALL`] order.
static PATTERNS: LazyLock<Vec<(DirectiveKind, Regex)>> = LazyLock::new(|| {
    DirectiveKind::ALL
        .into_iter()
        .map(|kind| {
            let name = regex::escape(kind.name());
            let pattern = format!(
                r"(?s)<!--\s*lab:{name}(?:\s+(.*?))?\s*-->(.*?)<!--\s*/lab:{name}\s*-->"
            );
            (kind, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// A directive block parsed from Markdown source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveElement {
    /// Directive kind.
    pub kind: DirectiveKind,
    /// Body between the opening and closing markers, trimmed.
    pub raw_content: String,
    /// Attributes from the opening marker.
    pub attrs: DirectiveAttrs,
    /// Byte range of the whole block, markers included, in the original text.
    pub span: Range<usize>,
}

/// Parse all lab directives from `text`, ordered by start offset.
///
/// Markers inside fenced code blocks are ignored. The input is never
/// modified, and spans always refer to `text` itself.
///
/// # Example
///
/// ```
/// use labdoc_renderer::directive::{DirectiveKind, parse_directives};
///
/// let text = "<!-- lab:reflection -->\nThoughts?\n<!-- /lab:reflection -->";
/// let elements = parse_directives(text);
///
/// assert_eq!(elements.len(), 1);
/// assert_eq!(elements[0].kind, DirectiveKind::Reflection);
/// assert_eq!(elements[0].raw_content, "Thoughts?");
/// assert_eq!(elements[0].span, 0..text.len());
/// ```
#[must_use]
pub fn parse_directives(text: &str) -> Vec<DirectiveElement> {
    let fenced = fenced_ranges(text);
    let in_fence = |pos: usize| fenced.iter().any(|r| r.contains(&pos));

    let mut elements = Vec::new();
    for (kind, pattern) in PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if in_fence(whole.start()) {
                continue;
            }

            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            elements.push(DirectiveElement {
                kind: *kind,
                raw_content: body.trim().to_owned(),
                attrs: DirectiveAttrs::parse(attrs),
                span: whole.range(),
            });
        }
    }

    elements.sort_by_key(|e| e.span.start);
    drop_overlapping(elements)
}

/// Keep only elements whose spans do not overlap an earlier kept element.
fn drop_overlapping(elements: Vec<DirectiveElement>) -> Vec<DirectiveElement> {
    let mut kept: Vec<DirectiveElement> = Vec::with_capacity(elements.len());

    for element in elements {
        if let Some(last) = kept.last()
            && element.span.start < last.span.end
        {
            tracing::warn!(
                kind = %element.kind,
                start = element.span.start,
                enclosing = %last.kind,
                "Nested lab directive ignored"
            );
            continue;
        }
        kept.push(element);
    }

    kept
}
