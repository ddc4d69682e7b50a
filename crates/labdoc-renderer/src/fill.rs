//! Fillable-field expansion.
//!
//! Turns `{fill}` placeholder tokens in rendered HTML into form controls.
//! Rules run in a fixed order, most specific first, and each rule works on
//! the output of the one before it. No rule emits text that another rule
//! matches. Placeholders inside `<code>` elements are documentation and
//! are left as written.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::directive::DirectiveAttrs;

/// Visible rows for a `{fill:textarea}` without a usable `rows=` value.
pub const DEFAULT_TEXTAREA_ROWS: usize = 3;

const TEXT_INPUT: &str = r#"<input type="text" class="fill-text" />"#;
const NUMBER_INPUT: &str = r#"<input type="number" class="fill-number" />"#;
const FILLABLE_CELL: &str = r#"<td class="fillable">&nbsp;</td>"#;

/// A single placeholder substitution rule.
struct FillRule {
    pattern: Regex,
    expand: fn(&Captures<'_>) -> String,
}

impl FillRule {
    fn new(pattern: &str, expand: fn(&Captures<'_>) -> String) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            expand,
        }
    }

    fn apply<'a>(&self, html: &'a str) -> Cow<'a, str> {
        self.pattern
            .replace_all(html, |caps: &Captures<'_>| (self.expand)(caps))
    }
}

static FILL_RULES: LazyLock<[FillRule; 5]> = LazyLock::new(|| {
    [
        FillRule::new(r"\{fill:text\}", |_| TEXT_INPUT.to_owned()),
        FillRule::new(r"\{fill:number\}", |_| NUMBER_INPUT.to_owned()),
        FillRule::new(r"\{fill:textarea(?:\s+([^}]*))?\}", textarea),
        // Cells get a styling hook instead of a nested input
        FillRule::new(r"<td(\s[^>]*)?>\s*\{fill\}\s*</td>", fillable_cell),
        FillRule::new(r"\{fill\}", |_| TEXT_INPUT.to_owned()),
    ]
});

/// Code elements, inline or inside `<pre>`.
static CODE_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code\b[^>]*>.*?</code>").unwrap());

/// Keeps cell attributes such as column alignment.
fn fillable_cell(caps: &Captures<'_>) -> String {
    match caps.get(1) {
        Some(attrs) => format!(r#"<td class="fillable"{}>&nbsp;</td>"#, attrs.as_str()),
        None => FILLABLE_CELL.to_owned(),
    }
}

fn textarea(caps: &Captures<'_>) -> String {
    let rows = caps
        .get(1)
        .and_then(|m| DirectiveAttrs::parse(m.as_str()).get_usize("rows"))
        .unwrap_or(DEFAULT_TEXTAREA_ROWS);
    format!(r#"<textarea rows="{rows}" class="fill-textarea"></textarea>"#)
}

/// Expand `{fill}` placeholders into interactive form controls.
///
/// | Token | Result |
/// |-------|--------|
/// | `{fill:text}` | text input |
/// | `{fill:number}` | number input |
/// | `{fill:textarea rows=N}` | textarea with `N` rows (default 3) |
/// | `<td>{fill}</td>` | `<td class="fillable">&nbsp;</td>` |
/// | `{fill}` | text input |
///
/// # Example
///
/// ```
/// use labdoc_renderer::expand_fillable_fields;
///
/// let html = expand_fillable_fields("<p>Value: {fill:number}</p>");
/// assert_eq!(html, r#"<p>Value: <input type="number" class="fill-number" /></p>"#);
/// ```
#[must_use]
pub fn expand_fillable_fields(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut cursor = 0;
    for code in CODE_ELEMENT.find_iter(html) {
        output.push_str(&expand_segment(&html[cursor..code.start()]));
        output.push_str(code.as_str());
        cursor = code.end();
    }
    output.push_str(&expand_segment(&html[cursor..]));
    output
}

fn expand_segment(html: &str) -> String {
    let mut output = html.to_owned();
    for rule in FILL_RULES.iter() {
        let replaced = match rule.apply(&output) {
            Cow::Owned(replaced) => replaced,
            Cow::Borrowed(_) => continue,
        };
        output = replaced;
    }
    output
}
