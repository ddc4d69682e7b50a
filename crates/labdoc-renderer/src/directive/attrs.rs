//! Directive attribute parsing.
//!
//! Parses the attribute string of an opening marker such as
//! `<!-- lab:data-table rows=3 title="Observation Log" -->`.

use std::collections::HashMap;

/// Key-value attributes from a directive's opening marker.
///
/// Parsing is permissive: fragments that are not `key=value` pairs are
/// ignored, and when a key repeats the first occurrence wins.
///
/// # Example
///
/// ```
/// use labdoc_renderer::directive::DirectiveAttrs;
///
/// let attrs = DirectiveAttrs::parse(r#"rows=3 title="Observation Log""#);
/// assert_eq!(attrs.get("rows"), Some("3"));
/// assert_eq!(attrs.get("title"), Some("Observation Log"));
/// assert_eq!(attrs.get("missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveAttrs {
    attrs: HashMap<String, String>,
}

impl DirectiveAttrs {
    /// Parse an attribute string.
    ///
    /// Supports `key="value"`, `key='value'` and `key=value`.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut attrs = HashMap::new();
        let mut rest = input.trim();

        while !rest.is_empty() {
            let key_end = rest
                .find(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or(rest.len());
            let key = &rest[..key_end];
            let after_key = &rest[key_end..];

            if let Some(value_part) = after_key.strip_prefix('=') {
                let (value, remaining) = split_value(value_part);
                if !key.is_empty() {
                    attrs
                        .entry(key.to_owned())
                        .or_insert_with(|| value.to_owned());
                }
                rest = remaining.trim_start();
            } else {
                // Bare word
                rest = after_key.trim_start();
            }
        }

        Self { attrs }
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Parse an attribute as an unsigned integer.
    ///
    /// Returns `None` when the attribute is absent or not a number.
    #[must_use]
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Check if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Number of parsed attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }
}

/// Split a value off the front of `s`, returning `(value, rest)`.
///
/// An unterminated quote takes the remainder of the string.
fn split_value(s: &str) -> (&str, &str) {
    for quote in ['"', '\''] {
        if let Some(stripped) = s.strip_prefix(quote) {
            return match stripped.find(quote) {
                Some(end) => (&stripped[..end], &stripped[end + 1..]),
                None => (stripped, ""),
            };
        }
    }

    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}
