//! Markdown to HTML conversion.

use pulldown_cmark::{Event, Options, Parser, html};

/// Converts Markdown to an HTML fragment with pulldown-cmark.
///
/// Tables, strikethrough and task lists are enabled. Soft line breaks are
/// rendered as `<br />` so that worksheet prompts written one per line
/// keep their line structure.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownConverter {
    gfm: bool,
    hard_breaks: bool,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    /// Create a converter with GFM extensions and hard line breaks enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            hard_breaks: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Render soft line breaks as `<br />` (enabled by default).
    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.hard_breaks = enabled;
        self
    }

    fn parser_options(self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Convert Markdown text to HTML.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> String {
        let hard_breaks = self.hard_breaks;
        let parser = Parser::new_ext(markdown, self.parser_options()).map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
