//! Colored status lines for lab manual rendering.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Writes render progress to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Report a written worksheet or starter document (green).
    pub(crate) fn created(&self, path: &Path) {
        self.styled(&self.green, &format!("Created {}", path.display()));
    }

    /// Report a document skipped by a batch run (yellow).
    pub(crate) fn render_failed(&self, source: &Path, error: &dyn Display) {
        self.styled(
            &self.yellow,
            &format!("Failed {}: {error}", source.display()),
        );
    }

    /// Report batch totals, yellow when nothing was rendered.
    pub(crate) fn batch_summary(&self, rendered: usize, failed: usize) {
        let style = if rendered == 0 { &self.yellow } else { &self.green };
        self.styled(style, &summary_line(rendered, failed));
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// One-line batch result, e.g. `Rendered 3 lab manuals, 1 failed`.
fn summary_line(rendered: usize, failed: usize) -> String {
    match (rendered, failed) {
        (0, 0) => "No Markdown files found".to_owned(),
        (_, 0) => format!("Rendered {rendered} lab manual{}", plural(rendered)),
        _ => format!(
            "Rendered {rendered} lab manual{}, {failed} failed",
            plural(rendered)
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(0, 0), "No Markdown files found");
        assert_eq!(summary_line(1, 0), "Rendered 1 lab manual");
        assert_eq!(summary_line(3, 0), "Rendered 3 lab manuals");
        assert_eq!(summary_line(2, 1), "Rendered 2 lab manuals, 1 failed");
        assert_eq!(summary_line(0, 2), "Rendered 0 lab manuals, 2 failed");
    }
}
