//! HTML to PDF conversion.
//!
//! Pagination, font embedding and page-box sizing belong to the PDF engine.
//! This module only hands it a finished HTML document and stylesheet.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Error returned by a [`PdfEngine`].
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The engine executable could not be started.
    #[error("Failed to start PDF engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The engine ran but reported failure.
    #[error("PDF engine failed for {}: {stderr}", .output.display())]
    Failed { output: PathBuf, stderr: String },
    /// I/O error while preparing engine input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Converts an HTML document into a paginated PDF file.
pub trait PdfEngine: Send + Sync {
    /// Write `html`, styled with `css`, as a PDF to `output`.
    fn write_pdf(&self, html: &str, css: &str, output: &Path) -> Result<(), PdfError>;
}

/// PDF engine backed by an external command-line renderer.
///
/// The command is invoked as `<program> <args...> -s <stylesheet> - <output>`
/// with the HTML document on stdin. The default program is `weasyprint`.
#[derive(Clone, Debug)]
pub struct CommandPdfEngine {
    program: String,
    args: Vec<String>,
}

impl Default for CommandPdfEngine {
    fn default() -> Self {
        Self::new("weasyprint")
    }
}

impl CommandPdfEngine {
    /// Create an engine that runs `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments passed before the stylesheet and file arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl PdfEngine for CommandPdfEngine {
    fn write_pdf(&self, html: &str, css: &str, output: &Path) -> Result<(), PdfError> {
        let mut stylesheet = tempfile::Builder::new()
            .prefix("labdoc-")
            .suffix(".css")
            .tempfile()?;
        stylesheet.write_all(css.as_bytes())?;
        stylesheet.flush()?;

        tracing::debug!(program = %self.program, output = %output.display(), "Running PDF engine");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("-s")
            .arg(stylesheet.path())
            .arg("-")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PdfError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Closing stdin signals end of document. A broken pipe means the
        // engine exited early; its status and stderr are reported below.
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(html.as_bytes())
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }

        let result = child.wait_with_output()?;
        if !result.status.success() {
            return Err(PdfError::Failed {
                output: output.to_path_buf(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program() {
        assert_eq!(CommandPdfEngine::default().program(), "weasyprint");
    }

    #[test]
    fn test_with_args() {
        let engine = CommandPdfEngine::new("weasyprint").with_args(["--presentational-hints"]);
        assert_eq!(engine.args, vec!["--presentational-hints".to_owned()]);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pdf");
        let engine = CommandPdfEngine::new("labdoc-no-such-pdf-engine");

        let err = engine.write_pdf("<p>x</p>", "", &output).unwrap_err();

        assert!(matches!(err, PdfError::Spawn { .. }), "got {err:?}");
        assert!(err.to_string().contains("labdoc-no-such-pdf-engine"));
        assert!(!output.exists());
    }
}
