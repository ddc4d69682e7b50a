//! Rendering error types.

use std::io;
use std::path::PathBuf;

use crate::pdf::PdfError;

/// Error returned when rendering a lab manual.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Source Markdown file does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Requested output format is not supported.
    #[error("Invalid output format: {0}. Must be 'pdf' or 'html'.")]
    InvalidFormat(String),
    /// Batch source is missing or not a directory.
    #[error("Directory does not exist: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Starter template name is not known.
    #[error("Unknown template: {name}. Available: {available}")]
    UnknownTemplate { name: String, available: String },
    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// PDF engine failure, passed through unchanged.
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
