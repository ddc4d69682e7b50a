//! Batch rendering of a directory of lab manuals.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assemble::{LabRenderer, OutputFormat};
use crate::error::RenderError;

/// A document that failed to render during a batch run.
#[derive(Debug)]
pub struct BatchFailure {
    pub source: PathBuf,
    pub error: RenderError,
}

/// Outcome of [`render_directory`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths of successfully rendered documents, in render order.
    pub rendered: Vec<PathBuf>,
    /// Documents that failed, in render order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every discovered document rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render every lab manual in `source_dir` into `output_dir`.
///
/// Markdown files whose name contains "lab" are selected. If there are
/// none, every Markdown file is. A failed document is logged and recorded
/// in the report, and the remaining documents still render.
///
/// # Errors
///
/// Returns [`RenderError::NotADirectory`] if `source_dir` is missing or
/// not a directory, and an I/O error if it cannot be listed or
/// `output_dir` cannot be created.
pub fn render_directory(
    renderer: &LabRenderer,
    source_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<BatchReport, RenderError> {
    if !source_dir.is_dir() {
        return Err(RenderError::NotADirectory(source_dir.to_path_buf()));
    }

    fs::create_dir_all(output_dir).map_err(|e| RenderError::io(output_dir, e))?;

    let sources = find_lab_files(source_dir)?;
    tracing::info!(
        count = sources.len(),
        source_dir = %source_dir.display(),
        "Rendering lab manuals"
    );

    let mut report = BatchReport::default();
    for source in sources {
        let Some(stem) = source.file_stem() else {
            continue;
        };
        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(format.extension());
        let output = output_dir.join(file_name);

        match renderer.render(&source, &output, format) {
            Ok(path) => report.rendered.push(path),
            Err(error) => {
                tracing::warn!(source = %source.display(), %error, "Failed to render lab manual");
                report.failures.push(BatchFailure { source, error });
            }
        }
    }

    Ok(report)
}

/// Markdown files in `dir` (non-recursive), sorted by path.
fn find_lab_files(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let entries = fs::read_dir(dir).map_err(|e| RenderError::io(dir, e))?;

    let mut markdown = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| RenderError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            markdown.push(path);
        }
    }
    markdown.sort();

    let labs: Vec<PathBuf> = markdown
        .iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().to_lowercase().contains("lab"))
        })
        .cloned()
        .collect();

    Ok(if labs.is_empty() { markdown } else { labs })
}
