//! `labdoc render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use labdoc_config::{CliSettings, Config};
use labdoc_renderer::OutputFormat;

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown lab manual to render.
    source: PathBuf,

    /// Output file (default: source path with the format's extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: pdf or html (overrides config).
    #[arg(short, long)]
    format: Option<String>,

    /// Lab title (default: first `#` heading, then the file name).
    #[arg(long)]
    title: Option<String>,

    /// Course label shown under the title (overrides config).
    #[arg(long, env = "LABDOC_COURSE")]
    course: Option<String>,

    /// Omit the title and Name/Date/Section header.
    #[arg(long)]
    no_header: bool,

    /// Path to configuration file (default: auto-discover labdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document cannot be
    /// rendered.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            course_label: self.course,
            include_header: self.no_header.then_some(false),
            format: self.format,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let format: OutputFormat = config.render.format.parse()?;

        let target = self
            .output
            .unwrap_or_else(|| default_output(&self.source, format));

        output.info(&format!(
            "Rendering {} -> {}",
            self.source.display(),
            target.display()
        ));

        let renderer = renderer_from_config(&config, self.title);
        let written = renderer.render(&self.source, &target, format)?;

        output.created(&written);
        Ok(())
    }
}

/// Source path with its extension replaced by the format's.
fn default_output(source: &Path, format: OutputFormat) -> PathBuf {
    source.with_extension(format.extension())
}
