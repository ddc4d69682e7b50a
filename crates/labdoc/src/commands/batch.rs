//! `labdoc batch` command implementation.

use std::path::PathBuf;

use clap::Args;
use labdoc_config::{CliSettings, Config};
use labdoc_renderer::{OutputFormat, render_directory};

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the batch command.
#[derive(Args)]
pub(crate) struct BatchArgs {
    /// Directory containing lab manuals (overrides config).
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format: pdf or html (overrides config).
    #[arg(short, long)]
    format: Option<String>,

    /// Course label shown under each title (overrides config).
    #[arg(long, env = "LABDOC_COURSE")]
    course: Option<String>,

    /// Path to configuration file (default: auto-discover labdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BatchArgs {
    /// Execute the batch command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory is
    /// missing, or any document fails to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            course_label: self.course,
            format: self.format,
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let format: OutputFormat = config.render.format.parse()?;
        let batch = &config.batch_resolved;

        output.info(&format!(
            "Rendering lab manuals from {} to {}",
            batch.source_dir.display(),
            batch.output_dir.display()
        ));

        let renderer = renderer_from_config(&config, None);
        let report = render_directory(&renderer, &batch.source_dir, &batch.output_dir, format)?;

        for path in &report.rendered {
            output.created(path);
        }
        for failure in &report.failures {
            output.render_failed(&failure.source, &failure.error);
        }
        output.batch_summary(report.rendered.len(), report.failures.len());

        if !report.is_success() {
            return Err(CliError::Batch(format!(
                "{} of {} lab manuals failed to render",
                report.failures.len(),
                report.failures.len() + report.rendered.len()
            )));
        }

        Ok(())
    }
}
