//! `labdoc new` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use console::Term;
use labdoc_renderer::LabTemplate;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the new command.
#[derive(Args)]
pub(crate) struct NewArgs {
    /// Template name: basic, measurement or observation.
    template: String,

    /// File to write (default: print to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl NewArgs {
    /// Execute the new command.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or the file cannot be
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let template: LabTemplate = self.template.parse()?;

        match self.output {
            Some(path) => {
                write_template(template, &path)?;
                Output::new().created(&path);
            }
            None => Term::stdout().write_str(template.markdown())?,
        }

        Ok(())
    }
}

fn write_template(template: LabTemplate, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, template.markdown())?;
    Ok(())
}
