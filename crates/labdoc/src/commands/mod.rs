//! CLI command implementations.

pub(crate) mod batch;
pub(crate) mod new;
pub(crate) mod render;

pub(crate) use batch::BatchArgs;
pub(crate) use new::NewArgs;
pub(crate) use render::RenderArgs;

use labdoc_config::Config;
use labdoc_renderer::{CommandPdfEngine, LabRenderer, RenderOptions};

/// Build a renderer from loaded configuration.
///
/// `title` is only set for single-document renders.
pub(crate) fn renderer_from_config(config: &Config, title: Option<String>) -> LabRenderer {
    let engine = CommandPdfEngine::new(config.pdf.command.as_str()).with_args(&config.pdf.args);

    LabRenderer::new()
        .with_pdf_engine(engine)
        .with_options(RenderOptions {
            title,
            course_label: config.render.course_label.clone(),
            include_header: config.render.include_header,
        })
}

#[cfg(test)]
mod tests {
    use labdoc_config::CliSettings;

    use super::*;

    #[test]
    fn test_renderer_from_config_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labdoc.toml");
        std::fs::write(&path, "[render]\ncourse_label = \"GEOL 3\"\n").unwrap();
        let settings = CliSettings {
            include_header: Some(false),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        let renderer = renderer_from_config(&config, Some("Rocks".to_owned()));

        let options = renderer.options();
        assert_eq!(options.title.as_deref(), Some("Rocks"));
        assert_eq!(options.course_label.as_deref(), Some("GEOL 3"));
        assert!(!options.include_header);
    }
}
