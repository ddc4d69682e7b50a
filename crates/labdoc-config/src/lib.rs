//! Configuration management for labdoc.
//!
//! Parses `labdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.course_label`
//! - `pdf.command`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override course label.
    pub course_label: Option<String>,
    /// Override header inclusion.
    pub include_header: Option<bool>,
    /// Override output format.
    pub format: Option<String>,
    /// Override PDF engine command.
    pub pdf_command: Option<String>,
    /// Override batch source directory.
    pub source_dir: Option<PathBuf>,
    /// Override batch output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "labdoc.toml";

/// Output formats accepted in `render.format`.
const FORMATS: [&str; 2] = ["pdf", "html"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering defaults.
    pub render: RenderConfig,
    /// PDF engine configuration.
    pub pdf: PdfConfig,
    /// Batch configuration (paths are relative strings from TOML).
    batch: BatchConfigRaw,

    /// Resolved batch configuration (set after loading).
    #[serde(skip)]
    pub batch_resolved: BatchConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Rendering defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Course label shown under each lab title.
    pub course_label: Option<String>,
    /// Whether to prepend the Name/Date/Section header.
    pub include_header: bool,
    /// Default output format (`pdf` or `html`).
    pub format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            course_label: None,
            include_header: true,
            format: "pdf".to_owned(),
        }
    }
}

/// PDF engine configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Engine executable.
    pub command: String,
    /// Extra arguments passed to the engine.
    pub args: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            command: "weasyprint".to_owned(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BatchConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved batch configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BatchConfig {
    /// Directory containing lab manual Markdown files.
    pub source_dir: PathBuf,
    /// Directory receiving rendered files.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pdf.command`").
        field: String,
        /// Error message (e.g., "${`PDF_ENGINE`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `labdoc.toml` in the current directory and
    /// its parents, falling back to defaults.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(course_label) = &settings.course_label {
            self.render.course_label = Some(course_label.clone());
        }
        if let Some(include_header) = settings.include_header {
            self.render.include_header = include_header;
        }
        if let Some(format) = &settings.format {
            self.render.format.clone_from(format);
        }
        if let Some(command) = &settings.pdf_command {
            self.pdf.command.clone_from(command);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.batch_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.batch_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            render: RenderConfig::default(),
            pdf: PdfConfig::default(),
            batch: BatchConfigRaw::default(),
            batch_resolved: BatchConfig {
                source_dir: base.join("labs"),
                output_dir: base.join("build"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `pdf.command` is empty or
    /// `render.format` is not a supported format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.pdf.command, "pdf.command")?;

        let format = self.render.format.to_ascii_lowercase();
        if !FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "render.format must be one of {}, got '{}'",
                FORMATS.join(", "),
                self.render.format
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref label) = self.render.course_label {
            self.render.course_label = Some(expand::expand_env(label, "render.course_label")?);
        }
        self.pdf.command = expand::expand_env(&self.pdf.command, "pdf.command")?;
        Ok(())
    }

    /// Resolve batch directories relative to the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.batch_resolved = BatchConfig {
            source_dir: resolve(self.batch.source_dir.as_deref(), "labs"),
            output_dir: resolve(self.batch.output_dir.as_deref(), "build"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/course"));
        assert_eq!(config.render.course_label, None);
        assert!(config.render.include_header);
        assert_eq!(config.render.format, "pdf");
        assert_eq!(config.pdf.command, "weasyprint");
        assert!(config.pdf.args.is_empty());
        assert_eq!(config.batch_resolved.source_dir, PathBuf::from("/course/labs"));
        assert_eq!(config.batch_resolved.output_dir, PathBuf::from("/course/build"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.format, "pdf");
        assert_eq!(config.pdf.command, "weasyprint");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[render]
course_label = "PHYS 101"
include_header = false
format = "html"

[pdf]
command = "/opt/weasyprint/bin/weasyprint"
args = ["--presentational-hints"]

[batch]
source_dir = "manuals"
output_dir = "dist"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.course_label.as_deref(), Some("PHYS 101"));
        assert!(!config.render.include_header);
        assert_eq!(config.render.format, "html");
        assert_eq!(config.pdf.command, "/opt/weasyprint/bin/weasyprint");
        assert_eq!(config.pdf.args, vec!["--presentational-hints".to_owned()]);
        assert_eq!(config.batch.source_dir.as_deref(), Some("manuals"));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[batch]
source_dir = "manuals"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.batch_resolved.source_dir,
            PathBuf::from("/project/manuals")
        );
        assert_eq!(
            config.batch_resolved.output_dir,
            PathBuf::from("/project/build")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[render]\ncourse_label = \"CHEM 1A\"\n\n[batch]\noutput_dir = \"out\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.render.course_label.as_deref(), Some("CHEM 1A"));
        assert_eq!(config.batch_resolved.source_dir, dir.path().join("labs"));
        assert_eq!(config.batch_resolved.output_dir, dir.path().join("out"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/course"));
        let overrides = CliSettings {
            course_label: Some("BIOL 8".to_owned()),
            include_header: Some(false),
            format: Some("html".to_owned()),
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.course_label.as_deref(), Some("BIOL 8"));
        assert!(!config.render.include_header);
        assert_eq!(config.render.format, "html");
        assert_eq!(config.batch_resolved.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.batch_resolved.source_dir, PathBuf::from("/course/labs")); // Unchanged
        assert_eq!(config.pdf.command, "weasyprint"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/course"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.render.format, "pdf");
        assert!(config.render.include_header);
        assert_eq!(config.render.course_label, None);
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render]\nformat = \"html\"\n").unwrap();
        let overrides = CliSettings {
            format: Some("pdf".to_owned()),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.render.format, "pdf");
    }

    #[test]
    fn test_cli_settings_invalid_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            format: Some("docx".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LABDOC_TEST_LABEL", "ASTR 2");
            std::env::remove_var("LABDOC_TEST_PDF");
        }

        let toml = r#"
[render]
course_label = "${LABDOC_TEST_LABEL}"

[pdf]
command = "${LABDOC_TEST_PDF:-weasyprint}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.render.course_label.as_deref(), Some("ASTR 2"));
        assert_eq!(config.pdf.command, "weasyprint");

        unsafe {
            std::env::remove_var("LABDOC_TEST_LABEL");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LABDOC_MISSING_PDF_ENGINE");
        }

        let toml = r#"
[pdf]
command = "${LABDOC_MISSING_PDF_ENGINE}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("LABDOC_MISSING_PDF_ENGINE"));
        assert!(err.to_string().contains("pdf.command"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        Config::default_with_base(Path::new("/course")).validate().unwrap();
    }

    #[test]
    fn test_validate_format_case_insensitive() {
        let mut config = Config::default_with_base(Path::new("/course"));
        config.render.format = "HTML".to_owned();
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_unknown_format() {
        let mut config = Config::default_with_base(Path::new("/course"));
        config.render.format = "docx".to_owned();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("render.format"));
        assert!(err.to_string().contains("docx"));
    }

    #[test]
    fn test_validate_empty_pdf_command() {
        let mut config = Config::default_with_base(Path::new("/course"));
        config.pdf.command = "  ".to_owned();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("pdf.command cannot be empty"));
    }
}
