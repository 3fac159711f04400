//! Shared configuration loader for the wikitown toolchain.
//!
//! `defaults/wikitown.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`WikitownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use wikitown_babel::UrlBases;

const DEFAULT_TOML: &str = include_str!("../defaults/wikitown.default.toml");

/// Name of the optional per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "wikitown.toml";

/// Top-level configuration consumed by wikitown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WikitownConfig {
    pub render: RenderConfig,
    pub convert: ConvertConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// URL prefixes used when rendering and when reading editor HTML back.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub media_base: String,
    pub wiki_base: String,
}

impl From<&RenderConfig> for UrlBases {
    fn from(config: &RenderConfig) -> Self {
        UrlBases::new(config.media_base.clone(), config.wiki_base.clone())
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub editor_key: String,
}

impl StoreConfig {
    /// The configured editor key, or `None` when saving is disabled.
    pub fn editor_key(&self) -> Option<String> {
        Some(self.editor_key.clone()).filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WikitownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WikitownConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.render.media_base, "/media/");
        assert_eq!(config.render.wiki_base, "/wiki/");
        assert!(!config.convert.html.standalone);
        assert_eq!(config.store.root, PathBuf::from("wikitown-data"));
        assert_eq!(config.store.editor_key(), None);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.media_base", "/files/")
            .expect("override to apply")
            .set_override("convert.html.standalone", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.render.media_base, "/files/");
        assert!(config.convert.html.standalone);
    }

    #[test]
    fn render_config_converts_to_url_bases() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(UrlBases::from(&config.render), UrlBases::default());
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[store]\neditor_key = \"s3cret\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.store.editor_key(), Some("s3cret".to_string()));
        assert_eq!(config.store.root, PathBuf::from("wikitown-data"));
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/wikitown.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here/wikitown.toml")
            .build();
        assert!(result.is_err());
    }
}
