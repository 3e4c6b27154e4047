//! Application configuration.
//!
//! The default configuration is baked into the binary from
//! `tire_map.toml`. A user file replaces it wholesale; keys missing from
//! the user file fall back to the built-in defaults of each section.

use std::path::Path;

use serde::Deserialize;
use tire_map_place::{MarkerSetBuilder, RecordFields, RouteFields};
use tire_map_render::{DocumentOptions, MapDocumentGenerator};
use tire_map_spatial::ViewportPolicy;

/// Configuration embedded at compile time.
const DEFAULT_CONFIG: &str = include_str!("../tire_map.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Point record key mapping.
    pub fields: RecordFields,
    /// Route record key mapping.
    pub routes: RouteFields,
    /// Map framing.
    pub viewport: ViewportPolicy,
    /// Map document presentation.
    pub document: DocumentOptions,
}

impl AppConfig {
    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads the configuration from `path`, or the embedded default when
    /// no path is given.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If the file is not valid TOML
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::parse(&std::fs::read_to_string(path)?)
            }
            None => Self::parse(DEFAULT_CONFIG),
        }
    }

    /// Marker builder using the configured field mapping and framing.
    #[must_use]
    pub fn marker_builder(&self) -> MarkerSetBuilder {
        MarkerSetBuilder::new(self.fields.clone(), self.viewport)
    }

    /// Document generator using the configured presentation settings.
    #[must_use]
    pub fn document_generator(&self) -> MapDocumentGenerator {
        MapDocumentGenerator::new(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn embedded_config_matches_built_in_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.fields, RecordFields::default());
        assert_eq!(config.routes, RouteFields::default());
        assert_eq!(config.viewport, ViewportPolicy::default());
        assert_eq!(config.document, DocumentOptions::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[fields]
latitude = ["y"]

[viewport]
regional_zoom = 12
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.fields.latitude, ["y"]);
        assert_eq!(config.fields.longitude, RecordFields::default().longitude);
        assert_eq!(config.viewport.regional_zoom, 12);
        assert_eq!(config.viewport.close_zoom, 16);
        assert_eq!(config.document.max_zoom, 18);
    }

    #[test]
    fn reports_invalid_toml() {
        assert!(matches!(
            AppConfig::parse("[viewport]\nclose_zoom = \"near\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn reports_missing_file() {
        assert!(matches!(
            AppConfig::load(Some(Path::new("/nonexistent/tire_map.toml"))),
            Err(ConfigError::Io(_))
        ));
    }
}
