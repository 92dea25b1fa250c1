use config::{Config as ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::domain::Recipe;
use crate::error::Result;
use crate::types::ColorScheme;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiConfig {
    /// Scheme the app starts with. Toggling it is never written back.
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Recipes offered by the search. Empty means the built-in sample catalog.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SPARK_KITCHEN__UI__COLOR_SCHEME, etc.)
    /// 2. Config file at `path`, if given and present
    /// 3. Serde defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path.filter(|p| p.exists()) {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SPARK_KITCHEN")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Parse a TOML document (no environment overrides).
    pub fn from_toml(source: &str) -> Result<Self> {
        let config = ConfigBuilder::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
