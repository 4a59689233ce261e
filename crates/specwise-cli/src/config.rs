//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use specwise_domain::Product;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Products used by `eval` and to seed the store for `query`
    #[serde(default = "default_catalogue")]
    pub catalogue: Vec<Product>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Log filter used when `RUST_LOG` is unset and no `-v` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".specwise").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(product) = self.catalogue.iter().find(|p| p.category.is_empty()) {
            return Err(CliError::Config(format!(
                "Product '{}' has an empty category",
                product.name
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            catalogue: default_catalogue(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_catalogue() -> Vec<Product> {
    vec![
        Product::new("Kettle", "cat1", 2_499),
        Product::new("Mug", "cat1", 399),
        Product::new("Toaster", "cat2", 3_999),
        Product::new("Lamp", "cat3", 1_299),
    ]
}
