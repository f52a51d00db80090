//! Configuration file handling for blobup

use anyhow::{Context, Result};
use blobup_client::UploaderConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::output::OutputFormat;

/// Server used when neither the command line nor the config file names one
pub const DEFAULT_SERVER: &str = "http://localhost:7071";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default server URL
    pub server: Option<String>,
    /// Upload endpoint path
    pub endpoint: Option<String>,
    /// Multipart field name for the files
    pub field_name: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns the path alongside the config only when the file was loaded.
    pub fn load() -> (Self, Option<PathBuf>) {
        match Self::config_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(_) => (Self::default(), None),
        }
    }

    /// Load `path` if it exists, falling back to defaults
    ///
    /// A file that cannot be read or parsed is reported with a warning and
    /// ignored.
    pub fn load_or_default(path: &Path) -> (Self, Option<PathBuf>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, Some(path.to_path_buf())),
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Ignoring config file");
                (Self::default(), None)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("blobup");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        server: Option<&str>,
        endpoint: Option<&str>,
        output: Option<OutputFormat>,
        no_color: bool,
    ) -> Result<MergedConfig> {
        let server = server
            .map(String::from)
            .or_else(|| self.server.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        let mut builder = UploaderConfig::builder(server);
        if let Some(endpoint) = endpoint.map(String::from).or_else(|| self.endpoint.clone()) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(field_name) = &self.field_name {
            builder = builder.field_name(field_name.clone());
        }
        if let Some(ms) = self.request_timeout_ms {
            builder = builder.request_timeout_ms(ms);
        }
        if let Some(ms) = self.connect_timeout_ms {
            builder = builder.connect_timeout_ms(ms);
        }

        let output = match (output, &self.output) {
            (Some(format), _) => format,
            (None, Some(name)) => OutputFormat::from_str(name, true)
                .map_err(|e| anyhow::anyhow!("Invalid output format '{}' in config: {}", name, e))?,
            (None, None) => OutputFormat::default(),
        };

        Ok(MergedConfig {
            uploader: builder.build(),
            output,
            no_color: no_color || self.no_color.unwrap_or(false),
        })
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub uploader: UploaderConfig,
    pub output: OutputFormat,
    pub no_color: bool,
}
