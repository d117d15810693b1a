//! Harness configuration.
//!
//! This module provides strongly-typed configuration for the harness,
//! loaded via the `config` crate from an optional file and environment
//! variables. Environment variables use `__` as the nesting separator, e.g.
//! `GATE__CLIENT_ID` or `GATE__ALLOWED_DOMAINS=acme.com,acme.org`.
//!
//! See [`GateConfig`] for the gate options.

use meetgate_access::GateConfig;
use config::Environment;
use serde::Deserialize;
use std::path::Path;

/// Harness configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct CheckConfig {
    /// Access gate configuration.
    pub gate: GateConfig,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Whether to pretty-print notification JSON.
    #[serde(default)]
    pub pretty: bool,
}

fn environment() -> Environment {
    Environment::default()
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("gate.allowed_domains")
}

impl CheckConfig {
    /// Loads configuration from an optional file overlaid with environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(file, environment())
    }

    fn load_with(file: Option<&Path>, env: Environment) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    /// Loads configuration from a file only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
    }
}
