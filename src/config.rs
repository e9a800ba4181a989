//! Configuration file handling
//!
//! Optional TOML file supplying output and filter defaults. Command-line
//! flags override anything set here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_DATE_FORMAT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectConfiguration {
    pub output: OutputSettings,
    pub filter: FilterSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// chrono `strftime` format for last-modified dates
    pub date_format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
    /// Service identifiers or glob patterns to keep (empty = all)
    pub services: Vec<String>,
}

impl InspectConfiguration {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("output.date_format must not be empty".to_string()));
        }
        // chrono reports bad specifiers as Item::Error instead of failing
        if chrono::format::StrftimeItems::new(&self.output.date_format)
            .any(|item| matches!(item, chrono::format::Item::Error))
        {
            return Err(ConfigError::Invalid(format!(
                "output.date_format '{}' is not a valid strftime format",
                self.output.date_format
            )));
        }
        crate::tcc::filter::validate_service_filters(&self.filter.services)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}
