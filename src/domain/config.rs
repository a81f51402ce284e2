use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::StandardPrefix;

/// Configuration for the compliance checks.
///
/// Holds the ID prefixes that mark needs as standard requirements or standard
/// work products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// ID prefixes of needs derived from standards.
    ///
    /// A need is a standard item if its ID starts with one of these.
    /// For example, `R_ISO26262`.
    standard_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            standard_prefixes: default_prefixes(),
        }
    }
}

/// Errors that can occur when loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates a configuration with the given standard prefixes.
    #[must_use]
    pub fn with_standard_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            standard_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the ID prefixes of standard needs.
    #[must_use]
    pub fn standard_prefixes(&self) -> &[String] {
        &self.standard_prefixes
    }
}

fn default_prefixes() -> Vec<String> {
    StandardPrefix::ALL
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_prefixes")]
        standard_prefixes: Vec<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { standard_prefixes } => Self { standard_prefixes },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            standard_prefixes: config.standard_prefixes,
        }
    }
}
