//! The `needs.json` export of sphinx-needs
//!
//! An export holds one set of needs per documentation version:
//!
//! ```json
//! {
//!   "current_version": "1.0",
//!   "versions": {
//!     "1.0": { "needs": { "WP_A": { "id": "WP_A", "type": "workproduct" } } }
//!   }
//! }
//! ```
//!
//! A bare map of ID to need is accepted as well.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::instrument;

use crate::domain::{Need, Needs};

/// Errors that can occur when loading needs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The document is not valid JSON, or not shaped like a needs export.
    #[error("invalid needs document: {0}")]
    Json(#[from] serde_json::Error),
    /// The requested version is not present in the export.
    #[error("version '{0}' not found in needs export")]
    UnknownVersion(String),
    /// The export contains no versions at all.
    #[error("needs export contains no versions")]
    NoVersions,
    /// A need is stored under a key that differs from its own ID.
    #[error("need stored under '{key}' has ID '{id}'")]
    IdMismatch {
        /// The key in the needs map.
        key: String,
        /// The `id` field of the need.
        id: String,
    },
}

#[derive(Debug, Deserialize)]
struct Export {
    #[serde(default)]
    current_version: Option<String>,
    versions: BTreeMap<String, Version>,
}

#[derive(Debug, Deserialize)]
struct Version {
    #[serde(default)]
    needs: BTreeMap<String, Need>,
}

/// A `needs.json` file on disk.
#[derive(Debug, Clone)]
pub struct NeedsFile {
    path: PathBuf,
    version: Option<String>,
}

impl NeedsFile {
    /// Refers to the export at the given path.
    ///
    /// Nothing is read until [`NeedsFile::load`] is called.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            version: None,
        }
    }

    /// Selects a documentation version other than the export's current one.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The path of the export.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the export.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if [`parse`] fails.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Needs, LoadError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let needs = parse(&content, self.version.as_deref())?;
        tracing::debug!(needs = needs.len(), "loaded needs");
        Ok(needs)
    }
}

/// Parses a needs export.
///
/// The version used is `version` if given, otherwise the export's
/// `current_version`, otherwise the last version in the export. `version` is
/// ignored for a bare map of needs.
///
/// Needs without an `id` take the key they are stored under.
///
/// # Errors
///
/// This function fails if:
///
/// - the content is not a JSON needs export
/// - the selected version does not exist, or there are no versions
/// - a need's `id` disagrees with its key
pub fn parse(content: &str, version: Option<&str>) -> Result<Needs, LoadError> {
    let document: serde_json::Value = serde_json::from_str(content)?;

    let raw = if document.get("versions").is_some() {
        let export: Export = serde_json::from_value(document)?;
        select_version(export, version)?
    } else {
        serde_json::from_value(document)?
    };

    raw.into_iter()
        .map(|(key, mut need)| {
            if need.id().is_empty() {
                need.set_id(key);
            } else if need.id() != key {
                return Err(LoadError::IdMismatch {
                    key,
                    id: need.id().to_string(),
                });
            }
            Ok(need)
        })
        .collect()
}

fn select_version(
    mut export: Export,
    requested: Option<&str>,
) -> Result<BTreeMap<String, Need>, LoadError> {
    let key = match requested.map(ToString::to_string).or(export.current_version) {
        Some(key) => key,
        None => export
            .versions
            .keys()
            .next_back()
            .cloned()
            .ok_or(LoadError::NoVersions)?,
    };

    tracing::debug!(version = %key, "selected needs version");
    export
        .versions
        .remove(&key)
        .map(|version| version.needs)
        .ok_or(LoadError::UnknownVersion(key))
}
