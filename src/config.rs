//! Category mapping configuration.
//!
//! The mapping that drives classification is a user-editable JSON file:
//! a single object whose keys are category names and whose values are arrays
//! of extension strings. Extensions are matched case-insensitively and may be
//! written with or without the leading dot.
//!
//! # Configuration File Format
//!
//! ```json
//! {
//!     "Images": [".jpg", ".jpeg", ".png", ".gif"],
//!     "Videos": [".mp4", ".mkv", ".mov"],
//!     "Documents": [".txt", ".pdf", ".docx"],
//!     "Archives": [".zip", ".tar", ".gz"]
//! }
//! ```
//!
//! The mapping is loaded once per run and passed around by reference; it is
//! never mutated after loading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading the category mapping.
///
/// Both failure modes are fatal: a run never starts processing files with a
/// missing or malformed mapping.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// The file exists but is not a valid JSON category mapping.
    ConfigInvalid {
        /// The path that failed to parse.
        path: PathBuf,
        /// The parser's reason.
        reason: String,
    },
    /// IO error while reading the configuration file.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid { path, reason } => {
                write!(f, "Invalid configuration {}: {}", path.display(), reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The category name → extensions mapping loaded from JSON.
///
/// Categories are kept in an ordered map so that, when two categories claim
/// the same extension, the winner is deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryConfig {
    pub categories: BTreeMap<String, Vec<String>>,
}

impl CategoryConfig {
    /// Load the category mapping from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist,
    /// `ConfigError::ConfigInvalid` if JSON parsing fails, and
    /// `ConfigError::IoError` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Iterate over `(category, extensions)` pairs in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter()
    }

    /// Returns true if the mapping defines no categories at all.
    ///
    /// An empty mapping is legal; every file then classifies to the default
    /// category.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
