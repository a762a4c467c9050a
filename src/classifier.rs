//! Extension to category classification.
//!
//! This module maps a file's extension to a category name using the loaded
//! [`CategoryConfig`](crate::config::CategoryConfig). Classification is a pure
//! lookup: no filesystem access, no error conditions. Unmatched and missing
//! extensions fall back to the default category.

use crate::config::CategoryConfig;
use std::collections::HashMap;
use std::path::Path;

/// Category assigned to files whose extension matches no configured category.
pub const DEFAULT_CATEGORY: &str = "Others";

/// Normalizes an extension for lookup: lowercased, with a leading dot.
///
/// The empty string (extensionless files) is passed through unchanged.
///
/// # Examples
///
/// ```
/// use organizer::classifier::normalize_extension;
///
/// assert_eq!(normalize_extension("JPG"), ".jpg");
/// assert_eq!(normalize_extension(".Mp4"), ".mp4");
/// assert_eq!(normalize_extension(""), "");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    if ext.is_empty() {
        return String::new();
    }
    let lowered = ext.to_lowercase();
    if lowered.starts_with('.') {
        lowered
    } else {
        format!(".{}", lowered)
    }
}

/// Extracts the normalized extension of a path.
///
/// Returns `".ext"` form, or the empty string for extensionless files.
/// Dotfiles such as `.gitignore` have no extension in `std::path` terms and
/// therefore classify to the default category.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Maps file extensions to category names.
///
/// Built once from the loaded configuration; the lookup table is immutable
/// for the rest of the run. When two categories claim the same extension the
/// first category in mapping order wins, decided here at construction time.
///
/// # Examples
///
/// ```
/// use organizer::classifier::Classifier;
/// use organizer::config::CategoryConfig;
///
/// let config: CategoryConfig =
///     serde_json::from_str(r#"{"Images": [".jpg"], "Documents": [".txt"]}"#).unwrap();
/// let classifier = Classifier::from_config(&config);
///
/// assert_eq!(classifier.classify(".jpg"), "Images");
/// assert_eq!(classifier.classify(".zip"), "Others");
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    extension_map: HashMap<String, String>,
    category_names: Vec<String>,
}

impl Classifier {
    /// Builds the extension lookup table from a category mapping.
    ///
    /// Extensions are normalized as they are inserted, so `"JPG"`, `"jpg"`
    /// and `".jpg"` in the configuration all match the same files.
    pub fn from_config(config: &CategoryConfig) -> Self {
        let mut extension_map: HashMap<String, String> = HashMap::new();
        let mut category_names: Vec<String> = Vec::new();

        for (category, extensions) in config.iter() {
            category_names.push(category.clone());
            for ext in extensions {
                let normalized = normalize_extension(ext);
                if normalized.is_empty() {
                    continue;
                }
                // First category in mapping order wins for duplicates
                extension_map
                    .entry(normalized)
                    .or_insert_with(|| category.clone());
            }
        }

        if !category_names.iter().any(|name| name == DEFAULT_CATEGORY) {
            category_names.push(DEFAULT_CATEGORY.to_string());
        }

        Self {
            extension_map,
            category_names,
        }
    }

    /// Returns the category name for an extension.
    ///
    /// Accepts any spelling (`"jpg"`, `".JPG"`, ...); the empty string and
    /// unmapped extensions return [`DEFAULT_CATEGORY`].
    pub fn classify(&self, extension: &str) -> &str {
        if extension.is_empty() {
            return DEFAULT_CATEGORY;
        }
        let normalized = normalize_extension(extension);
        self.extension_map
            .get(&normalized)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Returns the category name for a file path, based on its extension.
    pub fn classify_path(&self, path: &Path) -> &str {
        self.classify(&extension_of(path))
    }

    /// All category folder names this run can produce, including the default.
    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }
}
