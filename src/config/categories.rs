//! Expense-category configuration loading from config.toml
//!
//! Expense records, expense templates, and budget category keys are all
//! validated against a single category set. A built-in default set is used
//! unless a `config.toml` with a `categories` list overrides it.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Categories available when no config.toml is present.
const DEFAULT_CATEGORIES: [&str; 12] = [
    "Housing",
    "Transportation",
    "Food & Dining",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Personal Care",
    "Education",
    "Travel",
    "Insurance",
    "Other",
];

/// Configuration structure representing the config.toml file
#[derive(Debug, Deserialize)]
struct Config {
    /// List of expense category labels
    categories: Vec<String>,
}

/// The set of expense categories accepted by record validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl CategorySet {
    /// Builds a set from explicit labels (primarily for config overrides)
    #[must_use]
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    /// Whether `category` is an accepted label
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Validates a category label, rejecting empty and unknown values
    pub fn validate(&self, category: &str) -> Result<()> {
        if category.trim().is_empty() {
            return Err(Error::MissingField { field: "category" });
        }
        if !self.contains(category) {
            return Err(Error::UnknownCategory {
                category: category.to_string(),
            });
        }
        Ok(())
    }

    /// The accepted labels, in configured order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.categories
    }
}

/// Loads the category set from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The `categories` list is missing or empty
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CategorySet> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.categories.is_empty() {
        return Err(Error::Config {
            message: "config.toml defines an empty category list".to_string(),
        });
    }

    Ok(CategorySet::new(config.categories))
}

/// Loads the category set from the default location (./config.toml),
/// falling back to the built-in defaults when no file exists.
pub fn load_default_config() -> Result<CategorySet> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(CategorySet::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_set_contains_expected_labels() {
        let set = CategorySet::default();
        assert!(set.contains("Housing"));
        assert!(set.contains("Food & Dining"));
        assert!(set.contains("Other"));
        assert!(!set.contains("Yachts"));
    }

    #[test]
    fn test_parse_category_config() {
        let toml_str = r#"
            categories = ["Rent", "Groceries", "Other"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        let set = CategorySet::new(config.categories);
        assert_eq!(set.labels().len(), 3);
        assert!(set.contains("Rent"));
        assert!(!set.contains("Housing"));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let set = CategorySet::default();
        let err = set.validate("Yachts").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { category } if category == "Yachts"));
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let set = CategorySet::default();
        let err = set.validate("  ").unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "category" }));
    }
}
