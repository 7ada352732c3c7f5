//! Read-only data catalog: aid resources, survival tips, emergency messages
//! and language names.
//!
//! Loaded once at startup, either from the copy embedded in the binary or
//! from a JSON file named by `CATALOG_PATH`, then shared behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Language used when a requested code has no entry
pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog is missing the 'en' entry in {0}")]
    MissingFallback(&'static str),
}

/// A real-world aid location or service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    resources: HashMap<String, Vec<ResourceEntry>>,
    #[serde(default)]
    tips: HashMap<String, Vec<String>>,
    emergency_messages: HashMap<String, String>,
    language_names: HashMap<String, String>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !self.emergency_messages.contains_key(FALLBACK_LANGUAGE) {
            return Err(CatalogError::MissingFallback("emergency_messages"));
        }
        if !self.language_names.contains_key(FALLBACK_LANGUAGE) {
            return Err(CatalogError::MissingFallback("language_names"));
        }
        Ok(())
    }

    /// Resources for a category; unknown categories yield an empty slice.
    pub fn lookup_resources(&self, category: &str) -> &[ResourceEntry] {
        self.resources.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Survival tips for a category; unknown categories yield an empty slice.
    pub fn lookup_tips(&self, category: &str) -> &[String] {
        self.tips.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Emergency text for a language code, falling back to English.
    pub fn emergency_message(&self, language: &str) -> &str {
        self.emergency_messages
            .get(language)
            .or_else(|| self.emergency_messages.get(FALLBACK_LANGUAGE))
            .map_or("", String::as_str)
    }

    /// Display name for a language code, falling back to English.
    pub fn language_name(&self, language: &str) -> &str {
        self.language_names
            .get(language)
            .or_else(|| self.language_names.get(FALLBACK_LANGUAGE))
            .map_or("English", String::as_str)
    }

    pub fn resource_categories(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn tip_categories(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tips.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
