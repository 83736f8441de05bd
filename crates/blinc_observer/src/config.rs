//! Observer configuration
//!
//! Options can be built in code or read from a TOML file:
//!
//! ```toml
//! label = "cart-page"
//! cache = "patch"
//! skip_empty_patches = false
//! ```

use crate::error::{BindError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What a binding keeps as the baseline for its next diff
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStrategy {
    /// Keep the last patch. Keys unchanged on one cycle are re-sent on the
    /// next one.
    #[default]
    Patch,
    /// Keep the full last snapshot
    Snapshot,
}

/// Per-binding options
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Name attached to log events from this binding
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default)]
    pub cache: CacheStrategy,
    /// Do not call the sink when nothing changed
    #[serde(default)]
    pub skip_empty_patches: bool,
}

fn default_label() -> String {
    "observer".to_string()
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            cache: CacheStrategy::default(),
            skip_empty_patches: false,
        }
    }
}

impl ObserverConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_cache(mut self, cache: CacheStrategy) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_skip_empty_patches(mut self, skip: bool) -> Self {
        self.skip_empty_patches = skip;
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BindError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BindError::Config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BindError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObserverConfig::from_toml_str("").unwrap();

        assert_eq!(config, ObserverConfig::default());
        assert_eq!(config.cache, CacheStrategy::Patch);
        assert!(!config.skip_empty_patches);
        assert_eq!(config.label, "observer");
    }

    #[test]
    fn test_parse_all_fields() {
        let config = ObserverConfig::from_toml_str(
            r#"
            label = "cart-page"
            cache = "snapshot"
            skip_empty_patches = true
            "#,
        )
        .unwrap();

        assert_eq!(config.label, "cart-page");
        assert_eq!(config.cache, CacheStrategy::Snapshot);
        assert!(config.skip_empty_patches);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = ObserverConfig::from_toml_str(r#"cache = "everything""#).unwrap_err();
        assert!(matches!(err, BindError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ObserverConfig::default()
            .with_label("profile")
            .with_cache(CacheStrategy::Snapshot);

        let text = config.to_toml().unwrap();
        assert_eq!(ObserverConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ObserverConfig::load(Path::new("/nonexistent/observer.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
