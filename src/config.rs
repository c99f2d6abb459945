//! Store configuration
//!
//! Nothing is read from files or the environment; callers build a
//! `StoreConfig` in code (or deserialize one from their own settings).

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PREFIX;
use crate::error::{Result, StoreError};

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Literal prepended to every logical key. Sweeps and clears only
    /// touch keys starting with it.
    pub prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a config with a custom namespace prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self> {
        let config = Self {
            prefix: prefix.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would let sweeps reach foreign keys
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(StoreError::InvalidPrefix {
                reason: "prefix must not be empty",
            });
        }
        Ok(())
    }

    /// Storage key for a logical key
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Logical key for a storage key, if it belongs to this namespace
    pub fn logical<'a>(&self, storage_key: &'a str) -> Option<&'a str> {
        storage_key.strip_prefix(self.prefix.as_str())
    }

    /// Whether a storage key belongs to this namespace
    pub fn owns(&self, storage_key: &str) -> bool {
        storage_key.starts_with(self.prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        let config = StoreConfig::default();
        assert_eq!(config.prefix, DEFAULT_PREFIX);
        assert_eq!(config.namespaced("token"), format!("{DEFAULT_PREFIX}token"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(matches!(
            StoreConfig::with_prefix(""),
            Err(StoreError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_deserialized_empty_prefix_fails_validation() {
        let config: StoreConfig = serde_json::from_str(r#"{"prefix":""}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logical_strips_prefix() {
        let config = StoreConfig::with_prefix("app/").unwrap();
        assert_eq!(config.logical("app/session"), Some("session"));
        assert_eq!(config.logical("other/session"), None);
        assert!(config.owns("app/"));
        assert!(!config.owns("ap"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }
}
