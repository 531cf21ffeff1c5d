//! Cart store configuration.
//!
//! # Environment Variables
//! - `CART_DB_PATH` - sled database directory (default: `cart.db`)
//! - `CART_STORAGE_KEY` - key the serialized cart lives under (default: `@RocketShoes:cart`)
use super::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
pub const DEFAULT_DB_PATH: &str = "cart.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub messages: Messages,
}

/// Strings pushed into the notification sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            out_of_stock: "Requested quantity is out of stock".to_string(),
            add_failed: "Failed to add product".to_string(),
            remove_failed: "Failed to remove product".to_string(),
            update_failed: "Failed to update product amount".to_string(),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            messages: Messages::default(),
        }
    }
}

impl CartConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
    pub fn set_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }
    pub fn set_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Load from the process environment, falling back to defaults for unset values
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // split out so tests don't have to touch the real environment
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("CART_DB_PATH") {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidEnvVar(
                    "CART_DB_PATH".into(),
                    "path is empty".into(),
                ));
            }
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = lookup("CART_STORAGE_KEY") {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidEnvVar(
                    "CART_STORAGE_KEY".into(),
                    "key is empty".into(),
                ));
            }
            config.storage_key = key;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "@RocketShoes:cart");
    }

    #[test]
    fn reads_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("CART_DB_PATH", "/tmp/carts"),
            ("CART_STORAGE_KEY", "shop:cart"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/carts"));
        assert_eq!(config.storage_key, "shop:cart");
    }

    #[test]
    fn rejects_empty_key() {
        let err = CartConfig::from_lookup(lookup(&[("CART_STORAGE_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "CART_STORAGE_KEY"));
    }
}
