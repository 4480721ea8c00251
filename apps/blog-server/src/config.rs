//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use blog_infra::JsonFilePostStore;

/// Where posts are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// One JSON document at the given path.
    JsonFile(PathBuf),
    /// Process memory only.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 5000;

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source. Unusable values fall
    /// back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid PORT, using {}", Self::DEFAULT_PORT);
                Self::DEFAULT_PORT
            }),
            None => Self::DEFAULT_PORT,
        };

        let posts_file = lookup("POSTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(JsonFilePostStore::DEFAULT_PATH));

        let storage = match lookup("STORAGE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("json") => StorageConfig::JsonFile(posts_file),
            Some("memory") => StorageConfig::Memory,
            Some(other) => {
                tracing::warn!(value = %other, "Unknown STORAGE backend, using json");
                StorageConfig::JsonFile(posts_file)
            }
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port,
            storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.storage,
            StorageConfig::JsonFile(PathBuf::from("data/posts.json"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("POSTS_FILE", "/var/lib/blog/posts.json"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.storage,
            StorageConfig::JsonFile(PathBuf::from("/var/lib/blog/posts.json"))
        );
    }

    #[test]
    fn test_memory_storage() {
        let config = config_from(&[("STORAGE", "Memory")]);
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("STORAGE", "postgres")]);
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.storage,
            StorageConfig::JsonFile(PathBuf::from("data/posts.json"))
        );
    }
}
