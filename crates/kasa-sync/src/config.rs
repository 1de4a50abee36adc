//! # Kasa Configuration
//!
//! Endpoint and credential settings for the async edge.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KASA_API_URL=https://api.example.com                               │
//! │     KASA_API_TOKEN=...                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kasa/kasa.toml (Linux)                                   │
//! │     ~/Library/Application Support/pl.kasa.kasa/kasa.toml (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000, 10 second timeout, no token                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kasa.toml
//! [catalog]
//! base_url = "https://api.example.com"
//! remainder_path = "api/remainders"
//! request_timeout_secs = 10
//!
//! [persistence]
//! sales_path = "api/sales"
//!
//! [auth]
//! token = "eyJhbGciOi..."
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL shared by every endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the remainder catalog, relative to `base_url`.
    #[serde(default = "default_remainder_path")]
    pub remainder_path: String,

    /// Per-request timeout (seconds), enforced by the HTTP client.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_remainder_path() -> String {
    "api/remainders".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_base_url(),
            remainder_path: default_remainder_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// =============================================================================
// Persistence Settings
// =============================================================================

/// Where finished sales are posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceSettings {
    /// Path of the sales endpoint, relative to `catalog.base_url`.
    #[serde(default = "default_sales_path")]
    pub sales_path: String,
}

fn default_sales_path() -> String {
    "api/sales".to_string()
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        PersistenceSettings {
            sales_path: default_sales_path(),
        }
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Bearer token sent with every request, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration of the async edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KasaConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub persistence: PersistenceSettings,

    #[serde(default)]
    pub auth: AuthSettings,
}

impl KasaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (kasa.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading kasa config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load kasa config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Kasa config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        let base = Url::parse(&self.catalog.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(SyncError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.catalog.base_url
            )));
        }

        if self.catalog.request_timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        for (name, path) in [
            ("remainder_path", &self.catalog.remainder_path),
            ("sales_path", &self.persistence.sales_path),
        ] {
            if path.trim().is_empty() {
                return Err(SyncError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any `KASA_*` key source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("KASA_API_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(token) = lookup("KASA_API_TOKEN") {
            self.auth.token = Some(token).filter(|t| !t.trim().is_empty());
        }

        if let Some(path) = lookup("KASA_REMAINDER_PATH") {
            self.catalog.remainder_path = path;
        }

        if let Some(path) = lookup("KASA_SALES_PATH") {
            self.persistence.sales_path = path;
        }

        if let Some(timeout) = lookup("KASA_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.request_timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring unparseable KASA_REQUEST_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("pl", "kasa", "kasa")
            .map(|dirs| dirs.config_dir().join("kasa.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> SyncResult<Url> {
        let joined = format!(
            "{}/{}",
            self.catalog.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    pub fn remainder_url(&self) -> SyncResult<Url> {
        self.endpoint(&self.catalog.remainder_path)
    }

    pub fn sales_url(&self) -> SyncResult<Url> {
        self.endpoint(&self.persistence.sales_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.request_timeout_secs)
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("kasa-config-{}-{}", std::process::id(), name))
            .join("kasa.toml")
    }

    #[test]
    fn test_default_config() {
        let config = KasaConfig::default();
        assert_eq!(config.catalog.base_url, "http://localhost:3000");
        assert_eq!(config.catalog.request_timeout_secs, 10);
        assert!(config.token().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KasaConfig::default();

        config.catalog.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(SyncError::InvalidUrl(_))));

        config.catalog.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(SyncError::InvalidUrl(_))));

        config.catalog.base_url = "https://api.example.com".into();
        config.catalog.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(SyncError::InvalidConfig(_))));

        config.catalog.request_timeout_secs = 5;
        config.persistence.sales_path = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("KASA_API_URL", "https://kasa.example.pl"),
            ("KASA_API_TOKEN", "secret"),
            ("KASA_SALES_PATH", "v2/sales"),
            ("KASA_REQUEST_TIMEOUT_SECS", "oops"),
        ]
        .into_iter()
        .collect();

        let mut config = KasaConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.base_url, "https://kasa.example.pl");
        assert_eq!(config.token(), Some("secret"));
        assert_eq!(config.persistence.sales_path, "v2/sales");
        assert_eq!(config.catalog.request_timeout_secs, 10);
    }

    #[test]
    fn test_endpoint_joining() {
        let mut config = KasaConfig::default();
        config.catalog.base_url = "https://api.example.com/".into();
        assert_eq!(
            config.remainder_url().unwrap().as_str(),
            "https://api.example.com/api/remainders"
        );
        config.persistence.sales_path = "/api/sales".into();
        assert_eq!(
            config.sales_url().unwrap().as_str(),
            "https://api.example.com/api/sales"
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: KasaConfig = toml::from_str(
            r#"
            [catalog]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.remainder_path, "api/remainders");
        assert_eq!(config.persistence.sales_path, "api/sales");
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut config = KasaConfig::default();
        config.catalog.base_url = "https://api.example.com".into();
        config.auth.token = Some("abc".into());
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[catalog]"));
        assert!(contents.contains("[persistence]"));

        let parsed: KasaConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_rejects_garbage_file() {
        let path = scratch_path("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[catalog\nbase_url = ").unwrap();

        assert!(matches!(
            KasaConfig::load(Some(path.clone())),
            Err(SyncError::ConfigLoadFailed(_))
        ));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
