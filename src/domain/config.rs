//! Config - Application Configuration
//!
//! Stored as `lodging-admin.toml` in the platform config directory.
//! Local account passwords are sealed on disk and opened on load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::auth::Role;
use crate::error::Result;
use crate::helpers::{get_or_create_config_dir, open, seal, write_atomic};

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "lodging-admin.toml";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// UI language, e.g. "en" or "zh-CN". Detected from the OS when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Overrides the platform data directory for snapshots and the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Remote login settings
    pub login: LoginConfig,
    /// Accounts accepted when the login server is unreachable
    pub accounts: Vec<LocalAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: None,
            data_dir: None,
            login: LoginConfig::default(),
            accounts: vec![LocalAccount::new("admin", "admin", Role::Admin)],
        }
    }
}

/// Remote login endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoginConfig {
    /// Full URL the credentials are POSTed to
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api/login".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Fallback account. `password` is plaintext in memory, sealed in the file.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl LocalAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

impl std::fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAccount")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing or empty file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: AppConfig = toml::from_str(&content)?;
        for account in config.accounts.iter_mut() {
            match open(&account.password) {
                Ok(plain) => account.password = plain,
                Err(_) => {
                    warn!(username = %account.username, "Local account password is not sealed");
                }
            }
        }

        info!(path = ?path, accounts = config.accounts.len(), "Configuration loaded");
        Ok(config)
    }

    /// Save to `path`, sealing account passwords
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut on_disk = self.clone();
        for account in on_disk.accounts.iter_mut() {
            account.password = seal(&account.password)?;
        }

        let content = toml::to_string_pretty(&on_disk)?;
        write_atomic(path, content.as_bytes())?;
        info!(path = ?path, "Configuration saved");
        Ok(())
    }

    /// Find a local account by username
    pub fn account(&self, username: &str) -> Option<&LocalAccount> {
        self.accounts.iter().find(|a| a.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE_NAME)).expect("load");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.login.endpoint, "http://localhost:8080/api/login");
        assert_eq!(config.account("admin").map(|a| a.role), Some(Role::Admin));
    }

    #[test]
    fn test_save_seals_passwords() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.accounts.push(LocalAccount::new("clerk", "s3cret", Role::Staff));
        config.locale = Some("zh-CN".into());

        config.save_to(&path).expect("save");
        let raw = std::fs::read_to_string(&path).expect("read");
        assert!(!raw.contains("s3cret"));

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[login]\nendpoint = \"http://10.0.0.5/api/login\"\n").expect("write");

        let config = AppConfig::load_from(&path).expect("load");
        assert_eq!(config.login.endpoint, "http://10.0.0.5/api/login");
        assert_eq!(config.login.timeout_secs, 5);
        assert_eq!(config.accounts.len(), 1);
    }

    #[test]
    fn test_plaintext_password_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[[accounts]]\nusername = \"ops\"\npassword = \"plain\"\nrole = \"staff\"\n",
        )
        .expect("write");

        let config = AppConfig::load_from(&path).expect("load");
        assert_eq!(config.account("ops").map(|a| a.password.as_str()), Some("plain"));
    }
}
