use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::PagePermission;
use crate::error::{AccessError, Result};
use crate::matching::PathMatch;

/// Top-level portal configuration stored as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub access: AccessSettings,
    #[serde(default)]
    pub web: WebSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessSettings {
    /// Path matching mode ("prefix" or "segment").
    #[serde(default)]
    pub match_mode: PathMatch,
    /// Replacement page catalog. Empty keeps the built-in catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PagePermission>,
    /// Per-role default permission overrides.
    #[serde(default)]
    pub defaults: RoleDefaults,
}

/// Superadmin is not listed: it always covers the whole catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// SQLite file holding principal records.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Request path prefixes the page guard enforces.
    #[serde(default = "default_guarded_prefixes")]
    pub guarded_prefixes: Vec<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_jwt_secret() -> String {
    "portal-jwt-secret-change-me".to_string()
}
fn default_db_path() -> String {
    "principals.db".to_string()
}
fn default_guarded_prefixes() -> Vec<String> {
    vec!["/admin".to_string(), "/user".to_string()]
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            jwt_secret: default_jwt_secret(),
            db_path: default_db_path(),
            guarded_prefixes: default_guarded_prefixes(),
        }
    }
}

impl PortalConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AccessError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AccessError::TomlDe(e.to_string()))
    }

    /// Load config if present, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(AccessError::ConfigNotFound(p)) => {
                tracing::debug!(path = %p, "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AccessError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config for `portal init`.
    pub fn default_config(base_dir: &Path) -> Self {
        Self {
            access: AccessSettings::default(),
            web: WebSettings {
                db_path: base_dir.join("principals.db").display().to_string(),
                ..WebSettings::default()
            },
        }
    }

    /// Resolve the config file path: `<base_dir>/portal.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("portal.toml")
    }

    /// Resolve the default portal home directory: `~/.portal`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".portal"))
            .ok_or_else(|| AccessError::Config("Cannot determine home directory".to_string()))
    }
}
