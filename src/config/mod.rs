//! Configuration loading and management

use crate::core::auth::{AuthPolicies, Role};
use crate::core::query::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "ADDRESS_ADMIN_CONFIG";

/// Environment variable overriding `server.bind`
pub const BIND_ENV: &str = "ADDRESS_ADMIN_BIND";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Attach a permissive CORS layer
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            cors: false,
        }
    }
}

/// Pagination limits for list queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
        }
    }
}

/// A session token known to the token resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

/// Authorization settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Policy per operation
    pub policies: AuthPolicies,

    /// Token table for the built-in session resolver
    pub sessions: Vec<SessionConfig>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_PATH_ENV`], or defaults when unset,
    /// then apply [`BIND_ENV`]
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.server.bind = bind;
        }
        Ok(config)
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> Result<()> {
        let pagination = &self.pagination;
        if pagination.default_page_size == 0 {
            bail!("pagination.default_page_size must be at least 1");
        }
        if pagination.max_page_size < pagination.default_page_size {
            bail!(
                "pagination.max_page_size ({}) is smaller than default_page_size ({})",
                pagination.max_page_size,
                pagination.default_page_size
            );
        }

        let mut tokens = HashSet::new();
        for session in &self.auth.sessions {
            if session.token.is_empty() {
                bail!("session for user '{}' has an empty token", session.user_id);
            }
            if !tokens.insert(session.token.as_str()) {
                bail!("duplicate session token for user '{}'", session.user_id);
            }
        }
        Ok(())
    }
}
