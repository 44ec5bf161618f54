//! Application configuration
//!
//! Loaded from a TOML file (default `<config_dir>/billboard-service/config.toml`).
//! A missing file yields defaults. `JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE`
//! and `DATABASE_URL` override the file.
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 8080
//!
//! [security]
//! jwt_secret = "at-least-32-bytes-of-signing-key..."
//! jwt_issuer = "billboard-api"
//! jwt_audience = "billboard-admin"
//!
//! [admin]
//! username = "admin"
//! password = "change-me"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "BILLBOARD_CONFIG";

/// Shortest accepted HS256 signing key, in bytes
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub bcrypt_cost: u32,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "billboard-api".to_string(),
            jwt_audience: "billboard-admin".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for SecuritySection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecuritySection")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// SuperAdmin created on startup when no admin account exists.
/// An empty password disables the bootstrap.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    pub username: String,
    pub password: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for AdminSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSection")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub security: SecuritySection,
    pub admin: AdminSection,
    pub logging: LoggingSection,
    pub cors: CorsSection,
}

impl AppConfig {
    /// Read `path` (defaults when it does not exist), then apply environment
    /// overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override file values with whatever `lookup` returns for the
    /// `JWT_*` and `DATABASE_URL` keys. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = get("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Some(v) = get("JWT_AUDIENCE") {
            self.security.jwt_audience = v;
        }
        if let Some(v) = get("DATABASE_URL") {
            self.database.url = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sec = &self.security;
        if sec.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "security.jwt_secret is not set (or JWT_SECRET)".into(),
            ));
        }
        if sec.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "security.jwt_secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if sec.jwt_issuer.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_issuer is empty".into()));
        }
        if sec.jwt_audience.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_audience is empty".into()));
        }
        if !(4..=31).contains(&sec.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost must be within 4..=31, got {}",
                sec.bcrypt_cost
            )));
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".into()));
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            issuer: self.security.jwt_issuer.clone(),
            audience: self.security.jwt_audience.clone(),
        }
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

/// `$BILLBOARD_CONFIG`, else `<config_dir>/billboard-service/config.toml`,
/// else `./config.toml` when no config directory is known.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs_next::config_dir()
        .map(|dir| dir.join("billboard-service").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn valid() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.security.jwt_secret = SECRET.to_string();
        cfg
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [server]
            api_port = 9090

            [security]
            jwt_issuer = "issuer-x"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.security.jwt_issuer, "issuer-x");
        assert_eq!(cfg.security.jwt_audience, "billboard-admin");
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/billboard/config.toml")).unwrap();
        assert_eq!(cfg.server.api_port, 8080);
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = [
            ("JWT_SECRET", SECRET),
            ("JWT_AUDIENCE", "aud-from-env"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ISSUER", ""),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.security.jwt_secret, SECRET);
        assert_eq!(cfg.security.jwt_audience, "aud-from-env");
        assert_eq!(cfg.security.jwt_issuer, "billboard-api");
        assert_eq!(cfg.database.url, "sqlite::memory:");
    }

    #[test]
    fn validation_rejects_weak_security_settings() {
        assert!(valid().validate().is_ok());
        assert!(AppConfig::default().validate().is_err());

        let mut short = valid();
        short.security.jwt_secret = "too-short".into();
        assert!(short.validate().is_err());

        let mut no_aud = valid();
        no_aud.security.jwt_audience = " ".into();
        assert!(no_aud.validate().is_err());

        let mut cost = valid();
        cost.security.bcrypt_cost = 3;
        assert!(cost.validate().is_err());
    }

    #[test]
    fn secrets_are_not_debug_printed() {
        let mut cfg = valid();
        cfg.admin.password = "hunter2".into();
        let out = format!("{:?}", cfg);
        assert!(!out.contains(SECRET));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn jwt_config_mirrors_security_section() {
        let jwt = valid().jwt_config();
        assert_eq!(jwt.issuer, "billboard-api");
        assert_eq!(jwt.audience, "billboard-admin");
    }
}
