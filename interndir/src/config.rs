// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_PATH: &str = "interns.db";
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 8;
pub const SESSION_COOKIE_NAME: &str = "intern_admin_session";

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw values as read from the environment, before validation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_path: String,
    pub session_secret: String,
    pub admin_password_hash: String,
    pub session_ttl_hours: String,
    pub production: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };
        Self {
            bind_address: var("INTERNDIR_BIND", DEFAULT_BIND_ADDRESS),
            database_path: var("INTERNDIR_DB", DEFAULT_DATABASE_PATH),
            session_secret: var("SESSION_SECRET", ""),
            admin_password_hash: var("ADMIN_PASSWORD_HASH", ""),
            session_ttl_hours: var("INTERNDIR_SESSION_TTL_HOURS", ""),
            production: var("INTERNDIR_PRODUCTION", "false"),
            log_level: var("INTERNDIR_LOG", "info"),
        }
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.session_secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "SESSION_SECRET is not set".to_string(),
            ));
        }
        if self.admin_password_hash.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ADMIN_PASSWORD_HASH is not set".to_string(),
            ));
        }

        let bind: SocketAddr = self.bind_address.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "Invalid bind address '{}'",
                self.bind_address
            ))
        })?;

        let ttl_hours = if self.session_ttl_hours.trim().is_empty() {
            DEFAULT_SESSION_TTL_HOURS
        } else {
            self.session_ttl_hours.trim().parse::<u64>().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "Invalid session TTL '{}'",
                    self.session_ttl_hours
                ))
            })?
        };
        if ttl_hours == 0 {
            return Err(ConfigError::ValidationError(
                "Session TTL must be at least one hour".to_string(),
            ));
        }

        let production = matches!(
            self.production.trim().to_lowercase().as_str(),
            "1" | "true" | "yes"
        );

        Ok(ValidatedConfig {
            bind,
            database_path: PathBuf::from(self.database_path),
            production,
            log_level: self.log_level,
            admin_password_hash: self.admin_password_hash,
            session: SessionConfig {
                secret: self.session_secret,
                ttl_seconds: ttl_hours * 3600,
                cookie_name: SESSION_COOKIE_NAME.to_string(),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_seconds: u64,
    pub cookie_name: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub bind: SocketAddr,
    pub database_path: PathBuf,
    pub production: bool,
    pub log_level: String,
    pub admin_password_hash: String,
    pub session: SessionConfig,
}

#[cfg(test)]
impl ValidatedConfig {
    pub fn new_for_tests(secret: &str, admin_password_hash: &str) -> Self {
        Self {
            bind: "127.0.0.1:0".parse().expect("test bind address"),
            database_path: PathBuf::from(":memory:"),
            production: false,
            log_level: "info".to_string(),
            admin_password_hash: admin_password_hash.to_string(),
            session: SessionConfig {
                secret: secret.to_string(),
                ttl_seconds: DEFAULT_SESSION_TTL_HOURS * 3600,
                cookie_name: SESSION_COOKIE_NAME.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            session_secret: "secret".to_string(),
            admin_password_hash: "$argon2id$test".to_string(),
            session_ttl_hours: String::new(),
            production: "false".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = base_config().validate().expect("valid config");
        assert_eq!(config.session.ttl_seconds, 8 * 3600);
        assert_eq!(config.session.cookie_name, SESSION_COOKIE_NAME);
        assert!(!config.production);
    }

    #[test]
    fn validate_rejects_missing_secret() {
        let mut config = base_config();
        config.session_secret = "  ".to_string();
        let err = config.validate().expect_err("missing secret");
        assert!(err.to_string().contains("SESSION_SECRET"));
    }

    #[test]
    fn validate_rejects_missing_password_hash() {
        let mut config = base_config();
        config.admin_password_hash = String::new();
        let err = config.validate().expect_err("missing hash");
        assert!(err.to_string().contains("ADMIN_PASSWORD_HASH"));
    }

    #[test]
    fn validate_rejects_bad_bind_and_ttl() {
        let mut config = base_config();
        config.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.session_ttl_hours = "0".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_parses_production_flag() {
        let mut config = base_config();
        config.production = "TRUE".to_string();
        assert!(config.validate().expect("valid").production);
    }
}
