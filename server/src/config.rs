//! Server configuration loaded from the environment.
//!
//! | Variable               | Default     |
//! |------------------------|-------------|
//! | `TODO_HOST`            | `127.0.0.1` |
//! | `PORT`                 | `3000`      |
//! | `TODO_STATIC_DIR`      | unset       |
//! | `TODO_CORS_PERMISSIVE` | `false`     |
//!
//! A `.env` file in the working directory is loaded first if present.

use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for non-API paths (the browser page). Disabled when `None`.
    pub static_dir: Option<PathBuf>,
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                message: format!("{raw:?} is not a valid port ({e})"),
            })?,
            None => defaults.port,
        };

        let cors_permissive = match get("TODO_CORS_PERMISSIVE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "TODO_CORS_PERMISSIVE",
                message: format!("{raw:?} is not a boolean"),
            })?,
            None => defaults.cors_permissive,
        };

        Ok(Self {
            host: get("TODO_HOST").unwrap_or(defaults.host),
            port,
            static_dir: get("TODO_STATIC_DIR").map(PathBuf::from),
            cors_permissive,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
