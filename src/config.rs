// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup and passed down explicitly.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `DATA_DIR` | Root directory for JSON documents | `./data` |
//! | `JWT_SECRET` | HS256 signing secret | Required |
//! | `TOKEN_TTL_SECS` | Token lifetime in seconds | `3600` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::auth::token::DEFAULT_TOKEN_TTL_SECS;
use crate::logging::LogFormat;
use crate::storage::paths::DATA_ROOT;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the document store root.
///
/// # Default
/// `./data`
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
///
/// There is no default: startup fails without it.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Settings read from the environment.
#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = match get(HOST_ENV) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: HOST_ENV,
                value,
            })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::Invalid {
                name: HOST_ENV,
                value: DEFAULT_HOST.to_string(),
            })?,
        };

        let port = match get(PORT_ENV) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let token_ttl_secs = match get(TOKEN_TTL_ENV) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ttl) if ttl > 0 => ttl,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: TOKEN_TTL_ENV,
                        value,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                value,
            })?,
            None => LogFormat::default(),
        };

        let jwt_secret = get(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        Ok(Self {
            host,
            port,
            data_dir: get(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DATA_ROOT)),
            jwt_secret,
            token_ttl_secs,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
