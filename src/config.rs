// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the immutable [`AuthSettings`]
//! shared by token issuance and verification. Configuration is loaded from
//! the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH_PRIVATE_KEY_PATH` | PEM RSA private key used to sign tokens | unset (no issuance) |
//! | `AUTH_PUBLIC_KEY_PATH` | PEM RSA public key used to verify tokens | unset |
//! | `AUTH_TOKEN_ISSUER` | `iss` claim written at issuance | `relational-auth` |
//! | `AUTH_TOKEN_AUDIENCE` | `aud` claim written at issuance | `relational-api` |
//! | `AUTH_LEEWAY_SECS` | Clock skew tolerance at verification | `0` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

pub const PRIVATE_KEY_PATH_ENV: &str = "AUTH_PRIVATE_KEY_PATH";
pub const PUBLIC_KEY_PATH_ENV: &str = "AUTH_PUBLIC_KEY_PATH";
pub const TOKEN_ISSUER_ENV: &str = "AUTH_TOKEN_ISSUER";
pub const TOKEN_AUDIENCE_ENV: &str = "AUTH_TOKEN_AUDIENCE";
pub const LEEWAY_SECS_ENV: &str = "AUTH_LEEWAY_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_TOKEN_ISSUER: &str = "relational-auth";
pub const DEFAULT_TOKEN_AUDIENCE: &str = "relational-api";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// No clock skew tolerance: a token is expired as soon as `exp` has passed.
pub const DEFAULT_LEEWAY_SECS: u64 = 0;

/// Token settings, fixed once the service is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// Value written to the `iss` claim
    pub issuer: String,
    /// Value written to the `aud` claim
    pub audience: String,
    /// Signing key location (optional; issuance fails without it)
    pub private_key_path: Option<PathBuf>,
    /// Verification key location
    pub public_key_path: Option<PathBuf>,
    /// Clock skew tolerance applied to `exp`
    pub leeway_secs: u64,
}

impl AuthSettings {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            private_key_path: None,
            public_key_path: None,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }

    pub fn with_private_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.private_key_path = Some(path.into());
        self
    }

    pub fn with_public_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.public_key_path = Some(path.into());
        self
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Build settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let issuer = lookup(TOKEN_ISSUER_ENV).unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string());
        let audience =
            lookup(TOKEN_AUDIENCE_ENV).unwrap_or_else(|| DEFAULT_TOKEN_AUDIENCE.to_string());

        let leeway_secs = match lookup(LEEWAY_SECS_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid {LEEWAY_SECS_ENV}, using default");
                DEFAULT_LEEWAY_SECS
            }),
            None => DEFAULT_LEEWAY_SECS,
        };

        Self {
            issuer,
            audience,
            private_key_path: lookup(PRIVATE_KEY_PATH_ENV)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            public_key_path: lookup(PUBLIC_KEY_PATH_ENV)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            leeway_secs,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ISSUER, DEFAULT_TOKEN_AUDIENCE)
    }
}

/// Server bind address from `HOST` and `PORT`.
pub fn bind_address() -> String {
    let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    format!("{host}:{port}")
}
