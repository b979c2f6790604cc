// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance.
//!
//! All three token kinds go through [`TokenIssuer::issue`], which assembles
//! the shared claims and signs them with RS256. The kind decides the `typ`
//! claim, the lifetime, and whether a user profile is embedded.

use std::sync::Arc;

use jsonwebtoken::{encode, Algorithm, Header};

use super::claims::{Claims, TokenType, UserProfile};
use super::keys::KeyMaterial;
use crate::config::AuthSettings;

/// Source of the current time, in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a given unix timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("no signing key loaded")]
    MissingSigningKey,

    #[error("failed to sign token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// What to issue. Only identity tokens carry a user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identity(UserProfile),
    Refresh,
    Access,
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Identity(_) => TokenType::Identity,
            TokenKind::Refresh => TokenType::Refresh,
            TokenKind::Access => TokenType::Access,
        }
    }
}

/// A freshly signed token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Builds and signs tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<KeyMaterial>,
    issuer: String,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(keys: Arc<KeyMaterial>, settings: &AuthSettings) -> Self {
        Self {
            keys,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for `iat`/`exp`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Identity token (30 days) embedding the given user profile.
    pub fn issue_identity_token(
        &self,
        subject: &str,
        role: &str,
        user: UserProfile,
    ) -> Result<String, SigningError> {
        self.issue(TokenKind::Identity(user), subject, role)
            .map(|issued| issued.token)
    }

    /// Refresh token (30 days).
    pub fn issue_refresh_token(&self, subject: &str, role: &str) -> Result<String, SigningError> {
        self.issue(TokenKind::Refresh, subject, role)
            .map(|issued| issued.token)
    }

    /// Access token (1 hour). Also returns the lifetime in seconds so
    /// callers can set matching expiry hints.
    pub fn issue_access_token(
        &self,
        subject: &str,
        role: &str,
    ) -> Result<(String, u64), SigningError> {
        self.issue(TokenKind::Access, subject, role)
            .map(|issued| (issued.token, issued.expires_in))
    }

    /// Sign a token of the given kind.
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &str,
        role: &str,
    ) -> Result<IssuedToken, SigningError> {
        let key = self
            .keys
            .signing_key()
            .ok_or(SigningError::MissingSigningKey)?;

        let claims = self.build_claims(kind, subject, role);
        let expires_in = (claims.exp - claims.iat) as u64;
        let token = encode(&Header::new(Algorithm::RS256), &claims, key)?;

        tracing::debug!(
            subject = %claims.sub,
            typ = %claims.typ,
            expires_in,
            "Issued token"
        );

        Ok(IssuedToken { token, expires_in })
    }

    fn build_claims(&self, kind: TokenKind, subject: &str, role: &str) -> Claims {
        let typ = kind.token_type();
        let iat = self.clock.now();
        let exp = iat + typ.lifetime().as_secs() as i64;
        let user = match kind {
            TokenKind::Identity(profile) => Some(profile),
            TokenKind::Refresh | TokenKind::Access => None,
        };

        Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat,
            exp,
            role: role.to_string(),
            typ,
            user,
        }
    }
}
