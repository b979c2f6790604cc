// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! RS256 bearer tokens for the Relational API.
//!
//! ## Token Kinds
//!
//! | Kind | `typ` | Lifetime | Embedded profile |
//! |------|-------|----------|------------------|
//! | Identity | `id_token` | 30 days | yes |
//! | Refresh | `refresh` | 30 days | no |
//! | Access | `bearer` | 1 hour | no |
//!
//! ## Auth Flow
//!
//! 1. At startup, [`KeyMaterial`] loads the PEM key pair once.
//! 2. A login handler calls [`TokenIssuer`] to mint tokens.
//! 3. Clients send `Authorization: Bearer <token>`.
//! 4. [`auth_middleware`] verifies the token and attaches a
//!    [`RequestContext`] (`sub` and `role`) to the request, or rejects it
//!    with 401 through the configured [`ErrorResponder`](crate::respond::ErrorResponder).
//!
//! ## Security
//!
//! - Only RS256 is accepted at verification
//! - `iss` and `aud` are written at issuance but not checked at verification
//! - No clock skew tolerance by default (`AUTH_LEEWAY_SECS`)
//! - Token strings are never logged

pub mod claims;
pub mod error;
pub mod extractor;
pub mod issuer;
pub mod keys;
pub mod middleware;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testutil;

use std::sync::Arc;

pub use claims::{Claims, RequestContext, TokenType, UserProfile};
pub use error::AuthError;
pub use extractor::Auth;
pub use issuer::{Clock, FixedClock, IssuedToken, SigningError, SystemClock, TokenIssuer, TokenKind};
pub use keys::{KeyLoadError, KeyMaterial, KeyRole};
pub use middleware::{auth_middleware, AuthMiddleware};
pub use verifier::TokenVerifier;

use crate::config::AuthSettings;

/// Issuer and verifier sharing one immutable set of keys and settings.
#[derive(Clone)]
pub struct AuthService {
    keys: Arc<KeyMaterial>,
    issuer: TokenIssuer,
    verifier: Arc<TokenVerifier>,
}

impl AuthService {
    /// Load the key files named in `settings` and build the service.
    ///
    /// Fails only when the verification key cannot be loaded.
    pub fn initialize(settings: &AuthSettings) -> Result<Self, KeyLoadError> {
        let keys = KeyMaterial::initialize(
            settings.private_key_path.as_deref(),
            settings.public_key_path.as_deref(),
        )?;
        Ok(Self::new(Arc::new(keys), settings))
    }

    pub fn new(keys: Arc<KeyMaterial>, settings: &AuthSettings) -> Self {
        Self {
            issuer: TokenIssuer::new(keys.clone(), settings),
            verifier: Arc::new(TokenVerifier::new(keys.clone(), settings)),
            keys,
        }
    }

    /// Replace the clock used when issuing tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.issuer = self.issuer.with_clock(clock);
        self
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Middleware state using the default JSON error responder.
    pub fn middleware(&self) -> AuthMiddleware {
        AuthMiddleware::new(self.verifier.clone())
    }

    pub fn issue_identity_token(
        &self,
        subject: &str,
        role: &str,
        profile: UserProfile,
    ) -> Result<String, SigningError> {
        self.issuer.issue_identity_token(subject, role, profile)
    }

    pub fn issue_refresh_token(&self, subject: &str, role: &str) -> Result<String, SigningError> {
        self.issuer.issue_refresh_token(subject, role)
    }

    /// Access token plus its lifetime in seconds.
    pub fn issue_access_token(
        &self,
        subject: &str,
        role: &str,
    ) -> Result<(String, u64), SigningError> {
        self.issuer.issue_access_token(subject, role)
    }

    pub fn is_token_valid(&self, token: &str) -> bool {
        self.verifier.is_token_valid(token)
    }

    pub fn decode_if_valid(&self, token: &str) -> Option<Claims> {
        self.verifier.decode_if_valid(token)
    }
}
