// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification.
//!
//! Verification is a pure function of the token string and the verification
//! key: signature (RS256 only), a required `exp`, and `exp > iat`. The `iss`
//! and `aud` claims are written at issuance but not checked here.

use std::sync::Arc;

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, Validation};

use super::claims::Claims;
use super::error::AuthError;
use super::keys::KeyMaterial;
use crate::config::AuthSettings;

/// Verifies bearer tokens against the loaded public key.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<KeyMaterial>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeyMaterial>, settings: &AuthSettings) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = settings.leeway_secs;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self { keys, validation }
    }

    /// Verify a token, reporting why it was rejected.
    ///
    /// Only expiry is reported separately; every other failure is
    /// [`AuthError::TokenInvalid`].
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let Some(key) = self.keys.verification_key() else {
            tracing::warn!("Token verification attempted without a verification key");
            return Err(AuthError::TokenInvalid);
        };

        let token_data =
            decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        let claims = token_data.claims;
        if claims.exp <= claims.iat {
            return Err(AuthError::TokenInvalid);
        }

        Ok(claims)
    }

    /// Decoded claims if the token is valid, `None` otherwise.
    pub fn decode_if_valid(&self, token: &str) -> Option<Claims> {
        self.verify(token).ok()
    }

    pub fn is_token_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}
