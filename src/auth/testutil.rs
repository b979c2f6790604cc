// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for auth tests: a fixed RSA key pair and helpers to build
//! services around it.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use super::{AuthService, Claims, KeyMaterial};
use crate::config::AuthSettings;

pub const TEST_PRIVATE_KEY: &str = include_str!("testdata/private.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("testdata/public.pem");

/// Public key from an unrelated key pair.
pub const OTHER_PUBLIC_KEY: &str = include_str!("testdata/other_public.pem");

pub fn test_settings() -> AuthSettings {
    AuthSettings::new("test-issuer", "test-audience")
}

pub fn test_keys() -> Arc<KeyMaterial> {
    Arc::new(
        KeyMaterial::from_pem(
            Some(TEST_PRIVATE_KEY.as_bytes()),
            Some(TEST_PUBLIC_KEY.as_bytes()),
        )
        .expect("test keys must parse"),
    )
}

pub fn test_service() -> AuthService {
    AuthService::new(test_keys(), &test_settings())
}

/// Current unix time in seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Flip one byte of the decoded signature segment and re-encode the token.
pub fn tamper_signature(token: &str) -> String {
    let (signed, signature) = token.rsplit_once('.').expect("token has three segments");
    let mut bytes = URL_SAFE_NO_PAD.decode(signature).expect("signature is base64url");
    bytes[0] ^= 0x01;
    format!("{signed}.{}", URL_SAFE_NO_PAD.encode(bytes))
}

/// Sign arbitrary claims with the test private key, bypassing the issuer.
pub fn sign_claims(claims: &Claims) -> String {
    let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY.as_bytes()).expect("test key must parse");
    encode(&Header::new(Algorithm::RS256), claims, &key).expect("claims must encode")
}
