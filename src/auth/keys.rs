// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RSA key material for signing and verifying tokens.
//!
//! Keys are loaded once at startup and are read-only afterwards; the
//! [`KeyMaterial`] is shared behind an `Arc` by the issuer and verifier.
//!
//! ## Failure policy
//!
//! - A signing key that cannot be read or parsed is logged and left absent.
//!   Issuance then fails with `SigningError::MissingSigningKey`.
//! - A verification key that cannot be read or parsed is a hard error. A
//!   service that cannot verify tokens must not serve protected routes.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey};

/// Which half of the key pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Signing,
    Verification,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Signing => write!(f, "signing"),
            KeyRole::Verification => write!(f, "verification"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyLoadError {
    #[error("failed to read {role} key from {}: {source}", .path.display())]
    Read {
        role: KeyRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {role} key as PEM RSA: {source}")]
    Parse {
        role: KeyRole,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
}

/// Signing and verification keys.
///
/// Either half may be absent: an issuing-only or verifying-only service only
/// needs one of them.
#[derive(Default)]
pub struct KeyMaterial {
    signing: Option<EncodingKey>,
    verification: Option<DecodingKey>,
}

impl KeyMaterial {
    /// Load keys from PEM files.
    ///
    /// Each path is optional. Signing key failures are logged and deferred;
    /// verification key failures are returned.
    pub fn initialize(
        private_key_path: Option<&Path>,
        public_key_path: Option<&Path>,
    ) -> Result<Self, KeyLoadError> {
        let signing = private_key_path.and_then(|path| {
            let loaded = read_pem(KeyRole::Signing, path).and_then(|pem| parse_signing_key(&pem));
            match loaded {
                Ok(key) => {
                    tracing::info!(path = %path.display(), "Loaded token signing key");
                    Some(key)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Signing key unavailable, token issuance will fail");
                    None
                }
            }
        });

        let verification = public_key_path
            .map(|path| {
                let key = read_pem(KeyRole::Verification, path)
                    .and_then(|pem| parse_verification_key(&pem))?;
                tracing::info!(path = %path.display(), "Loaded token verification key");
                Ok(key)
            })
            .transpose()?;

        Ok(Self {
            signing,
            verification,
        })
    }

    /// Build key material from in-memory PEM blobs, with the same failure
    /// policy as [`KeyMaterial::initialize`].
    pub fn from_pem(
        private_key_pem: Option<&[u8]>,
        public_key_pem: Option<&[u8]>,
    ) -> Result<Self, KeyLoadError> {
        let signing = private_key_pem.and_then(|pem| match parse_signing_key(pem) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::error!(error = %e, "Signing key unavailable, token issuance will fail");
                None
            }
        });

        let verification = public_key_pem.map(parse_verification_key).transpose()?;

        Ok(Self {
            signing,
            verification,
        })
    }

    pub fn has_signing_key(&self) -> bool {
        self.signing.is_some()
    }

    pub fn has_verification_key(&self) -> bool {
        self.verification.is_some()
    }

    pub(crate) fn signing_key(&self) -> Option<&EncodingKey> {
        self.signing.as_ref()
    }

    pub(crate) fn verification_key(&self) -> Option<&DecodingKey> {
        self.verification.as_ref()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("signing", &self.has_signing_key())
            .field("verification", &self.has_verification_key())
            .finish()
    }
}

fn read_pem(role: KeyRole, path: &Path) -> Result<Vec<u8>, KeyLoadError> {
    std::fs::read(path).map_err(|source| KeyLoadError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })
}

fn parse_signing_key(pem: &[u8]) -> Result<EncodingKey, KeyLoadError> {
    EncodingKey::from_rsa_pem(pem).map_err(|source| KeyLoadError::Parse {
        role: KeyRole::Signing,
        source,
    })
}

fn parse_verification_key(pem: &[u8]) -> Result<DecodingKey, KeyLoadError> {
    DecodingKey::from_rsa_pem(pem).map_err(|source| KeyLoadError::Parse {
        role: KeyRole::Verification,
        source,
    })
}
