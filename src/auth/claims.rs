// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the authenticated request context.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifetime of identity tokens (30 days).
pub const IDENTITY_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Lifetime of refresh tokens (30 days).
pub const REFRESH_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Lifetime of access tokens (1 hour).
pub const ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// Kind of token, carried in the `typ` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TokenType {
    /// Login-session token embedding the user profile
    #[serde(rename = "id_token")]
    Identity,
    /// Long-lived renewal token
    #[serde(rename = "refresh")]
    Refresh,
    /// Short-lived request authorization token
    #[serde(rename = "bearer")]
    Access,
}

impl TokenType {
    /// How long a token of this kind stays valid after issuance.
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenType::Identity => IDENTITY_TOKEN_LIFETIME,
            TokenType::Refresh => REFRESH_TOKEN_LIFETIME,
            TokenType::Access => ACCESS_TOKEN_LIFETIME,
        }
    }

    /// Wire value of the `typ` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Identity => "id_token",
            TokenType::Refresh => "refresh",
            TokenType::Access => "bearer",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the user embedded in identity tokens.
///
/// This is a copy taken at issuance time, not a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub profile_picture_path: String,
    /// Unix timestamp
    pub created_at: i64,
    /// Unix timestamp
    pub modified_at: i64,
}

/// Claims signed into every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (opaque user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// User's role
    pub role: String,

    /// Token kind
    pub typ: TokenType,

    /// Embedded user profile (identity tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// Identity attached to a request once its bearer token has been verified.
///
/// Lives in the request extensions for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RequestContext {
    /// Verified `sub` claim
    pub subject: String,

    /// Verified `role` claim
    pub role: String,
}

impl RequestContext {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            role: claims.role.clone(),
        }
    }
}

impl From<Claims> for RequestContext {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            sub: "user_123".to_string(),
            iss: "relational-auth".to_string(),
            aud: "relational-api".to_string(),
            iat: 1700000000,
            exp: 1700003600,
            role: "admin".to_string(),
            typ: TokenType::Access,
            user: None,
        }
    }

    #[test]
    fn token_type_uses_wire_names() {
        assert_eq!(serde_json::to_string(&TokenType::Identity).unwrap(), r#""id_token""#);
        assert_eq!(serde_json::to_string(&TokenType::Refresh).unwrap(), r#""refresh""#);
        assert_eq!(serde_json::to_string(&TokenType::Access).unwrap(), r#""bearer""#);

        let parsed: TokenType = serde_json::from_str(r#""bearer""#).unwrap();
        assert_eq!(parsed, TokenType::Access);
    }

    #[test]
    fn lifetimes_match_token_kind() {
        assert_eq!(TokenType::Identity.lifetime().as_secs(), 2_592_000);
        assert_eq!(TokenType::Refresh.lifetime().as_secs(), 2_592_000);
        assert_eq!(TokenType::Access.lifetime().as_secs(), 3600);
    }

    #[test]
    fn user_claim_omitted_when_absent() {
        let value = serde_json::to_value(sample_claims()).unwrap();
        assert!(value.get("user").is_none());
        assert_eq!(value["typ"], "bearer");
        assert_eq!(value["sub"], "user_123");
    }

    #[test]
    fn user_claim_serializes_profile_fields() {
        let mut claims = sample_claims();
        claims.typ = TokenType::Identity;
        claims.user = Some(UserProfile {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            profile_picture_path: "/pictures/alice.png".to_string(),
            created_at: 1600000000,
            modified_at: 1650000000,
        });

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["typ"], "id_token");
        assert_eq!(value["user"]["username"], "alice");
        assert_eq!(value["user"]["profile_picture_path"], "/pictures/alice.png");
        assert_eq!(value["user"]["modified_at"], 1650000000);
    }

    #[test]
    fn request_context_takes_subject_and_role() {
        let claims = sample_claims();
        let ctx = RequestContext::from_claims(&claims);
        assert_eq!(ctx.subject, "user_123");
        assert_eq!(ctx.role, "admin");
        assert_eq!(RequestContext::from(claims), ctx);
    }
}
