// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Message returned when a token has expired.
pub const EXPIRED_TOKEN_MESSAGE: &str = "Access Token is expired, get a new Token";

/// Message returned for every other authentication failure.
pub const INVALID_TOKEN_MESSAGE: &str = "Error while parsing the Access Token!";

/// Outcome of a rejected authentication attempt.
///
/// Verification never distinguishes more than these three cases. Bad
/// signatures, wrong algorithms, wrong issuer or audience and malformed
/// claims all collapse into `TokenInvalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token could be extracted from the request
    MalformedRequest,
    /// Token signature checked out but `exp` has passed
    TokenExpired,
    /// Any other parse, signature or claim failure
    TokenInvalid,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MalformedRequest => "malformed_request",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalid => "token_invalid",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => EXPIRED_TOKEN_MESSAGE,
            AuthError::MalformedRequest | AuthError::TokenInvalid => INVALID_TOKEN_MESSAGE,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MalformedRequest => write!(f, "No bearer token found in request"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenInvalid => write!(f, "Token is invalid"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::new(error.status_code(), error.error_code(), error.message())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn expired_returns_401_with_expiry_message() {
        let response = AuthError::TokenExpired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["data"]["error"], "token_expired");
        assert_eq!(body["data"]["message"], EXPIRED_TOKEN_MESSAGE);
        assert_eq!(body["data"]["status"], 401);
    }

    #[test]
    fn malformed_and_invalid_share_generic_message() {
        assert_eq!(AuthError::MalformedRequest.message(), INVALID_TOKEN_MESSAGE);
        assert_eq!(AuthError::TokenInvalid.message(), INVALID_TOKEN_MESSAGE);
        assert_ne!(AuthError::TokenExpired.message(), INVALID_TOKEN_MESSAGE);
    }

    #[test]
    fn every_variant_is_unauthorized() {
        for error in [
            AuthError::MalformedRequest,
            AuthError::TokenExpired,
            AuthError::TokenInvalid,
        ] {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
