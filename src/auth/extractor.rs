// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated request context.
//!
//! Use the `Auth` extractor in handlers behind [`auth_middleware`]:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(ctx): Auth) -> impl IntoResponse {
//!     // ctx.subject, ctx.role
//! }
//! ```
//!
//! [`auth_middleware`]: super::middleware::auth_middleware

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, RequestContext};

/// Extractor for the [`RequestContext`] set by the middleware.
///
/// Rejects with [`AuthError::MalformedRequest`] when the route is not behind
/// the middleware, so an unprotected mount fails closed.
pub struct Auth(pub RequestContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MalformedRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn reads_context_from_extensions() {
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        parts.extensions.insert(RequestContext {
            subject: "user_from_middleware".to_string(),
            role: "admin".to_string(),
        });

        let Auth(ctx) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.subject, "user_from_middleware");
        assert_eq!(ctx.role, "admin");
    }

    #[tokio::test]
    async fn rejects_without_middleware() {
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer abc")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::MalformedRequest)));
    }
}
