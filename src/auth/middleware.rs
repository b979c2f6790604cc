// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Every request goes through the same steps:
//!
//! 1. Extract the bearer token (`Authorization: Bearer <token>`, falling back
//!    to an `access_token` query argument). Nothing found is
//!    [`AuthError::MalformedRequest`].
//! 2. Verify it. Expiry becomes [`AuthError::TokenExpired`]; any other
//!    failure becomes [`AuthError::TokenInvalid`].
//! 3. On success, insert a [`RequestContext`] into the request extensions and
//!    run the wrapped handler. On failure, hand the error to the configured
//!    [`ErrorResponder`] and never reach the handler.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         auth_service.middleware(),
//!         auth_middleware,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Uri},
    middleware::Next,
    response::Response,
};

use super::claims::RequestContext;
use super::error::AuthError;
use super::verifier::TokenVerifier;
use crate::respond::{ErrorResponder, JsonErrorResponder};

const BEARER_PREFIX: &str = "bearer ";

/// Query argument accepted when no bearer header is present.
pub const ACCESS_TOKEN_ARGUMENT: &str = "access_token";

/// Middleware state: the verifier plus the responder used on rejection.
#[derive(Clone)]
pub struct AuthMiddleware {
    verifier: Arc<TokenVerifier>,
    responder: Arc<dyn ErrorResponder>,
}

impl AuthMiddleware {
    /// Middleware rejecting with the default JSON error envelope.
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self {
            verifier,
            responder: Arc::new(JsonErrorResponder),
        }
    }

    /// Swap the responder used for rejected requests.
    pub fn with_responder(mut self, responder: impl ErrorResponder + 'static) -> Self {
        self.responder = Arc::new(responder);
        self
    }

    /// Run extraction and verification for one request.
    pub fn authenticate(&self, headers: &HeaderMap, uri: &Uri) -> Result<RequestContext, AuthError> {
        let token = extract_bearer_token(headers, uri).ok_or(AuthError::MalformedRequest)?;
        let claims = self.verifier.verify(&token)?;
        Ok(RequestContext::from(claims))
    }

    pub fn reject(&self, error: AuthError) -> Response {
        self.responder.respond(error)
    }
}

/// Authentication middleware function.
pub async fn auth_middleware(
    State(auth): State<AuthMiddleware>,
    mut request: Request,
    next: Next,
) -> Response {
    match auth.authenticate(request.headers(), request.uri()) {
        Ok(ctx) => {
            tracing::debug!(subject = %ctx.subject, role = %ctx.role, "Authenticated request");
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => auth.reject(e),
    }
}

/// Pull a bearer token from the request, OAuth2 style.
///
/// The `Authorization` header wins; the scheme is matched case-insensitively.
/// If the header is absent or not a bearer credential, the `access_token`
/// query argument is tried.
pub fn extract_bearer_token(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    bearer_from_header(headers).or_else(|| bearer_from_query(uri))
}

fn bearer_from_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let scheme = value.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }

    let token = value[BEARER_PREFIX.len()..].trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn bearer_from_query(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ACCESS_TOKEN_ARGUMENT)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}
