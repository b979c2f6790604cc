// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Response helpers.
//!
//! - [`ErrorResponder`] turns an authentication failure into a response. The
//!   middleware depends only on this trait, so the response format can change
//!   without touching verification.
//! - [`DataResponse`] wraps successful payloads as `{"message", "data"}` with
//!   an optional `Cache-Control: max-age` hint.

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{AuthError, IssuedToken};
use crate::error::ApiError;

/// Renders authentication failures.
pub trait ErrorResponder: Send + Sync {
    fn respond(&self, error: AuthError) -> Response;
}

impl<F> ErrorResponder for F
where
    F: Fn(AuthError) -> Response + Send + Sync,
{
    fn respond(&self, error: AuthError) -> Response {
        self(error)
    }
}

/// Default responder: logs the rejection and renders the JSON error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorResponder;

impl ErrorResponder for JsonErrorResponder {
    fn respond(&self, error: AuthError) -> Response {
        tracing::warn!(
            error_code = error.error_code(),
            message = error.message(),
            "Rejected request"
        );
        ApiError::from(error).into_response()
    }
}

#[derive(Serialize)]
struct DataBody<'a, T> {
    message: &'a str,
    data: &'a T,
}

/// Successful JSON payload with an optional cache lifetime.
#[derive(Debug, Clone)]
pub struct DataResponse<T> {
    pub status: StatusCode,
    pub message: String,
    pub data: T,
    pub max_age: Option<u64>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: String::new(),
            data,
            max_age: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Mark the response cacheable for `seconds`.
    pub fn with_max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_value(DataBody {
            message: &self.message,
            data: &self.data,
        }) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Could not serialize response body");
                return ApiError::internal("Error marshalling json").into_response();
            }
        };

        let mut response = (self.status, Json(body)).into_response();
        if let Some(seconds) = self.max_age {
            if let Ok(value) = HeaderValue::from_str(&format!("max-age={seconds}")) {
                response.headers_mut().insert(CACHE_CONTROL, value);
            }
        }
        response
    }
}

/// Body returned to callers that were just issued an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

impl From<IssuedToken> for AccessTokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.token,
            token_type: "bearer".to_string(),
            expires_in: issued.expires_in,
        }
    }
}
