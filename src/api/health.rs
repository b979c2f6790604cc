// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Liveness response with key availability.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Whether tokens can be issued
    pub signing: bool,
    /// Whether tokens can be verified
    pub verification: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let keys = state.auth.keys();
    Json(HealthResponse {
        status: "ok".to_string(),
        signing: keys.has_signing_key(),
        verification: keys.has_verification_key(),
    })
}
