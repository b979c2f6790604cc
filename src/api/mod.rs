// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::health::HealthResponse,
    auth::{auth_middleware, RequestContext},
    respond::AccessTokenResponse,
    state::AppState,
};

pub mod health;
pub mod me;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/me", get(me::current_user))
        .route_layer(from_fn_with_state(
            state.auth.middleware(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(health::health, me::current_user),
    components(schemas(HealthResponse, RequestContext, AccessTokenResponse)),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Auth", description = "Bearer token authentication")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testutil::test_service;
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_key_availability() {
        let app = router(AppState::new(test_service()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["signing"], true);
        assert_eq!(body["verification"], true);
    }

    #[tokio::test]
    async fn me_returns_verified_identity() {
        let service = test_service();
        let (token, _) = service.issue_access_token("u1", "admin").unwrap();
        let app = router(AppState::new(service));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/me")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "authenticated");
        assert_eq!(body["data"]["subject"], "u1");
        assert_eq!(body["data"]["role"], "admin");
    }

    #[tokio::test]
    async fn me_requires_token() {
        let app = router(AppState::new(test_service()));
        let response = app
            .oneshot(Request::builder().uri("/v1/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["error"], "malformed_request");
    }
}
