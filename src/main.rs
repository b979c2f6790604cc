// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use relational_token_auth::{
    api::router,
    auth::AuthService,
    config::{bind_address, AuthSettings},
    logging,
    state::AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let settings = AuthSettings::from_env();

    // A service that cannot verify tokens must not start.
    let auth = match AuthService::initialize(&settings) {
        Ok(auth) => auth,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load token keys");
            return ExitCode::FAILURE;
        }
    };

    if !auth.keys().has_verification_key() {
        tracing::warn!("No verification key configured, every protected request will be rejected");
    }

    let app = router(AppState::new(auth));

    let addr = bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        %addr,
        issuer = %settings.issuer,
        audience = %settings.audience,
        "Relational token auth listening (docs at /docs)"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
