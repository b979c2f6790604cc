// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Token Auth - RS256 bearer tokens for Axum services
//!
//! Issues signed identity, refresh and access tokens and guards protected
//! routes with a bearer-token middleware.
//!
//! ## Modules
//!
//! - `auth` - Key material, claims, issuance, verification, middleware
//! - `api` - Demo HTTP routes (Axum)
//! - `config` - Environment-driven settings
//! - `respond` - Pluggable error responder and data responses

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod respond;
pub mod state;
