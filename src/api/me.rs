// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::auth::{Auth, RequestContext};
use crate::respond::DataResponse;

/// Identity of the caller, as verified by the auth middleware.
#[utoipa::path(
    get,
    path = "/v1/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Verified identity", body = RequestContext),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn current_user(Auth(ctx): Auth) -> DataResponse<RequestContext> {
    DataResponse::ok(ctx).with_message("authenticated")
}
