// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::{
    auth::{error::AuthErrorBody, OptionalAuth},
    models::AuthTestResponse,
};

/// Authentication smoke test.
///
/// Works without credentials. When a bearer token is sent it must be valid,
/// and the verified user is echoed back.
#[utoipa::path(
    post,
    path = "/api/v1/auth/test",
    tag = "Auth",
    security((), ("bearer" = [])),
    responses(
        (status = 200, description = "Auth endpoint is reachable", body = AuthTestResponse),
        (status = 401, description = "Bearer token rejected", body = AuthErrorBody)
    )
)]
pub async fn test_auth(OptionalAuth(user): OptionalAuth) -> Json<AuthTestResponse> {
    if let Some(ref user) = user {
        tracing::debug!(
            user_id = %user.user_id,
            role = %user.role,
            "Auth test with verified token"
        );
    }

    Json(AuthTestResponse {
        message: "Auth endpoint working".to_string(),
        status: "success".to_string(),
        user,
    })
}
