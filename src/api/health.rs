// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Integrations;
use crate::state::AppState;

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy`
    pub status: String,
    pub service: String,
}

/// Readiness response with the configuration status of each integration.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall status ("ok" or "degraded").
    pub status: String,
    pub integrations: Integrations,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}

/// Health check endpoint handler.
///
/// Returns 200 whenever the process is serving requests. This is the
/// endpoint probed by the container `HEALTHCHECK`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.app_name.clone(),
    })
}

/// Liveness probe handler. Same contract as [`health`].
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn liveness(state: State<AppState>) -> Json<HealthResponse> {
    health(state).await
}

/// Readiness probe handler.
///
/// Returns 200 only if the database and token verification are configured.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Required configuration is missing", body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let integrations = state.config.integrations();
    let ready = integrations.database && integrations.auth;

    let response = ReadyResponse {
        status: if ready { "ok" } else { "degraded" }.to_string(),
        integrations,
        started_at: state.started_at,
        uptime_seconds: state.uptime_seconds(),
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
