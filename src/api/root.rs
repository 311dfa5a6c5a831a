// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{models::RootResponse, state::AppState};

#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses((status = 200, description = "Service banner", body = RootResponse))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: state.config.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_reports_name_and_version() {
        let Json(body) = root(State(AppState::default())).await;
        assert_eq!(body.message, "AI Script Strategist API");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.status, "running");
    }
}
