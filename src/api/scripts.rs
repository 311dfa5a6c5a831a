// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::models::ScriptsResponse;

#[utoipa::path(
    get,
    path = "/api/v1/scripts",
    tag = "Scripts",
    responses((status = 200, body = ScriptsResponse))
)]
pub async fn list_scripts() -> Json<ScriptsResponse> {
    Json(ScriptsResponse {
        scripts: Vec::new(),
        message: "Scripts endpoint working".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_list_is_empty() {
        let Json(body) = list_scripts().await;
        assert!(body.scripts.is_empty());
        assert_eq!(body.message, "Scripts endpoint working");
    }
}
