// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. All types derive
//! `Serialize` and `ToSchema` for JSON handling and OpenAPI documentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;

/// Service banner served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    /// Always `running`
    pub status: String,
}

/// Result of the authentication smoke test.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTestResponse {
    pub message: String,
    pub status: String,
    /// The verified caller, when a bearer token was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthenticatedUser>,
}

/// A saved script.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Script {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScriptsResponse {
    pub scripts: Vec<Script>,
    pub message: String,
}
