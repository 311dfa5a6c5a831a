// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription roles carried in access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles.
///
/// - `Admin` - Staff account
/// - `Pro` - Paid plan subscriber
/// - `User` - Free plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Pro,
    Admin,
}

impl Role {
    /// Parse role from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "user" | "free" => Some(Role::User),
            "pro" => Some(Role::Pro),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Pro => write!(f, "pro"),
            Role::Admin => write!(f, "admin"),
        }
    }
}
