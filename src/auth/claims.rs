// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims of an access token issued by the account service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role name; unknown or missing roles fall back to [`Role::User`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Authenticated user information extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub role: Role,

    /// Token expiration (Unix timestamp)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        let role = claims
            .role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or_default();

        Self {
            user_id: claims.sub,
            email: claims.email,
            role,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            sub: "user_123".to_string(),
            exp: 1700003600,
            iat: Some(1700000000),
            email: Some("writer@example.com".to_string()),
            role: Some("pro".to_string()),
        }
    }

    #[test]
    fn from_claims_extracts_identity() {
        let user = AuthenticatedUser::from_claims(sample_claims());
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.email.as_deref(), Some("writer@example.com"));
        assert_eq!(user.role, Role::Pro);
        assert_eq!(user.expires_at, 1700003600);
    }

    #[test]
    fn unknown_role_defaults_to_user() {
        let mut claims = sample_claims();
        claims.role = Some("superuser".to_string());
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn optional_claims_may_be_absent() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"sub":"user_9","exp":1700003600}"#).unwrap();
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.email, None);
        assert_eq!(user.role, Role::User);
    }
}
