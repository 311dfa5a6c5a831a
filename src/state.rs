// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::TokenVerifier;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Present only when `JWT_SECRET_KEY` is configured.
    pub auth: Option<Arc<TokenVerifier>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let auth = config
            .jwt
            .secret
            .as_ref()
            .map(|secret| Arc::new(TokenVerifier::new(secret, config.jwt.algorithm)));

        Self {
            config: Arc::new(config),
            auth,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
