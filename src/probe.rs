// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Container health probe client.
//!
//! The image ships no curl; its `HEALTHCHECK` runs `script-strategist
//! healthcheck`, which calls [`check`] against the local server.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::AppConfig;

/// Per-attempt timeout, matching the `HEALTHCHECK --timeout`.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("health request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("health endpoint returned {0}")]
    Status(StatusCode),
}

/// Health endpoint of the server `config` describes. A wildcard bind
/// address is probed through loopback of the same family.
pub fn health_url(config: &AppConfig) -> String {
    let host = match config.host {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}/health", SocketAddr::new(host, config.port))
}

/// Succeeds iff `url` answers with a 2xx status within `timeout`.
pub async fn check(url: &str, timeout: Duration) -> Result<StatusCode, ProbeError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let status = client.get(url).send().await?.status();

    if status.is_success() {
        Ok(status)
    } else {
        Err(ProbeError::Status(status))
    }
}
