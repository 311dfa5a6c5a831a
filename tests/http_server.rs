// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end checks against a server bound to an ephemeral port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use jsonwebtoken::{encode, EncodingKey, Header};
use script_strategist_server::{
    auth::TokenClaims,
    config::{AppConfig, JWT_SECRET_KEY_ENV},
    probe::{self, ProbeError},
    server,
    state::AppState,
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

const SECRET: &str = "integration-secret";

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    async fn start(config: AppConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::run(listener, AppState::new(config), async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not shut down")
            .unwrap()
            .unwrap();
    }
}

fn config_with_secret() -> AppConfig {
    let vars: HashMap<&str, &str> = [(JWT_SECRET_KEY_ENV, SECRET)].into_iter().collect();
    AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

fn token(sub: &str) -> String {
    let claims = TokenClaims {
        sub: sub.to_string(),
        exp: chrono::Utc::now().timestamp() + 600,
        iat: None,
        email: None,
        role: Some("pro".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn health_probe_succeeds_against_running_server() {
    let server = TestServer::start(AppConfig::default()).await;

    let status = probe::check(&server.url("/health"), Duration::from_secs(5))
        .await
        .unwrap();
    assert!(status.is_success());

    server.stop().await;
}

#[tokio::test]
async fn health_url_from_config_reaches_the_server() {
    let server = TestServer::start(AppConfig::default()).await;
    let config = AppConfig {
        host: server.addr.ip(),
        port: server.addr.port(),
        ..AppConfig::default()
    };

    let url = probe::health_url(&config);
    assert!(probe::check(&url, Duration::from_secs(5)).await.is_ok());

    server.stop().await;
}

#[tokio::test]
async fn health_probe_fails_on_error_status() {
    let server = TestServer::start(AppConfig::default()).await;

    let result = probe::check(&server.url("/health/ready"), Duration::from_secs(5)).await;
    assert!(matches!(result, Err(ProbeError::Status(status)) if status.as_u16() == 503));

    server.stop().await;
}

#[tokio::test]
async fn health_probe_fails_when_nothing_listens() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = probe::check(&format!("http://{addr}/health"), Duration::from_secs(2)).await;
    assert!(matches!(result, Err(ProbeError::Request(_))));
}

#[tokio::test]
async fn auth_test_echoes_verified_user() {
    let server = TestServer::start(config_with_secret()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/v1/auth/test"))
        .bearer_auth(token("user_7"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["user"]["user_id"], "user_7");
    assert_eq!(body["user"]["role"], "pro");

    let response = client
        .post(server.url("/api/v1/auth/test"))
        .bearer_auth("forged.token.value")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    server.stop().await;
}

#[tokio::test]
async fn placeholder_routes_respond() {
    let server = TestServer::start(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let root: serde_json::Value = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root["status"], "running");
    assert_eq!(root["version"], env!("CARGO_PKG_VERSION"));

    let scripts: serde_json::Value = client
        .get(server.url("/api/v1/scripts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(scripts["scripts"], serde_json::json!([]));

    server.stop().await;
}
