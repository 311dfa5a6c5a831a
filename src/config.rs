// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from the environment at startup. An optional `.env`
//! file is merged into the process environment first (see `main.rs`);
//! variables that are already set take precedence.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `APP_NAME` | Service name reported by `/` and `/health` | `AI Script Strategist API` |
//! | `DEBUG` | Debug mode flag | `false` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `SUPABASE_URL` | Managed database endpoint | Optional |
//! | `SUPABASE_ANON_KEY` | Public (anon) database key | Optional |
//! | `SUPABASE_SERVICE_ROLE_KEY` | Privileged (service role) database key | Optional |
//! | `JWT_SECRET_KEY` | HMAC secret for bearer token verification | Optional |
//! | `JWT_ALGORITHM` | `HS256`, `HS384` or `HS512` | `HS256` |
//! | `JWT_ACCESS_TOKEN_EXPIRE_MINUTES` | Access token lifetime | `30` |
//! | `STRIPE_SECRET_KEY` | Payment processor secret key | Optional |
//! | `STRIPE_WEBHOOK_SECRET` | Payment webhook signing secret | Optional |
//! | `STRIPE_PRICE_ID_PRO` | Price identifier of the Pro plan | Optional |
//! | `STRIPE_PRICE_ID_ENTERPRISE` | Price identifier of the Enterprise plan | Optional |
//! | `OPENAI_API_KEY` | OpenAI API key | Optional |
//! | `ANTHROPIC_API_KEY` | Anthropic API key | Optional |
//! | `GOOGLE_AI_API_KEY` | Google AI API key | Optional |
//! | `FRONTEND_URL` | Allowed CORS origin | Optional (any origin) |
//! | `REDIS_URL` | Cache service URL | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! Empty values are treated as unset. A value that is set but cannot be
//! parsed is a [`ConfigError`] and the process refuses to start.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::Serialize;
use thiserror::Error;
use url::Url;
use utoipa::ToSchema;

pub const APP_NAME_ENV: &str = "APP_NAME";
pub const DEBUG_ENV: &str = "DEBUG";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const SUPABASE_SERVICE_ROLE_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";

pub const JWT_SECRET_KEY_ENV: &str = "JWT_SECRET_KEY";
pub const JWT_ALGORITHM_ENV: &str = "JWT_ALGORITHM";
pub const JWT_ACCESS_TOKEN_EXPIRE_MINUTES_ENV: &str = "JWT_ACCESS_TOKEN_EXPIRE_MINUTES";

pub const STRIPE_SECRET_KEY_ENV: &str = "STRIPE_SECRET_KEY";
pub const STRIPE_WEBHOOK_SECRET_ENV: &str = "STRIPE_WEBHOOK_SECRET";
pub const STRIPE_PRICE_ID_PRO_ENV: &str = "STRIPE_PRICE_ID_PRO";
pub const STRIPE_PRICE_ID_ENTERPRISE_ENV: &str = "STRIPE_PRICE_ID_ENTERPRISE";

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const GOOGLE_AI_API_KEY_ENV: &str = "GOOGLE_AI_API_KEY";

pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Logging format selector, read by `telemetry::init`.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_APP_NAME: &str = "AI Script Strategist API";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_JWT_EXPIRE_MINUTES: u32 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration loading errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Name of the offending environment variable.
    pub fn variable(&self) -> &'static str {
        match self {
            ConfigError::Invalid { name, .. } => *name,
        }
    }
}

/// A credential that must never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Managed database (Supabase) endpoint and its two key tiers.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<Url>,
    pub anon_key: Option<Secret>,
    pub service_role_key: Option<Secret>,
}

impl DatabaseConfig {
    /// An endpoint plus at least one key.
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && (self.anon_key.is_some() || self.service_role_key.is_some())
    }
}

/// Bearer token signing parameters.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Option<Secret>,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: u32,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: DEFAULT_JWT_EXPIRE_MINUTES,
        }
    }
}

/// Payment processor (Stripe) credentials and plan identifiers.
#[derive(Debug, Clone, Default)]
pub struct PaymentsConfig {
    pub secret_key: Option<Secret>,
    pub webhook_secret: Option<Secret>,
    pub price_id_pro: Option<String>,
    pub price_id_enterprise: Option<String>,
}

impl PaymentsConfig {
    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }
}

/// API keys of the external AI providers.
#[derive(Debug, Clone, Default)]
pub struct AiProvidersConfig {
    pub openai_api_key: Option<Secret>,
    pub anthropic_api_key: Option<Secret>,
    pub google_api_key: Option<Secret>,
}

impl AiProvidersConfig {
    /// Names of the providers with a key present.
    pub fn configured(&self) -> Vec<&'static str> {
        [
            ("openai", &self.openai_api_key),
            ("anthropic", &self.anthropic_api_key),
            ("google", &self.google_api_key),
        ]
        .into_iter()
        .filter_map(|(name, key)| key.as_ref().map(|_| name))
        .collect()
    }
}

/// Which optional integrations have credentials, for startup logs and
/// the readiness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Integrations {
    pub database: bool,
    pub auth: bool,
    pub payments: bool,
    pub ai_providers: Vec<String>,
    pub cache: bool,
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub debug: bool,
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub payments: PaymentsConfig,
    pub ai: AiProvidersConfig,
    pub frontend_url: Option<Url>,
    pub cache_url: Option<Url>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            debug: false,
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            payments: PaymentsConfig::default(),
            ai: AiProvidersConfig::default(),
            frontend_url: None,
            cache_url: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        Ok(Self {
            app_name: env
                .string(APP_NAME_ENV)
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            debug: env.flag(DEBUG_ENV)?.unwrap_or(false),
            host: env.parse(HOST_ENV)?.unwrap_or(DEFAULT_HOST),
            port: env.parse(PORT_ENV)?.unwrap_or(DEFAULT_PORT),
            database: DatabaseConfig {
                url: env.http_url(SUPABASE_URL_ENV)?,
                anon_key: env.secret(SUPABASE_ANON_KEY_ENV),
                service_role_key: env.secret(SUPABASE_SERVICE_ROLE_KEY_ENV),
            },
            jwt: JwtConfig {
                secret: env.secret(JWT_SECRET_KEY_ENV),
                algorithm: env.jwt_algorithm(JWT_ALGORITHM_ENV)?.unwrap_or(Algorithm::HS256),
                access_token_expire_minutes: env
                    .parse(JWT_ACCESS_TOKEN_EXPIRE_MINUTES_ENV)?
                    .unwrap_or(DEFAULT_JWT_EXPIRE_MINUTES),
            },
            payments: PaymentsConfig {
                secret_key: env.secret(STRIPE_SECRET_KEY_ENV),
                webhook_secret: env.secret(STRIPE_WEBHOOK_SECRET_ENV),
                price_id_pro: env.string(STRIPE_PRICE_ID_PRO_ENV),
                price_id_enterprise: env.string(STRIPE_PRICE_ID_ENTERPRISE_ENV),
            },
            ai: AiProvidersConfig {
                openai_api_key: env.secret(OPENAI_API_KEY_ENV),
                anthropic_api_key: env.secret(ANTHROPIC_API_KEY_ENV),
                google_api_key: env.secret(GOOGLE_AI_API_KEY_ENV),
            },
            frontend_url: env.http_url(FRONTEND_URL_ENV)?,
            cache_url: env.url(REDIS_URL_ENV)?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn integrations(&self) -> Integrations {
        Integrations {
            database: self.database.is_configured(),
            auth: self.jwt.secret.is_some(),
            payments: self.payments.is_configured(),
            ai_providers: self.ai.configured().into_iter().map(String::from).collect(),
            cache: self.cache_url.is_some(),
        }
    }
}

/// Typed accessors over a variable lookup.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn secret(&self, name: &str) -> Option<Secret> {
        self.string(name).map(Secret::new)
    }

    fn parse<T>(&self, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.string(name)
            .map(|value| {
                value
                    .parse()
                    .map_err(|e| ConfigError::invalid(name, &value, e))
            })
            .transpose()
    }

    fn flag(&self, name: &'static str) -> Result<Option<bool>, ConfigError> {
        self.string(name)
            .map(|value| match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::invalid(name, &value, "expected a boolean")),
            })
            .transpose()
    }

    fn url(&self, name: &'static str) -> Result<Option<Url>, ConfigError> {
        self.parse::<Url>(name)
    }

    /// An `http`/`https` URL with a host, so its origin is never opaque.
    fn http_url(&self, name: &'static str) -> Result<Option<Url>, ConfigError> {
        let Some(url) = self.url(name)? else {
            return Ok(None);
        };

        let web = matches!(url.scheme(), "http" | "https") && url.origin().is_tuple();
        if !web {
            return Err(ConfigError::invalid(
                name,
                url.as_str(),
                "expected an http or https URL with a host",
            ));
        }
        Ok(Some(url))
    }

    fn jwt_algorithm(&self, name: &'static str) -> Result<Option<Algorithm>, ConfigError> {
        self.string(name)
            .map(|value| match value.to_ascii_uppercase().as_str() {
                "HS256" => Ok(Algorithm::HS256),
                "HS384" => Ok(Algorithm::HS384),
                "HS512" => Ok(Algorithm::HS512),
                _ => Err(ConfigError::invalid(
                    name,
                    &value,
                    "only HS256, HS384 and HS512 are supported",
                )),
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = load(&[]).unwrap();
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
        assert!(!config.debug);
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.jwt.access_token_expire_minutes, 30);
        assert!(config.frontend_url.is_none());
    }

    #[test]
    fn port_and_host_are_parsed() {
        let config = load(&[(PORT_ENV, "9001"), (HOST_ENV, "127.0.0.1")]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9001");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[(PORT_ENV, "abc")]).unwrap_err();
        assert_eq!(err.variable(), PORT_ENV);
        assert!(err.to_string().contains("\"abc\""));

        let err = load(&[(PORT_ENV, "70000")]).unwrap_err();
        assert_eq!(err.variable(), PORT_ENV);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = load(&[(PORT_ENV, "  "), (OPENAI_API_KEY_ENV, "")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.ai.openai_api_key.is_none());
    }

    #[test]
    fn debug_flag_accepts_common_spellings() {
        assert!(load(&[(DEBUG_ENV, "True")]).unwrap().debug);
        assert!(load(&[(DEBUG_ENV, "1")]).unwrap().debug);
        assert!(!load(&[(DEBUG_ENV, "off")]).unwrap().debug);
        assert_eq!(
            load(&[(DEBUG_ENV, "maybe")]).unwrap_err().variable(),
            DEBUG_ENV
        );
    }

    #[test]
    fn jwt_algorithm_must_be_hmac() {
        let config = load(&[(JWT_ALGORITHM_ENV, "hs512")]).unwrap();
        assert_eq!(config.jwt.algorithm, Algorithm::HS512);

        let err = load(&[(JWT_ALGORITHM_ENV, "RS256")]).unwrap_err();
        assert_eq!(err.variable(), JWT_ALGORITHM_ENV);
    }

    #[test]
    fn malformed_urls_are_rejected() {
        let err = load(&[(FRONTEND_URL_ENV, "not a url")]).unwrap_err();
        assert_eq!(err.variable(), FRONTEND_URL_ENV);
    }

    #[test]
    fn frontend_url_without_scheme_is_rejected() {
        // Parses as scheme "localhost", whose origin serializes to "null".
        let err = load(&[(FRONTEND_URL_ENV, "localhost:3000")]).unwrap_err();
        assert_eq!(err.variable(), FRONTEND_URL_ENV);

        let err = load(&[(SUPABASE_URL_ENV, "file:///tmp/db")]).unwrap_err();
        assert_eq!(err.variable(), SUPABASE_URL_ENV);

        let config = load(&[(FRONTEND_URL_ENV, "http://localhost:3000")]).unwrap();
        assert_eq!(
            config.frontend_url.unwrap().origin().ascii_serialization(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let config = load(&[
            (JWT_SECRET_KEY_ENV, "super-secret-value"),
            (STRIPE_SECRET_KEY_ENV, "sk_test_123"),
        ])
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-value"));
        assert!(!rendered.contains("sk_test_123"));
        assert!(rendered.contains("[REDACTED]"));
        assert_eq!(config.jwt.secret.unwrap().expose(), "super-secret-value");
    }

    #[test]
    fn integrations_reflect_configured_credentials() {
        let config = load(&[
            (SUPABASE_URL_ENV, "https://project.supabase.co"),
            (SUPABASE_SERVICE_ROLE_KEY_ENV, "service-key"),
            (ANTHROPIC_API_KEY_ENV, "sk-ant"),
            (GOOGLE_AI_API_KEY_ENV, "g-key"),
            (REDIS_URL_ENV, "redis://localhost:6379"),
        ])
        .unwrap();

        let integrations = config.integrations();
        assert!(integrations.database);
        assert!(!integrations.auth);
        assert!(!integrations.payments);
        assert_eq!(integrations.ai_providers, vec!["anthropic", "google"]);
        assert!(integrations.cache);
    }

    #[test]
    fn database_needs_url_and_key() {
        let config = load(&[(SUPABASE_URL_ENV, "https://project.supabase.co")]).unwrap();
        assert!(!config.database.is_configured());
    }
}
