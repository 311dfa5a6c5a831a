// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{error::AuthErrorBody, AuthenticatedUser, Role},
    config::{AppConfig, Integrations},
    error::{route_not_found, ErrorBody},
    models::{AuthTestResponse, RootResponse, Script, ScriptsResponse},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod root;
pub mod scripts;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let v1_routes = Router::new()
        .route("/auth/test", post(auth::test_auth))
        .route("/scripts", get(scripts::list_scripts));

    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api/v1", v1_routes)
        .fallback(route_not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(cors)
}

/// CORS policy.
///
/// With `FRONTEND_URL` set only that origin is allowed. Without it every
/// origin is mirrored back, credentials included. A frontend URL with an
/// opaque origin allows no cross-origin requests at all.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let Some(url) = config.frontend_url.as_ref() else {
        return CorsLayer::very_permissive();
    };

    let origin = Some(url.origin())
        .filter(|origin| origin.is_tuple())
        .and_then(|origin| HeaderValue::from_str(&origin.ascii_serialization()).ok());

    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
        None => {
            tracing::warn!(frontend_url = %url, "Frontend URL has no usable origin; CORS disabled");
            CorsLayer::new()
        }
    }
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "AI Script Strategist API"),
    paths(
        root::root,
        health::health,
        health::liveness,
        health::readiness,
        auth::test_auth,
        scripts::list_scripts
    ),
    components(
        schemas(
            RootResponse,
            health::HealthResponse,
            health::ReadyResponse,
            Integrations,
            AuthTestResponse,
            AuthenticatedUser,
            Role,
            Script,
            ScriptsResponse,
            ErrorBody,
            AuthErrorBody
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Service", description = "Service banner"),
        (name = "Health", description = "Container health probes"),
        (name = "Auth", description = "Bearer token verification"),
        (name = "Scripts", description = "Script library")
    )
)]
pub struct ApiDoc;
