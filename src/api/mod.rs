// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{environment::DeploymentTarget, state::AppState};

pub mod environment;
pub mod health;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/environment", get(environment::get_environment))
        .route(
            "/environment/identity-provider",
            get(environment::get_identity_provider),
        )
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        environment::get_environment,
        environment::get_identity_provider,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            DeploymentTarget,
            environment::EnvironmentResponse,
            environment::IdentityProviderSettings,
            environment::IdentityProviderEndpoints,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Environment", description = "Active deployment configuration"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
