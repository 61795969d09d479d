// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    environment::{DeploymentTarget, Environment, IdentityProvider},
    error::ApiError,
    state::AppState,
};

/// Active deployment record as served to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentResponse {
    /// Target this binary was built for.
    pub deployment_target: DeploymentTarget,
    pub production_mode: bool,
    /// Base URL for all API server calls.
    pub api_server_url: String,
    pub identity_provider: IdentityProviderSettings,
}

/// Identity provider values, passed verbatim to the auth client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderSettings {
    pub domain: String,
    pub audience: String,
    pub client_id: String,
    pub callback_url: String,
}

/// Endpoints derived from the identity provider settings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderEndpoints {
    /// Expected token issuer.
    pub issuer: String,
    pub jwks_url: String,
    /// Hosted login link.
    pub authorize_url: String,
    pub audience: String,
    pub client_id: String,
}

impl From<&IdentityProvider> for IdentityProviderSettings {
    fn from(idp: &IdentityProvider) -> Self {
        Self {
            domain: idp.domain().to_string(),
            audience: idp.audience().to_string(),
            client_id: idp.client_id().to_string(),
            callback_url: idp.callback_url().to_string(),
        }
    }
}

impl EnvironmentResponse {
    pub fn new(target: DeploymentTarget, environment: &Environment) -> Self {
        Self {
            deployment_target: target,
            production_mode: environment.is_production(),
            api_server_url: environment.api_server_url().to_string(),
            identity_provider: environment.identity_provider().into(),
        }
    }
}

/// Get the active deployment record.
#[utoipa::path(
    get,
    path = "/environment",
    tag = "Environment",
    responses(
        (status = 200, description = "Active deployment record", body = EnvironmentResponse)
    )
)]
pub async fn get_environment(State(state): State<AppState>) -> Json<EnvironmentResponse> {
    Json(EnvironmentResponse::new(state.target, &state.environment))
}

/// Get the identity provider endpoints for the active record.
#[utoipa::path(
    get,
    path = "/environment/identity-provider",
    tag = "Environment",
    responses(
        (status = 200, description = "Derived identity provider endpoints", body = IdentityProviderEndpoints),
        (status = 500, description = "Login link could not be built")
    )
)]
pub async fn get_identity_provider(
    State(state): State<AppState>,
) -> Result<Json<IdentityProviderEndpoints>, ApiError> {
    let idp = state.environment.identity_provider();
    let authorize_url = idp
        .authorize_url()
        .map_err(|e| ApiError::internal(format!("Failed to build login link: {e}")))?;

    Ok(Json(IdentityProviderEndpoints {
        issuer: idp.issuer(),
        jwks_url: idp.jwks_url(),
        authorize_url: authorize_url.to_string(),
        audience: idp.audience().to_string(),
        client_id: idp.client_id().to_string(),
    }))
}
