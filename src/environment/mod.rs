// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Deployment Environment
//!
//! One immutable record per deployment target holds everything the client
//! needs to reach the API server and sign users in:
//!
//! | Field | Serialized as | Constraint |
//! |-------|---------------|------------|
//! | `production_mode` | `productionMode` | true only for the production target |
//! | `api_server_url` | `apiServerUrl` | absolute http(s) URL |
//! | `identity_provider.domain` | `identityProvider.domain` | bare host name |
//! | `identity_provider.audience` | `identityProvider.audience` | non-empty |
//! | `identity_provider.client_id` | `identityProvider.clientId` | non-empty, no whitespace |
//! | `identity_provider.callback_url` | `identityProvider.callbackUrl` | absolute http(s) URL |
//!
//! Documents written for the Ionic front-end (`production`, `auth0.url`,
//! `auth0.callbackURL`) are accepted as well.
//!
//! A record can only be obtained through [`Environment::new`] or by
//! deserializing, and both paths validate every field. Which record becomes
//! active is decided at build time (see [`DeploymentTarget`]), and the
//! active record is published once through [`init`] / [`active`].

pub mod active;
pub mod identity;
pub mod target;

pub use active::{active, init, try_active};
pub use identity::IdentityProvider;
pub use target::DeploymentTarget;

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use url::{Host, SyntaxViolation, Url};

use crate::error::ConfigError;

/// Validated deployment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EnvironmentDocument")]
pub struct Environment {
    production_mode: bool,
    api_server_url: String,
    identity_provider: IdentityProvider,
}

/// Unchecked shape of a record document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentDocument {
    #[serde(alias = "production")]
    production_mode: bool,
    api_server_url: String,
    #[serde(alias = "auth0")]
    identity_provider: IdentityProviderDocument,
}

/// Unchecked identity provider section; only reachable through a record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityProviderDocument {
    #[serde(alias = "url")]
    domain: String,
    audience: String,
    client_id: String,
    #[serde(alias = "callbackURL")]
    callback_url: String,
}

impl TryFrom<EnvironmentDocument> for Environment {
    type Error = ConfigError;

    fn try_from(doc: EnvironmentDocument) -> Result<Self, Self::Error> {
        let idp = doc.identity_provider;
        Environment::new(
            doc.production_mode,
            doc.api_server_url,
            IdentityProvider::new(idp.domain, idp.audience, idp.client_id, idp.callback_url),
        )
    }
}

impl Environment {
    /// Build a record, rejecting empty or malformed fields.
    pub fn new(
        production_mode: bool,
        api_server_url: impl Into<String>,
        identity_provider: IdentityProvider,
    ) -> Result<Self, ConfigError> {
        let environment = Self {
            production_mode,
            api_server_url: api_server_url.into(),
            identity_provider,
        };
        environment.validate()?;
        Ok(environment)
    }

    /// Parse and validate a JSON record document.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let doc: EnvironmentDocument = serde_json::from_str(document)
            .map_err(|e| ConfigError::invalid("document", format!("could not be parsed: {e}")))?;
        Environment::try_from(doc)
    }

    /// Check every field, reporting the first offending one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let idp = &self.identity_provider;

        require_absolute_url("apiServerUrl", &self.api_server_url)?;
        require_host_name("identityProvider.domain", idp.domain())?;
        require_non_empty("identityProvider.audience", idp.audience())?;
        require_non_empty("identityProvider.clientId", idp.client_id())?;
        if idp.client_id().chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "identityProvider.clientId",
                "must not contain whitespace",
            ));
        }
        require_absolute_url("identityProvider.callbackUrl", idp.callback_url())?;

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.production_mode
    }

    /// Base URL of the API server, as configured.
    pub fn api_server_url(&self) -> &str {
        &self.api_server_url
    }

    pub fn identity_provider(&self) -> &IdentityProvider {
        &self.identity_provider
    }

    /// Resolve an API path (`drinks`, `/drinks-detail`, `drinks/3`) under
    /// the configured server URL, keeping any path prefix it carries.
    pub fn api_endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(&self.api_server_url)?;
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        base.join(path.trim_start_matches('/'))
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Parse strictly: the record stores the raw string, so any input the URL
/// parser would have to repair (padding, tabs or newlines, `http:host`,
/// backslashes) is rejected instead.
fn require_absolute_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    require_non_empty(field, value)?;

    let violation: Cell<Option<SyntaxViolation>> = Cell::new(None);
    let record_violation = |v: SyntaxViolation| {
        if violation.get().is_none() {
            violation.set(Some(v));
        }
    };
    let url = Url::options()
        .syntax_violation_callback(Some(&record_violation))
        .parse(value)
        .map_err(|e| ConfigError::invalid(field, format!("is not a valid absolute URL: {e}")))?;

    if let Some(v) = violation.get() {
        return Err(ConfigError::invalid(
            field,
            format!("is not a well-formed URL: {v}"),
        ));
    }

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            field,
            format!("must use http or https, got `{}`", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::invalid(field, "must include a host"));
    }
    Ok(())
}

fn require_host_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    require_non_empty(field, value)?;

    if value.contains("://") {
        return Err(ConfigError::invalid(field, "must be a host name without a scheme"));
    }
    Host::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::invalid(field, format!("is not a valid host name: {e}")))
}
