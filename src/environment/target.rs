// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Deployment targets and build-time record selection.
//!
//! Each target owns one JSON document under `environments/`, embedded into
//! the binary at compile time. The target itself is chosen by Cargo features:
//!
//! | Features | Target |
//! |----------|--------|
//! | (none) | `development` |
//! | `staging` | `staging` |
//! | `production` | `production` |
//!
//! Nothing at runtime can switch targets.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::Environment;
use crate::error::ConfigError;

/// Named deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    Development,
    Staging,
    Production,
}

impl DeploymentTarget {
    pub const ALL: [DeploymentTarget; 3] = [
        DeploymentTarget::Development,
        DeploymentTarget::Staging,
        DeploymentTarget::Production,
    ];

    /// Target compiled into this build.
    pub const fn selected() -> Self {
        if cfg!(feature = "production") {
            DeploymentTarget::Production
        } else if cfg!(feature = "staging") {
            DeploymentTarget::Staging
        } else {
            DeploymentTarget::Development
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, DeploymentTarget::Production)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DeploymentTarget::Development => "development",
            DeploymentTarget::Staging => "staging",
            DeploymentTarget::Production => "production",
        }
    }

    /// Record document embedded for this target.
    pub const fn document(self) -> &'static str {
        match self {
            DeploymentTarget::Development => include_str!("../../environments/development.json"),
            DeploymentTarget::Staging => include_str!("../../environments/staging.json"),
            DeploymentTarget::Production => include_str!("../../environments/production.json"),
        }
    }

    /// Parse and validate this target's record.
    ///
    /// The record's production flag must agree with the target.
    pub fn resolve(self) -> Result<Environment, ConfigError> {
        self.resolve_document(self.document())
    }

    pub(super) fn resolve_document(self, document: &str) -> Result<Environment, ConfigError> {
        let environment = Environment::from_json(document)?;

        if environment.is_production() != self.is_production() {
            return Err(ConfigError::invalid(
                "productionMode",
                format!(
                    "is {} but the `{self}` target requires {}",
                    environment.is_production(),
                    self.is_production()
                ),
            ));
        }

        Ok(environment)
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::IdentityProvider;
    use url::Url;

    #[test]
    fn every_shipped_record_is_valid() {
        for target in DeploymentTarget::ALL {
            let env = target
                .resolve()
                .unwrap_or_else(|e| panic!("{target} record is invalid: {e}"));

            let idp = env.identity_provider();
            for value in [
                env.api_server_url(),
                idp.domain(),
                idp.audience(),
                idp.client_id(),
                idp.callback_url(),
            ] {
                assert!(!value.is_empty(), "{target} has an empty field");
            }

            for url in [env.api_server_url(), idp.callback_url()] {
                let parsed = Url::parse(url).unwrap();
                assert!(!parsed.cannot_be_a_base(), "{target}: {url} is not absolute");
                assert!(parsed.host_str().is_some());
            }
        }
    }

    #[test]
    fn only_production_record_is_flagged_production() {
        for target in DeploymentTarget::ALL {
            assert_eq!(target.resolve().unwrap().is_production(), target.is_production());
        }
    }

    #[test]
    fn production_flag_mismatch_is_rejected() {
        let err = DeploymentTarget::Production
            .resolve_document(DeploymentTarget::Development.document())
            .unwrap_err();
        assert_eq!(err.field(), "productionMode");

        let err = DeploymentTarget::Staging
            .resolve_document(DeploymentTarget::Production.document())
            .unwrap_err();
        assert_eq!(err.field(), "productionMode");
    }

    #[test]
    fn development_record_matches_front_end_values() {
        let env = DeploymentTarget::Development.resolve().unwrap();
        let expected = Environment::new(
            false,
            "http://127.0.0.1:5000",
            IdentityProvider::new(
                "perpvirg.us.auth0.com",
                "menu",
                "E84bI9nZ9z7MeC1AM5ygaGxqpFCA5CFN",
                "http://localhost:8100",
            ),
        )
        .unwrap();
        assert_eq!(env, expected);
    }

    #[test]
    fn selected_target_follows_features() {
        let expected = if cfg!(feature = "production") {
            DeploymentTarget::Production
        } else if cfg!(feature = "staging") {
            DeploymentTarget::Staging
        } else {
            DeploymentTarget::Development
        };
        assert_eq!(DeploymentTarget::selected(), expected);
    }

    #[test]
    fn display_and_serde_use_lowercase_names() {
        assert_eq!(DeploymentTarget::Staging.to_string(), "staging");
        assert_eq!(
            serde_json::to_value(DeploymentTarget::Production).unwrap(),
            serde_json::json!("production")
        );
    }
}
