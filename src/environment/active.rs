// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process-wide active record.
//!
//! Starts uninitialized and becomes active exactly once through [`init`].
//! There is no way back and no way to replace the record afterwards.
//! Components should receive the `Arc` returned by [`init`] explicitly;
//! [`active`] is for code that cannot be handed one.

use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use super::{DeploymentTarget, Environment};
use crate::error::ConfigError;

/// Record together with the target it was resolved for.
struct ActiveRecord {
    target: DeploymentTarget,
    environment: Arc<Environment>,
}

static ACTIVE: OnceLock<ActiveRecord> = OnceLock::new();

/// Resolve `target` and make its record the active one.
///
/// Fails without side effects when the record is invalid. Once a record is
/// active, later calls return it unchanged, whatever target they name.
pub fn init(target: DeploymentTarget) -> Result<Arc<Environment>, ConfigError> {
    activate(&ACTIVE, target, target.document())
}

fn activate(
    cell: &OnceLock<ActiveRecord>,
    target: DeploymentTarget,
    document: &str,
) -> Result<Arc<Environment>, ConfigError> {
    if let Some(current) = cell.get() {
        if current.target != target {
            warn!(
                active = %current.target,
                requested = %target,
                "Deployment environment already active for another target, keeping it"
            );
        }
        return Ok(Arc::clone(&current.environment));
    }

    let resolved = target.resolve_document(document)?;
    let current = cell.get_or_init(|| {
        info!(
            deployment = %target,
            production = resolved.is_production(),
            api_server_url = resolved.api_server_url(),
            idp_domain = resolved.identity_provider().domain(),
            idp_audience = resolved.identity_provider().audience(),
            idp_client_id = %resolved.identity_provider().masked_client_id(),
            "Deployment environment active"
        );
        ActiveRecord {
            target,
            environment: Arc::new(resolved),
        }
    });

    Ok(Arc::clone(&current.environment))
}

/// The active record.
///
/// # Panics
///
/// Panics when called before [`init`] succeeded. Startup must fail on an
/// invalid record before any consumer runs, so reaching this is a wiring bug.
pub fn active() -> Arc<Environment> {
    match ACTIVE.get() {
        Some(current) => Arc::clone(&current.environment),
        None => panic!("deployment environment accessed before initialization"),
    }
}

/// The active record, or `None` while uninitialized.
pub fn try_active() -> Option<Arc<Environment>> {
    ACTIVE.get().map(|current| Arc::clone(&current.environment))
}
