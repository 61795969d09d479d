// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::environment::{DeploymentTarget, Environment};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub target: DeploymentTarget,
    pub environment: Arc<Environment>,
}

impl AppState {
    pub fn new(target: DeploymentTarget, environment: Arc<Environment>) -> Self {
        Self {
            target,
            environment,
        }
    }
}
