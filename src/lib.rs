// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Coffee Shop Environment - Deployment Configuration Service
//!
//! This crate resolves the deployment record (API server URL and Auth0
//! parameters) compiled into the build, validates it once at startup and
//! publishes it to the rest of the process and to browser clients.
//!
//! ## Modules
//!
//! - `environment` - Deployment record, targets and the active accessor
//! - `api` - HTTP handlers serving the active record (Axum)
//! - `config` - Listener and logging settings of the service process
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod state;
