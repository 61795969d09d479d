// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use coffee_shop_environment::{
    api::router,
    config::ServerSettings,
    environment::{self, DeploymentTarget},
    logging::{init_logging, LogFormat},
    state::AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging(LogFormat::from_env());

    // An invalid record aborts startup before anything can consume it.
    let target = DeploymentTarget::selected();
    let environment = match environment::init(target) {
        Ok(environment) => environment,
        Err(e) => {
            error!(deployment = %target, error = %e, "Refusing to start with invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let settings = ServerSettings::from_env();
    let app = router(AppState::new(target, environment));

    let listener = match TcpListener::bind(settings.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %settings.bind_addr, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    info!(
        addr = %settings.bind_addr,
        deployment = %target,
        "Environment service listening (docs at /docs)"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
    {
        error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    info!("Environment service stopped");
    ExitCode::SUCCESS
}

async fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
