// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::env::current_exe;

mod app;
mod config;
mod env;
mod routing;
mod runtime;
mod view;

#[must_use]
pub(crate) fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
        return;
    }
    log::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return Err(err);
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    log::info!("Patching configuration from .env file and environment variables");
    let mut config = config::Config::default();
    env::parse_config_into(&mut config);
    log::debug!("Configuration: {config:?}");

    runtime::run(config, shutdown_signal()).await?;

    log::info!("Exiting");
    Ok(())
}
