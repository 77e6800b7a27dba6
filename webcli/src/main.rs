// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::env;

use tokio::signal;

use musinv_client::WebApiClient;

mod cli;
mod commands;
mod output;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    if let Some(dotenv_path) = dotenv_path {
        log::debug!("Loaded environment from dotenv file {}", dotenv_path.display());
    }

    let mut app = cli::build_command();
    let app_usage = app.render_usage();
    let matches = app.get_matches();

    let api_url_from_env = env::var(cli::API_URL_ENV).ok();
    let api_url = cli::api_url(&matches, api_url_from_env.as_deref())?;
    log::debug!("Backend: {api_url}");

    let Some(command) = cli::parse_command(&matches) else {
        println!("{app_usage}");
        return Ok(());
    };

    let interrupted = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Failed to receive Ctrl-C/SIGINT signal: {err}");
            // Never abort
            std::future::pending::<()>().await;
        }
    };

    let api = WebApiClient::new(api_url);
    tokio::select! {
        output = commands::execute(&api, command) => {
            println!("{}", output?);
        }
        () = interrupted => {
            log::info!("Aborted after receiving Ctrl-C/SIGINT");
        }
    }

    Ok(())
}
