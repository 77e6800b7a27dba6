// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, sync::Arc};

use musinv_client::WebApiClient;

use crate::{app::App, config::Config, routing};

pub(crate) async fn run(
    config: Config,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    log::info!("Launching");

    let Config { network, api } = config;

    log::info!("Using backend at {base_url}", base_url = api.base_url);
    let api_client = Arc::new(WebApiClient::new(api.base_url.clone()));
    let app = Arc::new(App::new(api_client, &api.base_url)?);

    let filters = routing::create_filters(Arc::clone(&app));

    log::info!("Initializing server");
    let (socket_addr, server_listener) = warp::serve(filters)
        .try_bind_with_graceful_shutdown(network.endpoint.socket_addr(), shutdown_signal)?;

    log::info!("Listening on {socket_addr}");
    server_listener.await;

    log::info!("Stopping");
    app.shutdown();

    Ok(())
}
