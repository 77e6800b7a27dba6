// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, net::IpAddr};

use anyhow::Error;
use dotenvy::dotenv;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::{Config, ENDPOINT_IP_DEFAULT, ENDPOINT_PORT_DEFAULT, default_api_url};

pub(crate) fn init_environment() {
    if let Ok(path) = dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if let Ok(rust_log_from_env) = env::var("RUST_LOG")
            && !rust_log_from_env.is_empty()
        {
            eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    let env_filter = create_env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const INVENTORY_API_URL_ENV: &str = "INVENTORY_API_URL";

fn parse_endpoint_ip(var: &str) -> anyhow::Result<IpAddr> {
    var.trim().parse().map_err(Error::from)
}

fn parse_endpoint_port(var: &str) -> anyhow::Result<u16> {
    let var = var.trim();
    if var.is_empty() {
        return Ok(ENDPOINT_PORT_DEFAULT);
    }
    var.parse().map_err(Error::from)
}

fn parse_api_url(var: &str) -> anyhow::Result<Url> {
    let url = Url::parse(var.trim())?;
    if url.cannot_be_a_base() {
        anyhow::bail!("not a base URL");
    }
    Ok(url)
}

fn parse_var<T>(name: &str, parse: impl FnOnce(&str) -> anyhow::Result<T>) -> Option<T> {
    let var = env::var(name).ok()?;
    tracing::debug!("{name} = {var}");
    parse(&var)
        .map_err(|err| {
            tracing::warn!("Failed to parse {name} = {var}: {err}");
        })
        .ok()
}

/// Override the configuration with environment variables.
///
/// Unparsable values are replaced by their defaults.
pub(crate) fn parse_config_into(config: &mut Config) {
    let endpoint = &mut config.network.endpoint;
    endpoint.ip_addr = parse_var(ENDPOINT_IP_ENV, parse_endpoint_ip).unwrap_or(ENDPOINT_IP_DEFAULT);
    endpoint.port =
        parse_var(ENDPOINT_PORT_ENV, parse_endpoint_port).unwrap_or(ENDPOINT_PORT_DEFAULT);
    config.api.base_url =
        parse_var(INVENTORY_API_URL_ENV, parse_api_url).unwrap_or_else(default_api_url);
}
