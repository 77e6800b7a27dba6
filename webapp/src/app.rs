// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use jiff::Timestamp;
use url::Url;

use musinv_client::{Inventory, InventoryApi, QueryClient, ViewScope};

use crate::{app_name, view::Renderer};

/// Shared state of all request handlers.
#[derive(Debug)]
pub(crate) struct App<A> {
    pub(crate) inventory: Inventory<A>,

    /// Parent scope of all requests, cancelled on shutdown.
    pub(crate) scope: ViewScope,

    pub(crate) renderer: Renderer,
    about_json: serde_json::Value,
}

impl<A> App<A>
where
    A: InventoryApi,
{
    pub(crate) fn new(api: Arc<A>, api_url: &Url) -> anyhow::Result<Self> {
        let inventory = Inventory::new(api, Arc::new(QueryClient::new()));
        let renderer = Renderer::new()?;
        let about_json = serde_json::json!({
            "name": app_name(),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "version": env!("CARGO_PKG_VERSION"),
            "api_url": api_url,
            "launched_at": Timestamp::now(),
        });
        Ok(Self {
            inventory,
            scope: ViewScope::new(),
            renderer,
            about_json,
        })
    }

    pub(crate) fn about_json(&self) -> &serde_json::Value {
        &self.about_json
    }

    /// Abort all pending requests.
    pub(crate) fn shutdown(&self) {
        self.scope.cancel();
    }
}
