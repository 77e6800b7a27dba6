// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Data access and query/cache components of the inventory frontend.
//!
//! The [`InventoryApi`] abstracts the REST backend. Fetched records are
//! cached in a [`QueryClient`] under the [`INVENTORY_QUERY_KEY`] and
//! invalidated after each successful [`Mutation`].

mod error;
pub use self::error::{Error, Result};

pub mod api;
pub use self::api::InventoryApi;

pub mod webapi;
pub use self::webapi::WebApiClient;

pub mod query;
pub use self::query::{FetchState, Query, QueryClient, QueryKey, QueryState};

pub mod mutation;
pub use self::mutation::{Mutation, MutationState};

pub mod scope;
pub use self::scope::ViewScope;

pub mod inventory;
pub use self::inventory::{INVENTORY_QUERY_KEY, Inventory};

pub mod util;

pub use reqwest::StatusCode;

pub mod prelude {
    pub use musinv_core::prelude::*;

    pub use crate::util::remote::DataSnapshot;
}
