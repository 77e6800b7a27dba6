// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, sync::Arc};

use discro::{Ref, Subscriber};
use musinv_core::{InventoryRecord, Record, SerialNumber};

use crate::{
    InventoryApi, Result,
    api::validate_record,
    mutation::Mutation,
    query::{Query, QueryClient, QueryKey, QueryState},
    scope::ViewScope,
};

/// All records are cached under this key.
pub const INVENTORY_QUERY_KEY: QueryKey = QueryKey::new_static("inventory");

pub type Records = Vec<InventoryRecord>;

/// Binds the backend to the cached list of records.
///
/// Every successful write operation invalidates the cached list.
#[derive(Debug)]
pub struct Inventory<A> {
    api: Arc<A>,
    queries: Arc<QueryClient<Records>>,
    query: Arc<Query<Records>>,
    mutation: Mutation,
}

impl<A> Inventory<A>
where
    A: InventoryApi,
{
    #[must_use]
    pub fn new(api: Arc<A>, queries: Arc<QueryClient<Records>>) -> Self {
        let query = queries.query(&INVENTORY_QUERY_KEY);
        Self {
            api,
            queries,
            query,
            mutation: Mutation::new(),
        }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn state(&self) -> Ref<'_, QueryState<Records>> {
        self.query.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<QueryState<Records>> {
        self.query.subscribe_changed()
    }

    #[must_use]
    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    /// Fetch all records unless the cached list is fresh.
    ///
    /// The outcome is available through [`Self::state()`].
    pub async fn load(&self, scope: &ViewScope) -> Result<()> {
        self.query.fetch_fresh(scope, || self.api.list(None)).await
    }

    /// Fetch all records again.
    ///
    /// Joins a pending fetch instead of starting another one.
    pub async fn reload(&self, scope: &ViewScope) -> Result<()> {
        let is_pending = self.state().is_pending();
        if !is_pending {
            self.invalidate();
        }
        self.load(scope).await
    }

    fn invalidate(&self) {
        self.queries.invalidate(&INVENTORY_QUERY_KEY);
    }

    async fn write<T>(
        &self,
        scope: &ViewScope,
        operation: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        // The backend might have applied a write that has been
        // cancelled or dropped while awaiting the response
        let mut outcome_unknown = InvalidateOnDrop {
            inventory: Some(self),
        };
        let result = self
            .mutation
            .mutate(scope, operation, |_| {
                self.invalidate();
            })
            .await;
        if !matches!(&result, Err(err) if err.is_cancelled()) {
            outcome_unknown.inventory = None;
        }
        result
    }

    pub async fn create(
        &self,
        scope: &ViewScope,
        serial_number: Option<SerialNumber>,
        record: Record,
    ) -> Result<InventoryRecord> {
        validate_record(&record)?;
        self.write(scope, self.api.create(serial_number, record)).await
    }

    pub async fn update(
        &self,
        scope: &ViewScope,
        serial_number: SerialNumber,
        record: Record,
    ) -> Result<InventoryRecord> {
        validate_record(&record)?;
        self.write(scope, self.api.update(serial_number, record)).await
    }

    pub async fn delete(&self, scope: &ViewScope, serial_number: SerialNumber) -> Result<()> {
        self.write(scope, self.api.delete(serial_number)).await
    }
}

struct InvalidateOnDrop<'a, A> {
    inventory: Option<&'a Inventory<A>>,
}

impl<A> Drop for InvalidateOnDrop<'_, A> {
    fn drop(&mut self) {
        if let Some(inventory) = self.inventory.take() {
            log::debug!("Invalidating {INVENTORY_QUERY_KEY} after an interrupted write");
            inventory.queries.invalidate(&INVENTORY_QUERY_KEY);
        }
    }
}
