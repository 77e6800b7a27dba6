// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::future::Future;

use musinv_core::{InventoryRecord, Record, SerialNumber};

use crate::{Error, Result, prelude::*};

/// CRUD operations of the inventory backend.
pub trait InventoryApi: Send + Sync {
    /// Fetch all records, optionally filtered by free text on the server.
    fn list(&self, search: Option<&str>)
    -> impl Future<Output = Result<Vec<InventoryRecord>>> + Send;

    /// Create a new record.
    ///
    /// The backend assigns a serial number if none is given. Returns the
    /// record as stored by the backend.
    fn create(
        &self,
        serial_number: Option<SerialNumber>,
        record: Record,
    ) -> impl Future<Output = Result<InventoryRecord>> + Send;

    /// Replace an existing record.
    fn update(
        &self,
        serial_number: SerialNumber,
        record: Record,
    ) -> impl Future<Output = Result<InventoryRecord>> + Send;

    fn delete(&self, serial_number: SerialNumber) -> impl Future<Output = Result<()>> + Send;
}

/// Validate a record before sending it to the backend.
pub fn validate_record(record: &Record) -> Result<()> {
    record
        .validate()
        .map_err(|err| Error::InvalidRequest(anyhow::anyhow!("invalid record: {err:?}")))
}
