// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use bytes::Bytes;
use musinv_core::{InventoryRecord, Record, SerialNumber};
use reqwest::{Client, Response, Url, header};
use serde::Deserialize;

use crate::{Error, InventoryApi, Result, api::validate_record};

mod _json {
    pub(super) use musinv_core_json::record::*;
}

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const INVENTORY_PATH: &str = "inventory";

const SEARCH_PARAM: &str = "search";

pub trait ClientEnvironment {
    fn client(&self) -> &Client;
    fn join_api_url(&self, query_suffix: &str) -> Result<Url>;
}

/// Error body of the backend.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,

    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        let Self { detail, message } = self;
        match detail {
            Some(serde_json::Value::String(detail)) => Some(detail),
            Some(serde_json::Value::Null) | None => message,
            Some(detail) => Some(detail.to_string()),
        }
    }
}

pub async fn receive_response_body(response: Response) -> Result<Bytes> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&bytes)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_owned());
        return Err(Error::Status { status, message });
    }
    Ok(bytes)
}

fn encode_body<T: serde::Serialize>(body: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|err| Error::InvalidRequest(err.into()))
}

/// Accesses the REST backend over HTTP.
#[derive(Debug, Clone)]
pub struct WebApiClient {
    client: Client,
    base_url: Url,
}

impl WebApiClient {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// The base URL is treated as a directory.
    #[must_use]
    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl ClientEnvironment for WebApiClient {
    fn client(&self) -> &Client {
        &self.client
    }

    fn join_api_url(&self, query_suffix: &str) -> Result<Url> {
        self.base_url
            .join(query_suffix)
            .map_err(|err| Error::InvalidRequest(err.into()))
    }
}

fn record_path(serial_number: SerialNumber) -> String {
    format!("{INVENTORY_PATH}/{serial_number}")
}

async fn list<E: ClientEnvironment>(
    env: &E,
    search: Option<&str>,
) -> Result<Vec<InventoryRecord>> {
    let mut request_url = env.join_api_url(INVENTORY_PATH)?;
    if let Some(search) = search.map(str::trim).filter(|search| !search.is_empty()) {
        request_url
            .query_pairs_mut()
            .append_pair(SEARCH_PARAM, search);
    }
    let request = env.client().get(request_url);
    let response = request.send().await?;
    let response_body = receive_response_body(response).await?;
    let records = serde_json::from_slice::<Vec<_json::InventoryRecord>>(&response_body)?
        .into_iter()
        .map(Into::into)
        .collect::<Vec<_>>();
    log::debug!("Fetched {} record(s)", records.len());
    Ok(records)
}

async fn create<E: ClientEnvironment>(
    env: &E,
    serial_number: Option<SerialNumber>,
    record: Record,
) -> Result<InventoryRecord> {
    validate_record(&record)?;
    let url = env.join_api_url(INVENTORY_PATH)?;
    let body = encode_body(&_json::NewRecord::new(serial_number, record))?;
    let request = env
        .client()
        .post(url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    let response = request.send().await?;
    let response_body = receive_response_body(response).await?;
    let created: InventoryRecord =
        serde_json::from_slice::<_json::InventoryRecord>(&response_body)?.into();
    log::debug!("Created record {}", created.serial_number);
    Ok(created)
}

async fn update<E: ClientEnvironment>(
    env: &E,
    serial_number: SerialNumber,
    record: Record,
) -> Result<InventoryRecord> {
    validate_record(&record)?;
    let url = env.join_api_url(&record_path(serial_number))?;
    // The backend replaces the whole record including its serial number
    let body = encode_body(&_json::InventoryRecord::from(InventoryRecord::new(
        serial_number,
        record,
    )))?;
    let request = env
        .client()
        .put(url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    let response = request.send().await?;
    let response_body = receive_response_body(response).await?;
    let updated: InventoryRecord =
        serde_json::from_slice::<_json::InventoryRecord>(&response_body)?.into();
    log::debug!("Updated record {}", updated.serial_number);
    Ok(updated)
}

async fn delete<E: ClientEnvironment>(env: &E, serial_number: SerialNumber) -> Result<()> {
    let url = env.join_api_url(&record_path(serial_number))?;
    let request = env.client().delete(url);
    let response = request.send().await?;
    // The response body is irrelevant
    receive_response_body(response).await?;
    log::debug!("Deleted record {serial_number}");
    Ok(())
}

impl InventoryApi for WebApiClient {
    async fn list(&self, search: Option<&str>) -> Result<Vec<InventoryRecord>> {
        list(self, search).await
    }

    async fn create(
        &self,
        serial_number: Option<SerialNumber>,
        record: Record,
    ) -> Result<InventoryRecord> {
        create(self, serial_number, record).await
    }

    async fn update(&self, serial_number: SerialNumber, record: Record) -> Result<InventoryRecord> {
        update(self, serial_number, record).await
    }

    async fn delete(&self, serial_number: SerialNumber) -> Result<()> {
        delete(self, serial_number).await
    }
}
