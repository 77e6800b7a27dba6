// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, sync::Arc};

use serde::Deserialize;
use url::form_urlencoded;
use warp::{
    Filter, Rejection, Reply,
    filters::BoxedFilter,
    http::{StatusCode, Uri},
    reject::Reject,
    reply::Response,
};

use musinv_client::{InventoryApi, QueryState, inventory::Records};
use musinv_core::SerialNumber;

use crate::{app::App, view::Page};

/// Form bodies only contain the search text.
const FORM_BODY_LIMIT: u64 = 4 * 1024;

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    search: String,
}

#[derive(Debug)]
struct InternalError(String);

impl Reject for InternalError {}

impl From<anyhow::Error> for InternalError {
    fn from(from: anyhow::Error) -> Self {
        Self(from.to_string())
    }
}

fn internal_error(err: impl Into<InternalError>) -> Rejection {
    warp::reject::custom(err.into())
}

/// The location of the index page with the given search text.
fn index_location(search: &str) -> String {
    if search.is_empty() {
        return "/".to_owned();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("search", search)
        .finish();
    format!("/?{query}")
}

/// A failed initial fetch has nothing to display.
fn page_status(state: &QueryState<Records>) -> StatusCode {
    if state.err_msg().is_some() && state.last_value().is_none() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}

fn reply_page<A>(app: &App<A>, page: &Page, status: StatusCode) -> Result<Response, Rejection> {
    let html = app.renderer.render_page(page).map_err(internal_error)?;
    Ok(warp::reply::with_status(warp::reply::html(html), status).into_response())
}

async fn reply_index<A>(app: Arc<App<A>>, params: SearchParams) -> Result<Response, Rejection>
where
    A: InventoryApi,
{
    let scope = app.scope.child();
    if let Err(err) = app.inventory.reload(&scope).await {
        log::info!("Loading the inventory has been interrupted: {err}");
    }
    let (page, status) = {
        let state = app.inventory.state();
        (Page::new(&state, &params.search), page_status(&state))
    };
    reply_page(&app, &page, status)
}

async fn delete_record<A>(
    app: Arc<App<A>>,
    serial_number: u64,
    params: SearchParams,
) -> Result<Response, Rejection>
where
    A: InventoryApi,
{
    let scope = app.scope.child();
    let err = match app
        .inventory
        .delete(&scope, SerialNumber::new(serial_number))
        .await
    {
        Ok(()) => {
            log::info!("Deleted record {serial_number}");
            let location = index_location(&params.search);
            let uri = location
                .parse::<Uri>()
                .map_err(|err| internal_error(anyhow::Error::from(err)))?;
            return Ok(warp::redirect::see_other(uri).into_response());
        }
        Err(err) => err,
    };
    log::warn!("Failed to delete record {serial_number}: {err}");
    // The cached list has not been invalidated and remains unchanged
    if let Err(err) = app.inventory.load(&scope).await {
        log::info!("Loading the inventory has been interrupted: {err}");
    }
    let page = {
        let state = app.inventory.state();
        Page::new(&state, &params.search)
    }
    .with_error(format!("Failed to delete record {serial_number}: {err}"));
    reply_page(&app, &page, StatusCode::BAD_GATEWAY)
}

#[allow(clippy::unused_async)] // async needed for warp filter
async fn handle_rejection(reject: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;
    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = code.canonical_reason().unwrap_or_default().to_owned();
    } else if let Some(InternalError(err_msg)) = reject.find() {
        log::error!("Failed to handle request: {err_msg}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = err_msg.clone();
    } else if let Some(err) = reject.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = err.to_string();
    } else if let Some(err) = reject.find::<warp::reject::PayloadTooLarge>() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = err.to_string();
    } else if let Some(err) = reject.find::<warp::reject::MethodNotAllowed>() {
        // Least priority, most rejections contain this element
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = err.to_string();
    } else {
        log::warn!("Unhandled rejection {reject:?}");
        code = StatusCode::BAD_REQUEST;
        message = format!("{reject:?}");
    }
    Ok(warp::reply::with_status(message, code))
}

pub(crate) fn create_filters<A>(app: Arc<App<A>>) -> BoxedFilter<(impl Reply,)>
where
    A: InventoryApi + 'static,
{
    let app = warp::any().map(move || Arc::clone(&app));

    log::info!("Creating routes");

    // GET / or /index.html
    let index_path = warp::path("index.html")
        .and(warp::path::end())
        .or(warp::path::end());
    let index = index_path
        .and(warp::get())
        .and(warp::query::<SearchParams>())
        .and(app.clone())
        .and_then(|_, params: SearchParams, app: Arc<App<A>>| {
            reply_index(app, params)
        });

    // POST /inventory/{serial_number}/delete
    let delete = warp::path("inventory")
        .and(warp::path::param::<u64>())
        .and(warp::path("delete"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_BODY_LIMIT))
        .and(warp::body::form::<SearchParams>())
        .and(app.clone())
        .and_then(
            |serial_number: u64, params: SearchParams, app: Arc<App<A>>| {
                delete_record(app, serial_number, params)
            },
        );

    // GET /about
    let about = warp::path("about")
        .and(warp::path::end())
        .and(warp::get())
        .and(app)
        .map(|app: Arc<App<A>>| warp::reply::json(app.about_json()));

    index
        .or(delete)
        .or(about)
        .recover(handle_rejection)
        .boxed()
}

#[cfg(test)]
mod tests;
