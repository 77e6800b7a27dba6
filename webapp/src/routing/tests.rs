// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use url::Url;
use warp::{http::StatusCode, hyper::body::Bytes};

use musinv_client::{Error, Result};
use musinv_core::{InventoryRecord, Record, YearType};

use super::*;

#[derive(Debug, Default)]
struct FakeApi {
    records: Mutex<Records>,
    list_count: AtomicUsize,
    fail_list: AtomicBool,
    fail_delete: AtomicBool,
}

impl FakeApi {
    fn new(records: Records) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    fn list_count(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }
}

impl InventoryApi for FakeApi {
    async fn list(&self, _search: Option<&str>) -> Result<Vec<InventoryRecord>> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Status {
                status: musinv_client::StatusCode::SERVICE_UNAVAILABLE,
                message: "Backend unavailable".to_owned(),
            });
        }
        Ok(self.records.lock().clone())
    }

    async fn create(
        &self,
        _serial_number: Option<SerialNumber>,
        _record: Record,
    ) -> Result<InventoryRecord> {
        unimplemented!()
    }

    async fn update(&self, serial_number: SerialNumber, record: Record) -> Result<InventoryRecord> {
        Ok(InventoryRecord::new(serial_number, record))
    }

    async fn delete(&self, serial_number: SerialNumber) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::Status {
                status: musinv_client::StatusCode::NOT_FOUND,
                message: "Not found".to_owned(),
            });
        }
        self.records
            .lock()
            .retain(|record| record.serial_number != serial_number);
        Ok(())
    }
}

fn record(
    serial_number: u64,
    artist: &str,
    year: Option<YearType>,
    genre: &str,
    titles: &[&str],
) -> InventoryRecord {
    InventoryRecord::new(
        SerialNumber::new(serial_number),
        Record {
            artist: artist.to_owned(),
            media: "cd".to_owned(),
            year,
            genre: genre.to_owned(),
            titles: titles.iter().copied().map(ToOwned::to_owned).collect(),
        },
    )
}

fn sample_records() -> Records {
    vec![
        record(7, "Portishead", Some(1994), "Trip-Hop", &["Dummy"]),
        record(3, "Björk", Some(1997), "Electronic", &["Homogenic"]),
    ]
}

fn api_url() -> Url {
    "http://localhost:8000/".parse().unwrap()
}

fn filters(api: &Arc<FakeApi>) -> BoxedFilter<(impl Reply + use<>,)> {
    let app = App::new(Arc::clone(api), &api_url()).unwrap();
    create_filters(Arc::new(app))
}

fn body_text(body: &Bytes) -> &str {
    std::str::from_utf8(body).unwrap()
}

async fn delete_request(
    filters: &BoxedFilter<(impl Reply + 'static,)>,
    serial_number: u64,
    form: &str,
) -> warp::http::Response<Bytes> {
    warp::test::request()
        .method("POST")
        .path(&format!("/inventory/{serial_number}/delete"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(form.to_owned())
        .reply(filters)
        .await
}

#[test]
fn index_location_with_search() {
    assert_eq!("/", index_location(""));
    assert_eq!("/?search=bj%C3%B6rk", index_location("björk"));
    assert_eq!("/?search=a+%26+b", index_location("a & b"));
}

#[test_log::test(tokio::test)]
async fn render_rows_in_order_received() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    let html = body_text(res.body());
    let first = html.find(r#"<tr data-serial="7""#).unwrap();
    let second = html.find(r#"<tr data-serial="3""#).unwrap();
    assert!(first < second);
    assert!(html.contains(r#"<meta name="viewport" content="width=device-width"#));
    assert!(html.contains(r#"<div class="table-wrapper">"#));

    let res = warp::test::request().path("/index.html").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());

    // Every page request reloads the records
    assert_eq!(2, api.list_count());
}

#[test_log::test(tokio::test)]
async fn reload_shows_changes_made_elsewhere() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    assert!(body_text(res.body()).contains(r#"<tr data-serial="7""#));

    api.records
        .lock()
        .retain(|record| record.serial_number != SerialNumber::new(7));

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    let html = body_text(res.body());
    assert!(!html.contains(r#"<tr data-serial="7""#));
    assert!(html.contains(r#"<tr data-serial="3""#));
    assert!(html.contains(r#"<span id="totalRecords">1</span>"#));
    assert_eq!(2, api.list_count());
}

#[test_log::test(tokio::test)]
async fn search_hides_rows_without_match() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = warp::test::request()
        .path("/?search=BJORK")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, res.status());
    let html = body_text(res.body());
    assert!(html.contains(r#"<tr data-serial="7" hidden data-search="#));
    assert!(html.contains(r#"<tr data-serial="3" data-search="#));
    assert!(html.contains(r#"value="BJORK""#));
    // Stats are not affected by the search
    assert!(html.contains(r#"<span id="totalRecords">2</span>"#));
}

#[test_log::test(tokio::test)]
async fn stats_of_all_records() {
    let api = Arc::new(FakeApi::new(vec![record(
        1,
        "Björk",
        Some(1997),
        "Electronic",
        &["Homogenic"],
    )]));
    let filters = filters(&api);

    let res = warp::test::request().path("/").reply(&filters).await;
    let html = body_text(res.body());
    assert!(html.contains(r#"<span id="totalRecords">1</span>"#));
    assert!(html.contains(r#"<span id="latestReleaseYear">1997</span>"#));
    assert!(html.contains(r#"<span id="electronicCount">1</span>"#));
}

#[test_log::test(tokio::test)]
async fn delete_record_and_reload() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    assert_eq!(1, api.list_count());

    let res = delete_request(&filters, 7, "search=").await;
    assert_eq!(StatusCode::SEE_OTHER, res.status());
    assert_eq!("/", res.headers()["location"]);

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    let html = body_text(res.body());
    assert!(!html.contains(r#"<tr data-serial="7""#));
    assert!(html.contains(r#"<tr data-serial="3""#));
    assert!(html.contains(r#"<span id="totalRecords">1</span>"#));
    assert_eq!(2, api.list_count());
}

#[test_log::test(tokio::test)]
async fn delete_record_preserves_search() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = delete_request(&filters, 7, "search=bj%C3%B6rk").await;
    assert_eq!(StatusCode::SEE_OTHER, res.status());
    assert_eq!("/?search=bj%C3%B6rk", res.headers()["location"]);
}

#[test_log::test(tokio::test)]
async fn failed_delete_keeps_records() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());

    api.fail_delete.store(true, Ordering::SeqCst);
    let res = delete_request(&filters, 7, "search=").await;
    assert_eq!(StatusCode::BAD_GATEWAY, res.status());
    let html = body_text(res.body());
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains("Failed to delete record 7: 404 Not Found: Not found"));
    assert!(html.contains(r#"<tr data-serial="7""#));
    assert!(html.contains(r#"<tr data-serial="3""#));

    // Not refetched
    assert_eq!(1, api.list_count());
}

#[test_log::test(tokio::test)]
async fn failed_initial_load() {
    let api = Arc::new(FakeApi::new(sample_records()));
    api.fail_list.store(true, Ordering::SeqCst);
    let filters = filters(&api);

    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::BAD_GATEWAY, res.status());
    let html = body_text(res.body());
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains("503 Service Unavailable: Backend unavailable"));
    assert!(!html.contains("<tr data-serial="));

    // The next request fetches again
    api.fail_list.store(false, Ordering::SeqCst);
    let res = warp::test::request().path("/").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    assert!(body_text(res.body()).contains(r#"<tr data-serial="7""#));
    assert_eq!(2, api.list_count());
}

#[test_log::test(tokio::test)]
async fn about() {
    let api = Arc::new(FakeApi::default());
    let filters = filters(&api);

    let res = warp::test::request().path("/about").reply(&filters).await;
    assert_eq!(StatusCode::OK, res.status());
    let about: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!("musinv-webapp", about["name"]);
    assert_eq!(env!("CARGO_PKG_VERSION"), about["version"]);
    assert_eq!("http://localhost:8000/", about["api_url"]);
    assert!(about["launched_at"].is_string());
    assert_eq!(0, api.list_count());
}

#[test_log::test(tokio::test)]
async fn unknown_path() {
    let api = Arc::new(FakeApi::default());
    let filters = filters(&api);

    let res = warp::test::request().path("/unknown").reply(&filters).await;
    assert_eq!(StatusCode::NOT_FOUND, res.status());
    let res = warp::test::request()
        .method("POST")
        .path("/unknown")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, res.status());
}

#[test_log::test(tokio::test)]
async fn wrong_method_on_known_path() {
    let api = Arc::new(FakeApi::new(sample_records()));
    let filters = filters(&api);

    let res = warp::test::request()
        .path("/inventory/7/delete")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());
    let res = warp::test::request()
        .method("POST")
        .path("/about")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());
    assert_eq!(2, api.records.lock().len());
    assert_eq!(0, api.list_count());
}
