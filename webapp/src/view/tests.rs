// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use musinv_core::{Record, SerialNumber};

use super::*;

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

fn ready_state(records: Records) -> QueryState<Records> {
    let mut state = QueryState::default();
    let token = state.start_pending().unwrap();
    assert!(state.finish_pending(token, Ok(records)));
    state
}

fn sample_records() -> Records {
    vec![
        record(7, "Portishead", Some(1994), "Trip-Hop", &["Dummy"]),
        record(3, "Björk", Some(1997), "Electronic", &["Homogenic", "Jóga"]),
        record(5, "Unknown", None, "", &[]),
    ]
}

#[test]
fn rows_in_order_received() {
    let page = Page::new(&ready_state(sample_records()), "");
    let serial_numbers: Vec<_> = page.rows.iter().map(|row| row.serial_number).collect();
    assert_eq!(vec![7, 3, 5], serial_numbers);
    assert!(page.rows.iter().all(|row| row.visible));
    assert!(!page.loading);
    assert!(page.error.is_none());
}

#[test]
fn row_fields() {
    let page = Page::new(&ready_state(sample_records()), "");
    let row = &page.rows[1];
    assert_eq!("Björk", row.artist);
    assert_eq!("1997", row.year);
    assert_eq!("Homogenic, Jóga", row.titles);
    assert_eq!("3\nbjork\ncd\n1997\nelectronic\nhomogenic\njoga", row.search_text);
    assert_eq!("", page.rows[2].year);
}

#[test]
fn search_hides_rows_but_not_stats() {
    let page = Page::new(&ready_state(sample_records()), " BJORK ");
    let visible: Vec<_> = page
        .rows
        .iter()
        .filter(|row| row.visible)
        .map(|row| row.serial_number)
        .collect();
    assert_eq!(vec![3], visible);
    assert_eq!(3, page.rows.len());
    assert_eq!(
        Stats {
            total_records: 3,
            latest_release_year: Some(1997),
            electronic_count: 1,
        },
        page.stats
    );
    assert_eq!(" BJORK ", page.search);
}

#[test]
fn initial_state_is_loading() {
    let mut state = QueryState::<Records>::default();
    assert!(state.start_pending().is_some());
    let page = Page::new(&state, "");
    assert!(page.loading);
    assert!(page.rows.is_empty());
    assert_eq!(Stats::default(), page.stats);
}

#[test]
fn failed_fetch_keeps_previous_rows() {
    let mut state = ready_state(sample_records());
    assert!(state.invalidate());
    let token = state.start_pending().unwrap();
    assert!(state.finish_pending(token, Err("backend unavailable".to_owned())));
    let page = Page::new(&state, "");
    assert_eq!(3, page.rows.len());
    assert_eq!(Some("backend unavailable"), page.error.as_deref());
}

#[test]
fn render_page() {
    let renderer = Renderer::new().unwrap();
    let page = Page::new(&ready_state(sample_records()), "dummy");
    let html = renderer.render_page(&page).unwrap();
    assert!(html.contains(r#"<span id="totalRecords">3</span>"#));
    assert!(html.contains(r#"<span id="latestReleaseYear">1997</span>"#));
    assert!(html.contains(r#"<span id="electronicCount">1</span>"#));
    assert!(html.contains(r#"value="dummy""#));
    assert!(html.contains(r#"<tr data-serial="7" data-search="#));
    assert!(html.contains(r#"<tr data-serial="3" hidden data-search="#));
    assert!(html.contains("<td>Homogenic, Jóga</td>"));
    assert!(!html.contains(r#"role="alert""#));
}

#[test]
fn render_empty_page() {
    let renderer = Renderer::new().unwrap();
    let page = Page::new(&ready_state(vec![]), "");
    let html = renderer.render_page(&page).unwrap();
    assert!(html.contains(r#"<span id="totalRecords">0</span>"#));
    assert!(html.contains(r#"<span id="latestReleaseYear">-</span>"#));
    assert!(html.contains(r#"<span id="electronicCount">0</span>"#));
    assert!(html.contains(r#"<table id="inventory">"#));
    assert!(!html.contains("<tr data-serial="));
}

#[test]
fn render_escapes_text() {
    let renderer = Renderer::new().unwrap();
    let page = Page::new(
        &ready_state(vec![record(1, "<script>", None, "", &[])]),
        "",
    )
    .with_error("<b>failed</b>".to_owned());
    let html = renderer.render_page(&page).unwrap();
    assert!(!html.contains("<td><script></td>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&lt;b&gt;failed&lt;&#x2F;b&gt;"));
    assert!(html.contains(r#"role="alert""#));
}
