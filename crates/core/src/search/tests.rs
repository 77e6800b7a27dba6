// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;
use crate::record::{Record, SerialNumber};

fn bjork() -> InventoryRecord {
    InventoryRecord::new(
        SerialNumber::new(7),
        Record {
            artist: "Björk".to_owned(),
            media: "vinyl".to_owned(),
            year: Some(1997),
            genre: "Electronic".to_owned(),
            titles: vec!["Homogenic".to_owned(), "Jóga".to_owned()],
        },
    )
}

fn kraftwerk() -> InventoryRecord {
    InventoryRecord::new(
        SerialNumber::new(12),
        Record {
            artist: "Kraftwerk".to_owned(),
            media: "cd".to_owned(),
            year: None,
            genre: String::new(),
            titles: vec!["Trans-Europa Express".to_owned()],
        },
    )
}

#[test]
fn fold_diacritics_and_case() {
    assert_eq!("bjork", fold_search_text("Björk"));
    assert_eq!("bjork", fold_search_text("BJORK"));
    assert_eq!("sigur ros", fold_search_text("Sigur Rós"));
    // Compatibility decomposition
    assert_eq!("fi", fold_search_text("\u{fb01}"));
    assert_eq!("", fold_search_text(""));
}

#[test]
fn empty_filter_matches_everything() {
    let filter = SearchFilter::new("  ");
    assert!(filter.is_empty());
    assert!(filter.matches(&bjork()));
    assert!(filter.matches(&kraftwerk()));
}

#[test]
fn match_any_visible_field() {
    let record = bjork();
    assert!(record.matches_search("Bjork"));
    assert!(record.matches_search("björk"));
    assert!(record.matches_search("VINYL"));
    assert!(record.matches_search("1997"));
    assert!(record.matches_search("electro"));
    assert!(record.matches_search("joga"));
    assert!(record.matches_search("7"));
    assert!(!record.matches_search("Kraftwerk"));
    assert!(!record.matches_search("cd"));
}

#[test]
fn needle_does_not_span_fields() {
    let record = bjork();
    assert!(!record.matches_search("homogenicjoga"));
    assert!(!record.matches_search("vinyl1997"));
}

#[test]
fn unknown_year_is_not_visible() {
    let record = kraftwerk();
    assert_eq!(
        vec!["12", "Kraftwerk", "cd", "", "Trans-Europa Express"],
        record.visible_fields().collect::<Vec<_>>()
    );
    assert!(!record.matches_search("0"));
}

#[test]
fn search_text_contains_folded_fields() {
    assert_eq!(
        "7\nbjork\nvinyl\n1997\nelectronic\nhomogenic\njoga",
        bjork().search_text()
    );
}

#[test]
fn filter_preserves_order() {
    let records = vec![kraftwerk(), bjork(), kraftwerk()];
    let filter = SearchFilter::new("kraft");
    let serials = filter
        .filter(&records)
        .map(|record| record.serial_number)
        .collect::<Vec<_>>();
    assert_eq!(vec![SerialNumber::new(12), SerialNumber::new(12)], serials);
}
