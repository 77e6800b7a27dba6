// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::json;

use super::*;

#[test]
fn deserialize_inventory_record() {
    let json = json!({
        "serial_number": 1,
        "artist": "Björk",
        "media": "cd",
        "year": 1997,
        "genre": "Electronic",
        "titles": ["Homogenic", "Jóga"],
    });
    let record: InventoryRecord = serde_json::from_value(json).unwrap();
    let record = _core::InventoryRecord::from(record);
    assert_eq!(
        _core::InventoryRecord::new(
            _core::SerialNumber::new(1),
            _core::Record {
                artist: "Björk".to_owned(),
                media: "cd".to_owned(),
                year: Some(1997),
                genre: "Electronic".to_owned(),
                titles: vec!["Homogenic".to_owned(), "Jóga".to_owned()],
            }
        ),
        record
    );
}

#[test]
fn deserialize_missing_and_null_fields_as_defaults() {
    let missing = json!({
        "serial_number": 2,
        "artist": "Kraftwerk",
        "media": "vinyl",
    });
    let null = json!({
        "serial_number": 2,
        "artist": "Kraftwerk",
        "media": "vinyl",
        "year": null,
        "genre": null,
        "titles": null,
    });
    let zero = json!({
        "serial_number": 2,
        "artist": "Kraftwerk",
        "media": "vinyl",
        "year": 0,
        "genre": "",
        "titles": [],
    });
    let expected = _core::InventoryRecord::new(
        _core::SerialNumber::new(2),
        _core::Record {
            artist: "Kraftwerk".to_owned(),
            media: "vinyl".to_owned(),
            year: None,
            genre: String::new(),
            titles: vec![],
        },
    );
    for json in [missing, null, zero] {
        let record: InventoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(expected, _core::InventoryRecord::from(record));
    }
}

#[test]
fn ignore_unknown_fields() {
    let json = json!({
        "serial_number": 3,
        "artist": "Portishead",
        "media": "cd",
        "label": "Go! Beat",
    });
    assert!(serde_json::from_value::<InventoryRecord>(json).is_ok());
}

#[test]
fn reject_missing_serial_number() {
    let json = json!({
        "artist": "Portishead",
        "media": "cd",
    });
    assert!(serde_json::from_value::<InventoryRecord>(json).is_err());
}

#[test]
fn serialize_unknown_year_as_zero() {
    let record = InventoryRecord::from(_core::InventoryRecord::new(
        _core::SerialNumber::new(4),
        _core::Record {
            artist: "Massive Attack".to_owned(),
            media: "cd".to_owned(),
            year: None,
            genre: String::new(),
            titles: vec!["Mezzanine".to_owned()],
        },
    ));
    assert_eq!(
        json!({
            "serial_number": 4,
            "artist": "Massive Attack",
            "media": "cd",
            "year": 0,
            "genre": "",
            "titles": ["Mezzanine"],
        }),
        serde_json::to_value(record).unwrap()
    );
}

#[test]
fn serialize_new_record_without_serial_number() {
    let body = _core::Record {
        artist: "Massive Attack".to_owned(),
        media: "vinyl".to_owned(),
        year: Some(1998),
        genre: "Trip Hop".to_owned(),
        titles: vec![],
    };
    assert_eq!(
        json!({
            "artist": "Massive Attack",
            "media": "vinyl",
            "year": 1998,
            "genre": "Trip Hop",
            "titles": [],
        }),
        serde_json::to_value(NewRecord::new(None, body.clone())).unwrap()
    );
    assert_eq!(
        json!({
            "serial_number": 9,
            "artist": "Massive Attack",
            "media": "vinyl",
            "year": 1998,
            "genre": "Trip Hop",
            "titles": [],
        }),
        serde_json::to_value(NewRecord::new(Some(_core::SerialNumber::new(9)), body)).unwrap()
    );
}
