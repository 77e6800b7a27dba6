// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordering and grouping of records for listings.

use std::cmp::Ordering;

use crate::record::{InventoryRecord, SerialNumber};

fn cmp_within_artist(lhs: &InventoryRecord, rhs: &InventoryRecord) -> Ordering {
    lhs.body
        .year
        .cmp(&rhs.body.year)
        .then_with(|| lhs.body.media.cmp(&rhs.body.media))
        .then_with(|| lhs.body.genre.cmp(&rhs.body.genre))
}

fn cmp_by_artist(lhs: &InventoryRecord, rhs: &InventoryRecord) -> Ordering {
    lhs.body
        .artist
        .cmp(&rhs.body.artist)
        .then_with(|| cmp_within_artist(lhs, rhs))
}

/// Sort records by artist, then by year, media and genre.
///
/// Records with an unknown year precede all others of the same artist.
/// The sort is stable.
pub fn sort_by_artist(records: &mut [InventoryRecord]) {
    records.sort_by(cmp_by_artist);
}

/// Consecutive records of the same artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistGroup<'a> {
    pub artist: &'a str,
    pub records: Vec<&'a InventoryRecord>,
}

/// Group records by artist in alphabetical order.
#[must_use]
pub fn group_by_artist(records: &[InventoryRecord]) -> Vec<ArtistGroup<'_>> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by(|lhs, rhs| cmp_by_artist(lhs, rhs));
    let mut groups: Vec<ArtistGroup<'_>> = Vec::new();
    for record in sorted {
        match groups.last_mut() {
            Some(group) if group.artist == record.body.artist => {
                group.records.push(record);
            }
            _ => groups.push(ArtistGroup {
                artist: &record.body.artist,
                records: vec![record],
            }),
        }
    }
    groups
}

/// All records of the given artist, ordered by year and media.
///
/// The artist name must match exactly.
#[must_use]
pub fn albums_by_artist<'a>(
    records: &'a [InventoryRecord],
    artist: &str,
) -> Vec<&'a InventoryRecord> {
    let mut albums = records
        .iter()
        .filter(|record| record.body.artist == artist)
        .collect::<Vec<_>>();
    albums.sort_by(|lhs, rhs| {
        lhs.body
            .year
            .cmp(&rhs.body.year)
            .then_with(|| lhs.body.media.cmp(&rhs.body.media))
    });
    albums
}

/// The successor of the largest serial number, starting at 1.
#[must_use]
pub fn next_serial_number<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
) -> SerialNumber {
    records
        .into_iter()
        .map(|record| record.serial_number)
        .max()
        .map_or(SerialNumber::new(1), SerialNumber::next)
}
