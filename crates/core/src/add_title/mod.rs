// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Planning how a single title is added to the inventory.

use thiserror::Error;

use crate::{
    record::{InventoryRecord, Record, SerialNumber, YearType},
    sorting::next_serial_number,
};

pub const DEFAULT_MEDIA: &str = "cd";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTitle {
    pub artist: String,
    pub title: String,
    pub media: String,
    pub year: Option<YearType>,
    pub genre: String,

    /// Requested serial number for a new record.
    ///
    /// The next free serial number is assigned if `None`.
    pub serial_number: Option<SerialNumber>,

    /// Append the title to an existing record of the artist
    /// with the same media, year and genre.
    pub merge: bool,

    /// Assign the next free serial number if the requested one
    /// is already taken instead of failing.
    pub resolve_serial_conflict: bool,
}

impl AddTitle {
    #[must_use]
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            media: DEFAULT_MEDIA.to_owned(),
            year: None,
            genre: String::new(),
            serial_number: None,
            merge: false,
            resolve_serial_conflict: true,
        }
    }

    fn matches_album(&self, record: &Record) -> bool {
        let Self {
            artist,
            media,
            year,
            genre,
            ..
        } = self;
        record.artist == *artist
            && record.media == *media
            && record.year == *year
            && record.genre == *genre
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTitlePlan {
    /// Replace an existing record by this updated version with
    /// the title appended.
    AppendTitle { updated: InventoryRecord },

    /// The matching record already contains the title.
    Unchanged { serial_number: SerialNumber },

    CreateRecord {
        created: InventoryRecord,

        /// The requested serial number that has been replaced
        /// due to a conflict.
        reassigned_from: Option<SerialNumber>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("serial number {serial_number} is already taken")]
pub struct SerialConflict {
    pub serial_number: SerialNumber,
}

pub fn plan_add_title(
    records: &[InventoryRecord],
    add_title: AddTitle,
) -> Result<AddTitlePlan, SerialConflict> {
    if add_title.merge {
        if let Some(existing) = records
            .iter()
            .find(|record| add_title.matches_album(&record.body))
        {
            if existing.body.has_title(&add_title.title) {
                return Ok(AddTitlePlan::Unchanged {
                    serial_number: existing.serial_number,
                });
            }
            let mut updated = existing.clone();
            updated.body.titles.push(add_title.title);
            return Ok(AddTitlePlan::AppendTitle { updated });
        }
    }
    let (serial_number, reassigned_from) = match add_title.serial_number {
        None => (next_serial_number(records), None),
        Some(requested) => {
            if records
                .iter()
                .any(|record| record.serial_number == requested)
            {
                if !add_title.resolve_serial_conflict {
                    return Err(SerialConflict {
                        serial_number: requested,
                    });
                }
                (next_serial_number(records), Some(requested))
            } else {
                (requested, None)
            }
        }
    };
    let AddTitle {
        artist,
        title,
        media,
        year,
        genre,
        ..
    } = add_title;
    let created = InventoryRecord::new(
        serial_number,
        Record {
            artist,
            media,
            year,
            genre,
            titles: vec![title],
        },
    );
    Ok(AddTitlePlan::CreateRecord {
        created,
        reassigned_from,
    })
}
