// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::prelude::*;

mod _core {
    pub(super) use musinv_core::record::*;
}

/// Encodes an unknown release year.
pub const UNKNOWN_YEAR: _core::YearType = 0;

pub type SerialNumber = u64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Record {
    pub artist: String,

    pub media: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub year: _core::YearType,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub genre: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub titles: Vec<String>,
}

impl From<Record> for _core::Record {
    fn from(from: Record) -> Self {
        let Record {
            artist,
            media,
            year,
            genre,
            titles,
        } = from;
        Self {
            artist,
            media,
            year: (year != UNKNOWN_YEAR).then_some(year),
            genre,
            titles,
        }
    }
}

impl From<_core::Record> for Record {
    fn from(from: _core::Record) -> Self {
        let _core::Record {
            artist,
            media,
            year,
            genre,
            titles,
        } = from;
        Self {
            artist,
            media,
            year: year.unwrap_or(UNKNOWN_YEAR),
            genre,
            titles,
        }
    }
}

/// A record as returned by the backend.
///
/// Also used as the body for full replacements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct InventoryRecord {
    pub serial_number: SerialNumber,

    #[serde(flatten)]
    pub body: Record,
}

impl From<InventoryRecord> for _core::InventoryRecord {
    fn from(from: InventoryRecord) -> Self {
        let InventoryRecord {
            serial_number,
            body,
        } = from;
        Self {
            serial_number: serial_number.into(),
            body: body.into(),
        }
    }
}

impl From<_core::InventoryRecord> for InventoryRecord {
    fn from(from: _core::InventoryRecord) -> Self {
        let _core::InventoryRecord {
            serial_number,
            body,
        } = from;
        Self {
            serial_number: serial_number.into(),
            body: body.into(),
        }
    }
}

/// The body for creating a record.
///
/// The backend assigns a serial number if none is provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct NewRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<SerialNumber>,

    #[serde(flatten)]
    pub body: Record,
}

impl NewRecord {
    #[must_use]
    pub fn new(serial_number: Option<_core::SerialNumber>, body: _core::Record) -> Self {
        Self {
            serial_number: serial_number.map(Into::into),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests;
