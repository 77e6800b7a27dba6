// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, num::ParseIntError, str::FromStr};

use crate::prelude::*;

/// Unique and stable identifier of a record within the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SerialNumber(u64);

impl SerialNumber {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u64> for SerialNumber {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<SerialNumber> for u64 {
    fn from(from: SerialNumber) -> Self {
        from.value()
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SerialNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

pub type YearType = u16;

pub const MIN_YEAR: YearType = 1000;

pub const MAX_YEAR: YearType = 9999;

/// Genre that is counted separately in the summary.
pub const ELECTRONIC_GENRE: &str = "Electronic";

/// The contents of a record without its key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub artist: String,

    /// Physical format, e.g. "vinyl" or "cd".
    pub media: String,

    /// Release year, if known.
    pub year: Option<YearType>,

    /// Might be empty.
    pub genre: String,

    /// Ordered, might be empty.
    pub titles: Vec<String>,
}

impl Record {
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        self.titles.iter().any(|existing| existing == title)
    }

    /// Append a title unless it is already present.
    ///
    /// Returns `true` if the title has been appended.
    pub fn add_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.has_title(&title) {
            return false;
        }
        self.titles.push(title);
        true
    }

    #[must_use]
    pub fn is_electronic(&self) -> bool {
        self.genre.trim().eq_ignore_ascii_case(ELECTRONIC_GENRE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordInvalidity {
    ArtistEmpty,
    MediaEmpty,
    YearOutOfRange,
    TitleEmpty(usize),
    TitleDuplicate(usize),
}

impl Validate for Record {
    type Invalidity = RecordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            artist,
            media,
            year,
            genre: _,
            titles,
        } = self;
        let context = ValidationContext::new()
            .invalidate_if(artist.trim().is_empty(), Self::Invalidity::ArtistEmpty)
            .invalidate_if(media.trim().is_empty(), Self::Invalidity::MediaEmpty)
            .invalidate_if(
                year.is_some_and(|year| !(MIN_YEAR..=MAX_YEAR).contains(&year)),
                Self::Invalidity::YearOutOfRange,
            );
        titles
            .iter()
            .enumerate()
            .fold(context, |context, (index, title)| {
                context
                    .invalidate_if(
                        title.trim().is_empty(),
                        Self::Invalidity::TitleEmpty(index),
                    )
                    .invalidate_if(
                        titles[..index].contains(title),
                        Self::Invalidity::TitleDuplicate(index),
                    )
            })
            .into()
    }
}

/// A record together with its serial number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub serial_number: SerialNumber,
    pub body: Record,
}

impl InventoryRecord {
    #[must_use]
    pub const fn new(serial_number: SerialNumber, body: Record) -> Self {
        Self {
            serial_number,
            body,
        }
    }
}

impl Validate for InventoryRecord {
    type Invalidity = RecordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        self.body.validate()
    }
}
