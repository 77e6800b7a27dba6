// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::record::{InventoryRecord, YearType};

/// Statistics about a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_records: usize,

    /// The maximum of all known release years.
    pub latest_release_year: Option<YearType>,

    /// Number of records with genre "Electronic".
    pub electronic_count: usize,
}

impl Summary {
    #[must_use]
    pub fn of<'a>(records: impl IntoIterator<Item = &'a InventoryRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut summary, record| {
            summary.add_record(record);
            summary
        })
    }

    fn add_record(&mut self, record: &InventoryRecord) {
        let Self {
            total_records,
            latest_release_year,
            electronic_count,
        } = self;
        *total_records += 1;
        *latest_release_year = (*latest_release_year).max(record.body.year);
        if record.body.is_electronic() {
            *electronic_count += 1;
        }
    }
}
