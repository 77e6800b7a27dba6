// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use unicode_normalization::{UnicodeNormalization as _, char::is_combining_mark};

use crate::record::InventoryRecord;

/// Separates the visible fields in [`InventoryRecord::search_text()`].
///
/// Search input controls strip line breaks from their value, i.e. a needle
/// never spans multiple fields.
pub const FIELD_SEPARATOR: char = '\n';

/// Fold text for case and diacritics insensitive comparison.
///
/// Applies the Unicode compatibility decomposition, removes all
/// combining marks and converts the remaining characters to lowercase.
/// Both "Björk" and "BJORK" are folded into "bjork".
#[must_use]
pub fn fold_search_text(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Free text filter over all visible fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    folded_needle: String,
}

impl SearchFilter {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            folded_needle: fold_search_text(text.trim()),
        }
    }

    /// An empty filter matches all records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folded_needle.is_empty()
    }

    #[must_use]
    pub fn folded_needle(&self) -> &str {
        &self.folded_needle
    }

    #[must_use]
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        if self.is_empty() {
            return true;
        }
        record
            .visible_fields()
            .any(|field| fold_search_text(&field).contains(&self.folded_needle))
    }

    /// Select all matching records, preserving their order.
    pub fn filter<'a>(
        &'a self,
        records: impl IntoIterator<Item = &'a InventoryRecord> + 'a,
    ) -> impl Iterator<Item = &'a InventoryRecord> + 'a {
        records.into_iter().filter(|record| self.matches(record))
    }
}

impl InventoryRecord {
    /// The textual representation of all fields in display order.
    ///
    /// An unknown year is omitted.
    pub fn visible_fields(&self) -> impl Iterator<Item = String> + '_ {
        let Self {
            serial_number,
            body,
        } = self;
        [
            Some(serial_number.to_string()),
            Some(body.artist.clone()),
            Some(body.media.clone()),
            body.year.map(|year| year.to_string()),
            Some(body.genre.clone()),
        ]
        .into_iter()
        .flatten()
        .chain(body.titles.iter().cloned())
    }

    /// All folded visible fields, joined by [`FIELD_SEPARATOR`].
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut search_text = String::new();
        for field in self.visible_fields() {
            if !search_text.is_empty() {
                search_text.push(FIELD_SEPARATOR);
            }
            search_text.push_str(&fold_search_text(&field));
        }
        search_text
    }

    #[must_use]
    pub fn matches_search(&self, text: &str) -> bool {
        SearchFilter::new(text).matches(self)
    }
}

#[cfg(test)]
mod tests;
