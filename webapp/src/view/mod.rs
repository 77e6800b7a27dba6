// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Server-side rendering of the inventory page.

use serde::Serialize;
use tera::{Context, Tera};

use musinv_client::{QueryState, inventory::Records};
use musinv_core::{InventoryRecord, SearchFilter, Summary, YearType};

const INDEX_TEMPLATE_NAME: &str = "index.html";

const INDEX_TEMPLATE: &str = include_str!("../../res/index.html");

const TITLES_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Stats {
    pub(crate) total_records: usize,
    pub(crate) latest_release_year: Option<YearType>,
    pub(crate) electronic_count: usize,
}

impl From<Summary> for Stats {
    fn from(from: Summary) -> Self {
        let Summary {
            total_records,
            latest_release_year,
            electronic_count,
        } = from;
        Self {
            total_records,
            latest_release_year,
            electronic_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Row {
    pub(crate) serial_number: u64,
    pub(crate) artist: String,
    pub(crate) media: String,

    /// Empty if unknown.
    pub(crate) year: String,

    pub(crate) genre: String,
    pub(crate) titles: String,

    /// Folded text of all visible fields for filtering in the browser.
    pub(crate) search_text: String,

    /// Hidden rows are rendered but not displayed.
    pub(crate) visible: bool,
}

impl Row {
    fn new(record: &InventoryRecord, filter: &SearchFilter) -> Self {
        let InventoryRecord {
            serial_number,
            body,
        } = record;
        Self {
            serial_number: serial_number.value(),
            artist: body.artist.clone(),
            media: body.media.clone(),
            year: body.year.map(|year| year.to_string()).unwrap_or_default(),
            genre: body.genre.clone(),
            titles: body.titles.join(TITLES_SEPARATOR),
            search_text: record.search_text(),
            visible: filter.matches(record),
        }
    }
}

/// Everything needed for rendering the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Page {
    pub(crate) search: String,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) stats: Stats,
    pub(crate) rows: Vec<Row>,
}

impl Page {
    /// Rows are rendered in the order received from the backend.
    ///
    /// The stats always cover all records, independent of the search text.
    pub(crate) fn new(state: &QueryState<Records>, search: &str) -> Self {
        let filter = SearchFilter::new(search);
        let records = state.last_value().map(Vec::as_slice).unwrap_or_default();
        let rows = records
            .iter()
            .map(|record| Row::new(record, &filter))
            .collect();
        Self {
            search: search.to_owned(),
            loading: state.is_loading(),
            error: state.err_msg().map(ToOwned::to_owned),
            stats: Summary::of(records).into(),
            rows,
        }
    }

    #[must_use]
    pub(crate) fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

#[derive(Debug)]
pub(crate) struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub(crate) fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![INDEX_TEMPLATE_NAME]);
        tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    pub(crate) fn render_page(&self, page: &Page) -> anyhow::Result<String> {
        let context = Context::from_serialize(page)?;
        let html = self.tera.render(INDEX_TEMPLATE_NAME, &context)?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests;
