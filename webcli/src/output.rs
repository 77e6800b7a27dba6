// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Plain text output.

use musinv_core::{
    AddTitlePlan, InventoryRecord, Record, Summary, YearType, sorting::group_by_artist,
};

const UNKNOWN_YEAR_TEXT: &str = "-";

const TITLES_SEPARATOR: &str = "; ";

fn year_text(year: Option<YearType>) -> String {
    year.map_or_else(|| UNKNOWN_YEAR_TEXT.to_owned(), |year| year.to_string())
}

/// All fields in display order, separated by tabs.
pub(crate) fn record_line(record: &InventoryRecord) -> String {
    let InventoryRecord {
        serial_number,
        body:
            Record {
                artist,
                media,
                year,
                genre,
                titles,
            },
    } = record;
    format!(
        "{serial_number}\t{artist}\t{media}\t{year}\t{genre}\t{titles}",
        year = year_text(*year),
        titles = titles.join(TITLES_SEPARATOR),
    )
}

/// A record without the artist.
fn album_line(record: &InventoryRecord) -> String {
    let InventoryRecord {
        serial_number,
        body,
    } = record;
    format!(
        "#{serial_number} {media} {genre}: {titles}",
        media = body.media,
        genre = body.genre,
        titles = body.titles.join(TITLES_SEPARATOR),
    )
}

pub(crate) fn listing(records: &[InventoryRecord]) -> String {
    records
        .iter()
        .map(record_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Records grouped by artist.
pub(crate) fn sorted_listing(records: &[InventoryRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len());
    for group in group_by_artist(records) {
        lines.push(group.artist.to_owned());
        lines.extend(group.records.into_iter().map(|record| {
            format!(
                "  {year} {album}",
                year = year_text(record.body.year),
                album = album_line(record)
            )
        }));
    }
    lines.join("\n")
}

/// Albums of a single artist, grouped by year.
pub(crate) fn albums(artist: &str, albums: &[&InventoryRecord]) -> String {
    if albums.is_empty() {
        return format!("No records of {artist}");
    }
    let mut lines = vec![artist.to_owned()];
    let mut last_year = None;
    for record in albums {
        let year = Some(record.body.year);
        if last_year != year {
            lines.push(format!("  {}:", year_text(record.body.year)));
            last_year = year;
        }
        lines.push(format!("    {}", album_line(record)));
    }
    lines.join("\n")
}

pub(crate) fn stats(summary: &Summary) -> String {
    let Summary {
        total_records,
        latest_release_year,
        electronic_count,
    } = summary;
    format!(
        "Total records: {total_records}\nLatest release year: {latest_release_year}\nElectronic: \
         {electronic_count}",
        latest_release_year = year_text(*latest_release_year),
    )
}

pub(crate) fn add_title_plan(plan: &AddTitlePlan) -> String {
    match plan {
        AddTitlePlan::AppendTitle { updated } => {
            format!("Append title to record\n{}", record_line(updated))
        }
        AddTitlePlan::Unchanged { serial_number } => {
            format!("Record {serial_number} already contains the title")
        }
        AddTitlePlan::CreateRecord {
            created,
            reassigned_from,
        } => {
            let mut text = format!("Create record\n{}", record_line(created));
            if let Some(reassigned_from) = reassigned_from {
                text.push_str(&format!(
                    "\nSerial number {reassigned_from} is already taken and has been replaced \
                     by {serial_number}",
                    serial_number = created.serial_number,
                ));
            }
            text
        }
    }
}
