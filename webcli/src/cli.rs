// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand, value_parser};
use url::Url;

use musinv_client::webapi::DEFAULT_API_URL;
use musinv_core::{AddTitle, Record, SerialNumber, YearType, add_title::DEFAULT_MEDIA};

pub(crate) const API_URL_ENV: &str = "INVENTORY_API_URL";

const API_URL_ARG: &str = "api-url";

const SEARCH_ARG: &str = "search";

const SORTED_ARG: &str = "sorted";

const NAME_ARG: &str = "name";

const SERIAL_ARG: &str = "serial";

const ARTIST_ARG: &str = "artist";

const TITLE_ARG: &str = "title";

const MEDIA_ARG: &str = "media";

const YEAR_ARG: &str = "year";

const GENRE_ARG: &str = "genre";

const MERGE_ARG: &str = "merge";

const NO_AUTO_RESOLVE_ARG: &str = "no-auto-resolve";

const DRY_RUN_ARG: &str = "dry-run";

/// Year 0 denotes an unknown year.
const UNKNOWN_YEAR: YearType = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordPatch {
    pub(crate) artist: Option<String>,
    pub(crate) media: Option<String>,
    pub(crate) year: Option<Option<YearType>>,
    pub(crate) genre: Option<String>,

    /// Replaces all titles if present.
    pub(crate) titles: Option<Vec<String>>,
}

impl RecordPatch {
    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply_on(self, record: &mut Record) {
        let Self {
            artist,
            media,
            year,
            genre,
            titles,
        } = self;
        if let Some(artist) = artist {
            record.artist = artist;
        }
        if let Some(media) = media {
            record.media = media;
        }
        if let Some(year) = year {
            record.year = year;
        }
        if let Some(genre) = genre {
            record.genre = genre;
        }
        if let Some(titles) = titles {
            record.titles = titles;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    List {
        search: Option<String>,
        sorted: bool,
    },
    Artist {
        name: String,
    },
    Add {
        add_title: AddTitle,
        dry_run: bool,
    },
    Update {
        serial_number: SerialNumber,
        patch: RecordPatch,
    },
    Delete {
        serial_number: SerialNumber,
    },
    Stats,
}

fn serial_arg() -> Arg {
    Arg::new(SERIAL_ARG)
        .help("The serial number of the record")
        .value_parser(value_parser!(u64))
        .required(true)
}

fn year_arg() -> Arg {
    Arg::new(YEAR_ARG)
        .long(YEAR_ARG)
        .help("The release year, 0 if unknown")
        .value_parser(value_parser!(u16))
}

fn year_from_arg(year: YearType) -> Option<YearType> {
    (year != UNKNOWN_YEAR).then_some(year)
}

pub(crate) fn build_command() -> ClapCommand {
    ClapCommand::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(API_URL_ARG)
                .long(API_URL_ARG)
                .help(format!(
                    "The base URL of the backend (env: {API_URL_ENV}, default: {DEFAULT_API_URL})"
                ))
                .num_args(1),
        )
        .subcommand(
            ClapCommand::new("list")
                .about("Lists all records")
                .arg(
                    Arg::new(SEARCH_ARG)
                        .long(SEARCH_ARG)
                        .help("Only list records that contain the text")
                        .num_args(1),
                )
                .arg(
                    Arg::new(SORTED_ARG)
                        .long(SORTED_ARG)
                        .help("Group records by artist")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("artist")
                .about("Lists all records of an artist by year")
                .arg(
                    Arg::new(NAME_ARG)
                        .help("The name of the artist")
                        .required(true),
                ),
        )
        .subcommand(
            ClapCommand::new("add")
                .about("Adds a title of an artist")
                .arg(Arg::new(ARTIST_ARG).long(ARTIST_ARG).required(true))
                .arg(Arg::new(TITLE_ARG).long(TITLE_ARG).required(true))
                .arg(
                    Arg::new(MEDIA_ARG)
                        .long(MEDIA_ARG)
                        .default_value(DEFAULT_MEDIA),
                )
                .arg(year_arg())
                .arg(Arg::new(GENRE_ARG).long(GENRE_ARG).default_value(""))
                .arg(
                    Arg::new(SERIAL_ARG)
                        .long(SERIAL_ARG)
                        .help("The serial number of a new record")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new(MERGE_ARG)
                        .long(MERGE_ARG)
                        .help(
                            "Append the title to an existing record with the same media, year \
                             and genre",
                        )
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new(NO_AUTO_RESOLVE_ARG)
                        .long(NO_AUTO_RESOLVE_ARG)
                        .help("Fail if the serial number is already taken")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new(DRY_RUN_ARG)
                        .long(DRY_RUN_ARG)
                        .help("Only print what would be done")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("update")
                .about("Modifies fields of an existing record")
                .arg(serial_arg())
                .arg(Arg::new(ARTIST_ARG).long(ARTIST_ARG))
                .arg(Arg::new(MEDIA_ARG).long(MEDIA_ARG))
                .arg(year_arg())
                .arg(Arg::new(GENRE_ARG).long(GENRE_ARG))
                .arg(
                    Arg::new(TITLE_ARG)
                        .long(TITLE_ARG)
                        .help("Replaces all titles, repeat for multiple titles")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            ClapCommand::new("delete")
                .about("Deletes a record")
                .arg(serial_arg()),
        )
        .subcommand(ClapCommand::new("stats").about("Summarizes all records"))
}

/// The command-line argument takes precedence over the environment.
pub(crate) fn api_url(matches: &ArgMatches, api_url_from_env: Option<&str>) -> anyhow::Result<Url> {
    let api_url = matches
        .get_one::<String>(API_URL_ARG)
        .map(String::as_str)
        .or(api_url_from_env)
        .unwrap_or(DEFAULT_API_URL);
    Url::parse(api_url).map_err(|err| anyhow::anyhow!("invalid {API_URL_ARG} \"{api_url}\": {err}"))
}

fn get_string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn get_serial_number(matches: &ArgMatches) -> Option<SerialNumber> {
    matches
        .get_one::<u64>(SERIAL_ARG)
        .copied()
        .map(SerialNumber::new)
}

/// Returns `None` if no subcommand has been given.
pub(crate) fn parse_command(matches: &ArgMatches) -> Option<Command> {
    let command = match matches.subcommand()? {
        ("list", matches) => Command::List {
            search: get_string(matches, SEARCH_ARG),
            sorted: matches.get_flag(SORTED_ARG),
        },
        ("artist", matches) => Command::Artist {
            name: get_string(matches, NAME_ARG)?,
        },
        ("add", matches) => {
            let mut add_title = AddTitle::new(
                get_string(matches, ARTIST_ARG)?,
                get_string(matches, TITLE_ARG)?,
            );
            if let Some(media) = get_string(matches, MEDIA_ARG) {
                add_title.media = media;
            }
            add_title.year = matches
                .get_one::<u16>(YEAR_ARG)
                .copied()
                .and_then(year_from_arg);
            add_title.genre = get_string(matches, GENRE_ARG).unwrap_or_default();
            add_title.serial_number = get_serial_number(matches);
            add_title.merge = matches.get_flag(MERGE_ARG);
            add_title.resolve_serial_conflict = !matches.get_flag(NO_AUTO_RESOLVE_ARG);
            Command::Add {
                add_title,
                dry_run: matches.get_flag(DRY_RUN_ARG),
            }
        }
        ("update", matches) => Command::Update {
            serial_number: get_serial_number(matches)?,
            patch: RecordPatch {
                artist: get_string(matches, ARTIST_ARG),
                media: get_string(matches, MEDIA_ARG),
                year: matches.get_one::<u16>(YEAR_ARG).copied().map(year_from_arg),
                genre: get_string(matches, GENRE_ARG),
                titles: matches
                    .get_many::<String>(TITLE_ARG)
                    .map(|titles| titles.cloned().collect()),
            },
        },
        ("delete", matches) => Command::Delete {
            serial_number: get_serial_number(matches)?,
        },
        ("stats", _) => Command::Stats,
        (subcommand, _) => {
            unreachable!("Unknown subcommand {subcommand}");
        }
    };
    Some(command)
}
