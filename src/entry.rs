//! Column schemas for each entry variant.
//!
//! The schemas are positional only: a wrong index yields the wrong text,
//! never an error, so each table below must match the sheet exactly.

use std::time::Duration;

use tracker_types::{
    AvailableLength, Category, DateValue, Entry, EraId, EraRef, Name, Quality, ReleaseType,
    Sample, Song, SongKind, SubEraId,
};

use crate::column::{
    MonthTable, cell, parse_category, parse_date, parse_length, parse_samples_used,
    parse_streaming,
};
use crate::name::parse_name;

/// A data row plus what the column parsers need to read it.
pub struct Columns<'a> {
    row: &'a [String],
    months: &'a MonthTable,
}

impl<'a> Columns<'a> {
    pub fn new(row: &'a [String], months: &'a MonthTable) -> Self {
        Self { row, months }
    }

    fn text(&self, index: usize) -> String {
        cell(self.row, index).to_string()
    }

    fn length(&self, index: usize) -> Option<Duration> {
        parse_length(cell(self.row, index))
    }

    fn date(&self, index: usize) -> Option<DateValue> {
        parse_date(cell(self.row, index), self.months)
    }

    fn category<C: Category>(&self, index: usize) -> Option<C> {
        parse_category(cell(self.row, index))
    }

    fn name(&self, index: usize) -> Name {
        parse_name(cell(self.row, index))
    }
}

/// The entry type a tab's data rows produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Base song columns (Music Videos tab)
    Song,
    Unreleased,
    Released,
    Stem,
    Sample,
}

impl EntryKind {
    /// Whether entries of this kind are filed under eras and sub-eras.
    pub fn takes_eras(&self) -> bool {
        !matches!(self, Self::Sample)
    }

    /// Build an entry. `era` / `subera` are ignored for kinds that do not
    /// take eras.
    pub fn build(
        &self,
        cols: &Columns<'_>,
        era: Option<EraId>,
        subera: Option<SubEraId>,
    ) -> Entry {
        match self {
            Self::Song => Entry::Song(build_song(cols, era, subera, SongKind::Plain)),
            Self::Unreleased => Entry::Song(build_unreleased(cols, era, subera)),
            Self::Released => Entry::Song(build_released(cols, era, subera)),
            Self::Stem => Entry::Song(build_stem(cols, era, subera)),
            Self::Sample => Entry::Sample(build_sample(cols)),
        }
    }
}

// Song columns shared by every song-like tab:
//   0 era  1 name  2 notes  3 length  8 link
fn build_song(
    cols: &Columns<'_>,
    era: Option<EraId>,
    subera: Option<SubEraId>,
    kind: SongKind,
) -> Song {
    let era_name = cols.text(0);

    Song {
        era: match era {
            Some(id) => EraRef::Discovered(id),
            None => EraRef::Named(era_name.clone()),
        },
        subera,
        era_name,
        name: cols.name(1),
        notes: cols.text(2),
        length: cols.length(3),
        link: cols.text(8),
        kind,
    }
}

// Unreleased: 4 file date  5 leak date  6 available length  7 quality
fn build_unreleased(cols: &Columns<'_>, era: Option<EraId>, subera: Option<SubEraId>) -> Song {
    let kind = SongKind::Unreleased {
        file_date: cols.date(4),
        leak_date: cols.date(5),
        available_length: cols.category::<AvailableLength>(6),
        quality: cols.category::<Quality>(7),
    };
    build_song(cols, era, subera, kind)
}

// Released: 4 release date  5 type  6 streaming  7 link
fn build_released(cols: &Columns<'_>, era: Option<EraId>, subera: Option<SubEraId>) -> Song {
    let kind = SongKind::Released {
        release_date: cols.date(4),
        release_type: cols.category::<ReleaseType>(5),
        streaming: parse_streaming(cell(cols.row, 6)),
    };
    Song {
        link: cols.text(7),
        ..build_song(cols, era, subera, kind)
    }
}

// Stems: 3 file date  4 leak date  5 length  6 bpm  7 available  8 quality  9 link
fn build_stem(cols: &Columns<'_>, era: Option<EraId>, subera: Option<SubEraId>) -> Song {
    let kind = SongKind::Stem {
        file_date: cols.date(3),
        leak_date: cols.date(4),
        bpm: cols.text(6),
        available_length: cols.category::<AvailableLength>(7),
        quality: cols.category::<Quality>(8),
    };
    Song {
        length: cols.length(5),
        link: cols.text(9),
        ..build_song(cols, era, subera, kind)
    }
}

// Samples: 0 era  1 name  2 samples used  3 notes  4 links
fn build_sample(cols: &Columns<'_>) -> Sample {
    let links = cols.text(4);

    Sample {
        era_name: cols.text(0),
        name: cols.name(1),
        notes: cols.text(3),
        samples: parse_samples_used(cell(cols.row, 2), &links),
        links,
    }
}
