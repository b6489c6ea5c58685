//! Row classification.
//!
//! A tab is an undifferentiated list of rows. Each row is classified by its
//! shape alone (cell count, a few literal cells); the only context carried
//! between rows is which era and sub-era are current. One forward pass, no
//! lookahead, no backtracking.

use log::{debug, info, trace};
use tracker_types::{EraId, SubEraId, Tab, TabKind};

use crate::column::{MonthTable, Row, cell};
use crate::entry::{Columns, EntryKind};
use crate::era::{SubEraKind, build_era};

/// Leading cells that mark the end of the data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndSentinel(Vec<String>);

impl EndSentinel {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(cells.into_iter().map(Into::into).collect())
    }

    /// The legend row under the data: `Links | | Quality`.
    pub fn links_quality() -> Self {
        Self::new(["Links", "", "Quality"])
    }

    pub fn matches(&self, row: &[String]) -> bool {
        self.0
            .iter()
            .enumerate()
            .all(|(i, expected)| cell(row, i) == expected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabConfig {
    pub kind: TabKind,
    pub entry: EntryKind,
    /// Exact cell count of an era header row; `None` for tabs without eras.
    pub era_cells: Option<usize>,
    /// Exact cell count of a sub-era row and the variant it builds.
    pub subera: Option<(usize, SubEraKind)>,
    pub end: Option<EndSentinel>,
}

impl TabConfig {
    pub fn unreleased() -> Self {
        Self {
            kind: TabKind::Unreleased,
            entry: EntryKind::Unreleased,
            era_cells: Some(6),
            subera: Some((3, SubEraKind::Basic)),
            end: Some(EndSentinel::links_quality()),
        }
    }

    pub fn released() -> Self {
        Self {
            kind: TabKind::Released,
            entry: EntryKind::Released,
            ..Self::unreleased()
        }
    }

    pub fn stems() -> Self {
        Self {
            kind: TabKind::Stems,
            entry: EntryKind::Stem,
            subera: Some((2, SubEraKind::Stem)),
            ..Self::unreleased()
        }
    }

    pub fn music_videos() -> Self {
        Self {
            kind: TabKind::MusicVideos,
            entry: EntryKind::Song,
            subera: Some((2, SubEraKind::MusicVideo)),
            ..Self::unreleased()
        }
    }

    /// The Samples tab tracks no eras.
    pub fn samples() -> Self {
        Self {
            kind: TabKind::Samples,
            entry: EntryKind::Sample,
            era_cells: None,
            subera: None,
            end: Some(EndSentinel::links_quality()),
        }
    }

    pub fn for_kind(kind: TabKind) -> Self {
        match kind {
            TabKind::Unreleased => Self::unreleased(),
            TabKind::Released => Self::released(),
            TabKind::Stems => Self::stems(),
            TabKind::Samples => Self::samples(),
            TabKind::MusicVideos => Self::music_videos(),
        }
    }

    /// First matching rule wins: skip, era, sub-era, end, entry.
    pub fn classify(&self, index: usize, row: &[String]) -> RowClass {
        if is_skipped(index, row) {
            return RowClass::Skip;
        }
        if self.era_cells == Some(row.len()) {
            return RowClass::Era;
        }
        if let Some((cells, kind)) = self.subera {
            if cells == row.len() {
                return RowClass::SubEra(kind);
            }
        }
        if self.end.as_ref().is_some_and(|end| end.matches(row)) {
            return RowClass::End;
        }
        RowClass::Entry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    Skip,
    Era,
    SubEra(SubEraKind),
    End,
    Entry,
}

/// Header row, a row with a single populated cell, or an empty first cell.
fn is_skipped(index: usize, row: &[String]) -> bool {
    index == 0 || row.iter().filter(|c| !c.is_empty()).count() == 1 || cell(row, 0).is_empty()
}

/// Era context carried from one row to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub current_era: Option<EraId>,
    pub current_subera: Option<SubEraId>,
}

impl ScanState {
    /// A new era always clears the current sub-era.
    pub fn enter_era(self, era: EraId) -> Self {
        Self {
            current_era: Some(era),
            current_subera: None,
        }
    }

    pub fn enter_subera(self, subera: SubEraId) -> Self {
        Self {
            current_subera: Some(subera),
            ..self
        }
    }
}

/// Scan one tab's rows into entries, eras and sub-eras.
pub fn scan(range: &[Row], config: &TabConfig, months: &MonthTable) -> Tab {
    let mut tab = Tab::new(config.kind);
    let mut state = ScanState::default();

    for (index, row) in range.iter().enumerate() {
        match config.classify(index, row) {
            RowClass::Skip => {
                trace!("row {index}: skipped");
            }
            RowClass::Era => {
                let era = build_era(row);
                debug!("row {index}: era {:?}", era.main_name);
                state = state.enter_era(EraId(tab.eras.len()));
                tab.eras.push(era);
            }
            RowClass::SubEra(kind) => {
                let subera = kind.build(row);
                debug!("row {index}: sub-era {:?}", subera.name());
                state = state.enter_subera(SubEraId(tab.suberas.len()));
                tab.suberas.push(subera);
            }
            RowClass::End => {
                debug!("row {index}: end of data, {} row(s) left unread", range.len() - index - 1);
                break;
            }
            RowClass::Entry => {
                let (era, subera) = if config.entry.takes_eras() {
                    (state.current_era, state.current_subera)
                } else {
                    (None, None)
                };
                let entry = config.entry.build(&Columns::new(row, months), era, subera);
                tab.entries.push(entry);
            }
        }
    }

    info!(
        "{}: {} entries, {} eras, {} sub-eras",
        config.kind.slug(),
        tab.entries.len(),
        tab.eras.len(),
        tab.suberas.len()
    );

    tab
}
