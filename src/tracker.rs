use std::collections::HashMap;

use tracker_types::{Tab, TabKind};

use crate::column::Range;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::tab::{TabConfig, scan};

/// Source of raw cell matrices, one per sheet tab.
pub trait RawValuesFetcher {
    fn get_raw_values(&self, tab_name: &str) -> Result<Range, TrackerError>;
}

/// Tabs held in memory, keyed by sheet tab name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    tabs: HashMap<String, Range>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, tab_name: impl Into<String>, range: Range) -> Self {
        self.insert(tab_name, range);
        self
    }

    pub fn insert(&mut self, tab_name: impl Into<String>, range: Range) {
        self.tabs.insert(tab_name.into(), range);
    }
}

impl RawValuesFetcher for InMemoryFetcher {
    fn get_raw_values(&self, tab_name: &str) -> Result<Range, TrackerError> {
        self.tabs
            .get(tab_name)
            .cloned()
            .ok_or_else(|| TrackerError::TabNotFound(tab_name.to_string()))
    }
}

/// Fetches tabs by their configured names and scans them.
pub struct Tracker<F> {
    fetcher: F,
    config: TrackerConfig,
}

impl<F: RawValuesFetcher> Tracker<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, TrackerConfig::default())
    }

    pub fn with_config(fetcher: F, config: TrackerConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn tab(&self, kind: TabKind) -> Result<Tab, TrackerError> {
        let tab_name = self.config.tabs.name_of(kind);
        log::debug!("Fetching tab {tab_name:?}");
        let range = self.fetcher.get_raw_values(tab_name)?;
        Ok(scan(&range, &TabConfig::for_kind(kind), &self.config.dates.months))
    }

    pub fn unreleased(&self) -> Result<Tab, TrackerError> {
        self.tab(TabKind::Unreleased)
    }

    pub fn released(&self) -> Result<Tab, TrackerError> {
        self.tab(TabKind::Released)
    }

    pub fn stems(&self) -> Result<Tab, TrackerError> {
        self.tab(TabKind::Stems)
    }

    pub fn samples(&self) -> Result<Tab, TrackerError> {
        self.tab(TabKind::Samples)
    }

    pub fn music_videos(&self) -> Result<Tab, TrackerError> {
        self.tab(TabKind::MusicVideos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::MonthTable;
    use crate::config::TabNames;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tracker_types::{DateValue, SongKind};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn unreleased_range(date: &str) -> Range {
        vec![
            row(&["Era", "Name", "Notes"]),
            row(&["1 Full", "Era One", "", "", "", ""]),
            row(&["Era One", "Song", "", "", date, "", "Full", "", ""]),
        ]
    }

    #[test]
    fn test_tracker_fetches_by_configured_name() {
        let fetcher = InMemoryFetcher::new().with_tab("Unreleased", unreleased_range(""));
        let tracker = Tracker::new(fetcher);

        let tab = tracker.unreleased().unwrap();
        assert_eq!(tab.kind, TabKind::Unreleased);
        assert_eq!(tab.entries.len(), 1);
        assert_eq!(tab.eras.len(), 1);
    }

    #[test]
    fn test_missing_tab_is_an_error() {
        let tracker = Tracker::new(InMemoryFetcher::new());
        let err = tracker.stems().unwrap_err();
        assert!(matches!(err, TrackerError::TabNotFound(name) if name == "Stems"));
    }

    #[test]
    fn test_tracker_uses_configured_tab_names_and_months() {
        let config = TrackerConfig {
            tabs: TabNames {
                unreleased: "Unreleased (old)".into(),
                ..TabNames::default()
            },
            dates: crate::config::DateConfig {
                months: MonthTable::as_recorded(),
            },
        };
        let fetcher = InMemoryFetcher::new().with_tab("Unreleased (old)", unreleased_range("Oct 02, 2018"));
        let tracker = Tracker::with_config(fetcher, config);

        let tab = tracker.unreleased().unwrap();
        let song = tab.entries[0].as_song().unwrap();
        let SongKind::Unreleased { file_date, .. } = &song.kind else {
            panic!("expected unreleased song");
        };
        assert_eq!(
            file_date,
            &Some(DateValue::Exact(NaiveDate::from_ymd_opt(2018, 9, 2).unwrap()))
        );
    }
}
