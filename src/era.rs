use tracker_types::{Era, StemType, SubEra, VideoStatus};

use crate::column::{cell, parse_category, parse_era_events, parse_era_stats, parse_titled_cell};

// Era header row (6 cells):
//   0: stats    "12 OG File(s)\n3 Full"
//   1: name     "Yandhi\n(Yandhi V1, Yandhi V2)"
//   2: events   "(9/29/2018) (SNL performance)"
//   5: notes
pub fn build_era(row: &[String]) -> Era {
    let (main_name, alt_names) = parse_titled_cell(cell(row, 1));

    Era {
        main_name,
        alt_names,
        notes: cell(row, 5).to_string(),
        stats: parse_era_stats(cell(row, 0)),
        events: parse_era_events(cell(row, 2)),
    }
}

/// Which sub-era variant a tab's sub-era rows produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubEraKind {
    /// 3-cell rows: name in 1, events in 2
    Basic,
    /// 2-cell rows in the Stems tab
    Stem,
    /// 2-cell rows in the Music Videos tab
    MusicVideo,
}

impl SubEraKind {
    pub fn build(&self, row: &[String]) -> SubEra {
        let name = cell(row, 1).to_string();

        match self {
            Self::Basic => SubEra::Basic {
                events: parse_era_events(cell(row, 2)),
                name,
            },
            Self::Stem => SubEra::Stem {
                stem_type: parse_category::<StemType>(&name),
                name,
            },
            Self::MusicVideo => SubEra::MusicVideo {
                status: parse_category::<VideoStatus>(&name),
                name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_era() {
        let era = build_era(&row(&[
            "12 OG File(s)\n3 Full",
            "Yandhi\n(Yandhi V1, Yandhi V2)",
            "(9/29/2018) (SNL performance)",
            "",
            "",
            "Shelved album",
        ]));

        assert_eq!(era.main_name, "Yandhi");
        assert_eq!(era.alt_names, vec!["Yandhi V1", "Yandhi V2"]);
        assert_eq!(era.notes, "Shelved album");
        assert_eq!(era.stats["OG File(s)"], 12);
        assert_eq!(era.stats["Full"], 3);
        assert_eq!(
            era.events[&NaiveDate::from_ymd_opt(2018, 9, 29).unwrap()],
            "SNL performance"
        );
    }

    #[test]
    fn test_build_era_without_alt_names() {
        let era = build_era(&row(&["", "Ye", "", "", "", ""]));
        assert_eq!(era.main_name, "Ye");
        assert!(era.alt_names.is_empty());
        assert!(era.stats.is_empty());
        assert!(era.events.is_empty());
    }

    #[test]
    fn test_build_subera_variants() {
        let basic = SubEraKind::Basic.build(&row(&["x", "Wyoming Sessions", "(5/1/2018) (Start)"]));
        assert_eq!(basic.name(), "Wyoming Sessions");
        match basic {
            SubEra::Basic { events, .. } => assert_eq!(events.len(), 1),
            other => panic!("expected basic sub-era, got {other:?}"),
        }

        let stem = SubEraKind::Stem.build(&row(&["x", "Multitracks"]));
        assert_eq!(
            stem,
            SubEra::Stem {
                name: "Multitracks".into(),
                stem_type: Some(StemType::Multitracks),
            }
        );

        let video = SubEraKind::MusicVideo.build(&row(&["x", "Unknown Label"]));
        assert_eq!(
            video,
            SubEra::MusicVideo {
                name: "Unknown Label".into(),
                status: None,
            }
        );
    }
}
