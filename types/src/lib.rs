//! Plain data shapes for a parsed tracker tab.
//!
//! Everything here is produced by the extractor and read by consumers
//! (reporting, export, filtering). Nothing in this crate parses cell text
//! except the exact display-string lookups on the category enums.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Category tags ───────────────────────────────────────────────────────

/// A fixed set of display strings that a cell must match exactly.
///
/// No case folding, no trimming: `"full"` is not `"Full"`.
pub trait Category: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_display(&self) -> &'static str;

    fn from_display(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_display() == s)
    }
}

/// How much of a song is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailableLength {
    Snippet,
    Partial,
    BeatOnly,
    Tagged,
    StemBounce,
    Full,
    OgFile,
    Confirmed,
    Rumored,
    ConflictingSources,
}

impl Category for AvailableLength {
    const ALL: &'static [Self] = &[
        Self::Snippet,
        Self::Partial,
        Self::BeatOnly,
        Self::Tagged,
        Self::StemBounce,
        Self::Full,
        Self::OgFile,
        Self::Confirmed,
        Self::Rumored,
        Self::ConflictingSources,
    ];

    fn as_display(&self) -> &'static str {
        match self {
            Self::Snippet => "Snippet",
            Self::Partial => "Partial",
            Self::BeatOnly => "Beat Only",
            Self::Tagged => "Tagged",
            Self::StemBounce => "Stem Bounce",
            Self::Full => "Full",
            Self::OgFile => "OG File",
            Self::Confirmed => "Confirmed",
            Self::Rumored => "Rumored",
            Self::ConflictingSources => "Conflicting Sources",
        }
    }
}

/// Audio quality of the best known copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    NotAvailable,
    Recording,
    LowQuality,
    HighQuality,
    CdQuality,
    Lossless,
}

impl Category for Quality {
    const ALL: &'static [Self] = &[
        Self::NotAvailable,
        Self::Recording,
        Self::LowQuality,
        Self::HighQuality,
        Self::CdQuality,
        Self::Lossless,
    ];

    fn as_display(&self) -> &'static str {
        match self {
            Self::NotAvailable => "Not Available",
            Self::Recording => "Recording",
            Self::LowQuality => "Low Quality",
            Self::HighQuality => "High Quality",
            Self::CdQuality => "CD Quality",
            Self::Lossless => "Lossless",
        }
    }
}

/// Kind of official release (Released tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseType {
    AlbumTrack,
    Single,
    Feature,
    Production,
    Remix,
    Soundtrack,
    Compilation,
    Other,
}

impl Category for ReleaseType {
    const ALL: &'static [Self] = &[
        Self::AlbumTrack,
        Self::Single,
        Self::Feature,
        Self::Production,
        Self::Remix,
        Self::Soundtrack,
        Self::Compilation,
        Self::Other,
    ];

    fn as_display(&self) -> &'static str {
        match self {
            Self::AlbumTrack => "Album Track",
            Self::Single => "Single",
            Self::Feature => "Feature",
            Self::Production => "Production",
            Self::Remix => "Remix",
            Self::Soundtrack => "Soundtrack",
            Self::Compilation => "Compilation",
            Self::Other => "Other",
        }
    }
}

/// Grouping label of a Stems tab sub-era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StemType {
    Stems,
    Multitracks,
    Acapella,
    Instrumental,
    SessionFiles,
}

impl Category for StemType {
    const ALL: &'static [Self] = &[
        Self::Stems,
        Self::Multitracks,
        Self::Acapella,
        Self::Instrumental,
        Self::SessionFiles,
    ];

    fn as_display(&self) -> &'static str {
        match self {
            Self::Stems => "Stems",
            Self::Multitracks => "Multitracks",
            Self::Acapella => "Acapella",
            Self::Instrumental => "Instrumental",
            Self::SessionFiles => "Session Files",
        }
    }
}

/// Grouping label of a Music Videos tab sub-era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoStatus {
    Released,
    Unreleased,
    Leaked,
}

impl Category for VideoStatus {
    const ALL: &'static [Self] = &[Self::Released, Self::Unreleased, Self::Leaked];

    fn as_display(&self) -> &'static str {
        match self {
            Self::Released => "Released",
            Self::Unreleased => "Unreleased",
            Self::Leaked => "Leaked",
        }
    }
}

// ── Status markers ──────────────────────────────────────────────────────

/// Curator-assigned status glyph prefixed to a name cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Emoji {
    BestOf,
    Special,
    Grail,
    Wanted,
    WorstOf,
    Ai,
    Lost,
}

impl Emoji {
    /// Detection order. Extraction tests markers in exactly this order.
    pub const CATALOG: [Emoji; 7] = [
        Self::BestOf,
        Self::Special,
        Self::Grail,
        Self::Wanted,
        Self::WorstOf,
        Self::Ai,
        Self::Lost,
    ];

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::BestOf => "⭐",
            Self::Special => "✨",
            Self::Grail => "🏆",
            Self::Wanted => "🥇",
            Self::WorstOf => "🗑\u{fe0f}",
            Self::Ai => "🤖",
            Self::Lost => "⁉\u{fe0f}",
        }
    }

    /// Kebab-case name used on the command line, e.g. `best-of`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BestOf => "best-of",
            Self::Special => "special",
            Self::Grail => "grail",
            Self::Wanted => "wanted",
            Self::WorstOf => "worst-of",
            Self::Ai => "ai",
            Self::Lost => "lost",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        Self::CATALOG.into_iter().find(|e| e.slug() == s)
    }
}

// ── Decomposed name cell ────────────────────────────────────────────────

/// Upper bound of a `[V<start>-V<end>]` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum VersionEnd {
    /// `[V2-V5]`: versions 2 through 5 inclusive
    Through(u32),
    /// `[V2-V?]`: more than one version, count unknown
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<VersionEnd>,
    /// Set whenever an end marker is present.
    pub multiple: bool,
}

impl Version {
    pub fn single(start: u32) -> Self {
        Self {
            start,
            end: None,
            multiple: false,
        }
    }

    pub fn spanning(start: u32, end: VersionEnd) -> Self {
        Self {
            start,
            end: Some(end),
            multiple: true,
        }
    }

    pub fn count_unknown(&self) -> bool {
        self.end == Some(VersionEnd::Unknown)
    }
}

/// Credits from the contributor line of a name cell.
///
/// All slots are `None` when the cell has no contributor line. Once a line
/// is parsed every slot is `Some`, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributors {
    /// `(feat. ...)`
    pub feat: Option<String>,
    /// `(ref. ...)`
    pub reference: Option<String>,
    /// `(with ...)`
    pub with: Option<String>,
    /// `(prod. ...)`
    pub prod: Option<String>,
    /// `(???. ...)`, uncredited or disputed
    pub questioned: Option<String>,
}

impl Contributors {
    pub fn is_parsed(&self) -> bool {
        self.feat.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Cell text as it appeared in the sheet.
    pub full_name: String,
    pub main_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emojis: Vec<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    pub contributors: Contributors,
}

impl Name {
    pub fn has_emoji(&self, emoji: Emoji) -> bool {
        self.emojis.contains(&emoji)
    }
}

// ── Dates ───────────────────────────────────────────────────────────────

/// A date cell that matched the `Mon DD, YYYY` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum DateValue {
    Exact(NaiveDate),
    /// Shape matched but the month or day did not resolve; original cell text.
    Raw(String),
}

impl DateValue {
    pub fn exact(&self) -> Option<NaiveDate> {
        match self {
            Self::Exact(d) => Some(*d),
            Self::Raw(_) => None,
        }
    }
}

// ── Eras ────────────────────────────────────────────────────────────────

/// Position of an era in its tab's `eras` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EraId(pub usize);

/// Position of a sub-era in its tab's `suberas` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubEraId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    pub main_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_names: Vec<String>,
    pub notes: String,
    /// Status text → number of entries with that status
    pub stats: BTreeMap<String, u32>,
    pub events: BTreeMap<NaiveDate, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SubEra {
    Basic {
        name: String,
        events: BTreeMap<NaiveDate, String>,
    },
    Stem {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stem_type: Option<StemType>,
    },
    MusicVideo {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<VideoStatus>,
    },
}

impl SubEra {
    pub fn name(&self) -> &str {
        match self {
            Self::Basic { name, .. } | Self::Stem { name, .. } | Self::MusicVideo { name, .. } => {
                name
            }
        }
    }
}

/// What an entry knows about its era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum EraRef {
    /// No era header preceded the entry; the era column text.
    Named(String),
    Discovered(EraId),
}

// ── Entries ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SongKind {
    /// Base song columns only (Music Videos tab)
    Plain,
    Unreleased {
        file_date: Option<DateValue>,
        leak_date: Option<DateValue>,
        available_length: Option<AvailableLength>,
        quality: Option<Quality>,
    },
    Released {
        release_date: Option<DateValue>,
        release_type: Option<ReleaseType>,
        streaming: bool,
    },
    Stem {
        file_date: Option<DateValue>,
        leak_date: Option<DateValue>,
        bpm: String,
        available_length: Option<AvailableLength>,
        quality: Option<Quality>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub era: EraRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subera: Option<SubEraId>,
    pub era_name: String,
    pub name: Name,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Duration>,
    pub link: String,
    pub kind: SongKind,
}

/// One sampled work listed against a song in the Samples tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleUsed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub era_name: String,
    pub name: Name,
    pub notes: String,
    pub links: String,
    pub samples: Vec<SampleUsed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry")]
pub enum Entry {
    Song(Song),
    Sample(Sample),
}

impl Entry {
    pub fn name(&self) -> &Name {
        match self {
            Self::Song(s) => &s.name,
            Self::Sample(s) => &s.name,
        }
    }

    pub fn as_song(&self) -> Option<&Song> {
        match self {
            Self::Song(s) => Some(s),
            Self::Sample(_) => None,
        }
    }
}

// ── Tabs ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabKind {
    Unreleased,
    Released,
    Stems,
    Samples,
    MusicVideos,
}

impl TabKind {
    pub const ALL: [TabKind; 5] = [
        Self::Unreleased,
        Self::Released,
        Self::Stems,
        Self::Samples,
        Self::MusicVideos,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Unreleased => "unreleased",
            Self::Released => "released",
            Self::Stems => "stems",
            Self::Samples => "samples",
            Self::MusicVideos => "music-videos",
        }
    }
}

/// Result of scanning one sheet tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub kind: TabKind,
    pub entries: Vec<Entry>,
    pub eras: Vec<Era>,
    pub suberas: Vec<SubEra>,
}

impl Tab {
    pub fn new(kind: TabKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            eras: Vec::new(),
            suberas: Vec::new(),
        }
    }

    /// The era header a song was filed under, if one preceded it.
    pub fn era_of(&self, song: &Song) -> Option<&Era> {
        match song.era {
            EraRef::Discovered(EraId(i)) => self.eras.get(i),
            EraRef::Named(_) => None,
        }
    }

    pub fn subera_of(&self, song: &Song) -> Option<&SubEra> {
        song.subera.and_then(|SubEraId(i)| self.suberas.get(i))
    }

    pub fn with_emoji(&self, emoji: Emoji) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |e| e.name().has_emoji(emoji))
    }

    pub fn summary(&self) -> TabSummary {
        let mut emoji_counts = BTreeMap::new();
        for entry in &self.entries {
            for emoji in &entry.name().emojis {
                *emoji_counts.entry(emoji.slug().to_string()).or_insert(0) += 1;
            }
        }

        TabSummary {
            source: None,
            tab: self.kind.slug().to_string(),
            entry_count: self.entries.len(),
            era_count: self.eras.len(),
            subera_count: self.suberas.len(),
            emoji_counts,
        }
    }
}

// ── Summary output ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    /// Dump the tab was read from, when there is more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub tab: String,
    pub entry_count: usize,
    pub era_count: usize,
    pub subera_count: usize,
    pub emoji_counts: BTreeMap<String, usize>,
}
