//! Per-column micro-parsers.
//!
//! Every parser here is total: malformed cell text is the normal case, so the
//! worst outcome is `None` (or the raw text, for dates), never an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracker_types::{Category, DateValue, SampleUsed};

pub type Row = Vec<String>;
pub type Range = Vec<Row>;

/// Cell text at `index`, or `""` past the end of a short row.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

// ── Regex patterns ──────────────────────────────────────────────────────
//
// Real data examples:
//   length:       "2:58", "(1:07) snippet"
//   date:         "Oct 24, 2018", "Sep 2018" (no match), "Jam 01, 2019" (raw)
//   era stats:    "12 OG File(s)\n3 Full\n40 Snippet(s)"
//   era events:   "(6/1/2018) (Album release)\n(5/12/2018) (Wyoming listening party)"

static RE_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2}):([0-9]{2})").unwrap());

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w{3}) ([0-9]{2}), ([0-9]{4})").unwrap());

static RE_STAT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+) (.+)").unwrap());

static RE_EVENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]+/[0-9]+/[0-9]+)\) \((.+)\)").unwrap());

// ── Length ──────────────────────────────────────────────────────────────

/// First `M:SS` / `MM:SS` anywhere in the cell.
pub fn parse_length(text: &str) -> Option<Duration> {
    let caps = RE_LENGTH.captures(text)?;
    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: u64 = caps[2].parse().ok()?;
    Some(Duration::from_secs(minutes * 60 + seconds))
}

// ── Dates ───────────────────────────────────────────────────────────────

/// Month abbreviations; a date's month is its 1-based position in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthTable(Vec<String>);

impl MonthTable {
    pub fn new<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(abbreviations.into_iter().map(Into::into).collect())
    }

    pub fn standard() -> Self {
        Self::new([
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ])
    }

    /// The table as it was first entered: "Aug" and "Sep" fused into one
    /// entry, which shifts every later month down by one.
    pub fn as_recorded() -> Self {
        Self::new([
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "AugSep", "Oct", "Nov", "Dec",
        ])
    }

    pub fn month_of(&self, abbreviation: &str) -> Option<u32> {
        let index = self.0.iter().position(|m| m == abbreviation)?;
        u32::try_from(index + 1).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// `Mon DD, YYYY` anywhere in the cell.
///
/// A shape match whose month or day does not resolve gives back the whole
/// cell as [`DateValue::Raw`] so the text survives for manual review.
pub fn parse_date(text: &str, months: &MonthTable) -> Option<DateValue> {
    let caps = RE_DATE.captures(text)?;

    let exact = months.month_of(&caps[1]).and_then(|month| {
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    });

    Some(match exact {
        Some(date) => DateValue::Exact(date),
        None => DateValue::Raw(text.to_string()),
    })
}

// ── Categories ──────────────────────────────────────────────────────────

pub fn parse_category<C: Category>(text: &str) -> Option<C> {
    C::from_display(text)
}

/// Released tab "Streaming" column.
pub fn parse_streaming(text: &str) -> bool {
    text == "Yes"
}

// ── Era header cells ────────────────────────────────────────────────────

/// `<count> <status>` per line; later lines win for a repeated status.
pub fn parse_era_stats(text: &str) -> BTreeMap<String, u32> {
    let mut stats = BTreeMap::new();

    for line in text.lines() {
        let Some(caps) = RE_STAT_LINE.captures(line) else {
            continue;
        };
        let Ok(count) = caps[1].parse::<u32>() else {
            continue;
        };
        stats.insert(caps[2].to_string(), count);
    }

    stats
}

/// `(m/d/yyyy) (description)` per line; later lines win for a repeated date.
/// Lines whose date does not exist on the calendar are skipped.
pub fn parse_era_events(text: &str) -> BTreeMap<NaiveDate, String> {
    let mut events = BTreeMap::new();

    for line in text.lines() {
        let Some(caps) = RE_EVENT_LINE.captures(line) else {
            continue;
        };
        let Some(date) = parse_slash_date(&caps[1]) else {
            continue;
        };
        events.insert(date, caps[2].to_string());
    }

    events
}

fn parse_slash_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Name line plus an optional `(Alt One, Alt Two)` line.
pub fn parse_titled_cell(text: &str) -> (String, Vec<String>) {
    let mut lines = text.lines();
    let main = lines.next().unwrap_or("").to_string();
    let alt_names = lines.next().map(split_alt_names).unwrap_or_default();
    (main, alt_names)
}

/// Drop one leading `(` and one trailing `)`, then split on `", "`.
pub fn split_alt_names(line: &str) -> Vec<String> {
    let line = line.strip_prefix('(').unwrap_or(line);
    let line = line.strip_suffix(')').unwrap_or(line);
    line.split(", ").map(str::to_string).collect()
}

// ── Samples tab ─────────────────────────────────────────────────────────

/// One sample per line of `samples`; links pair up with samples by line.
///
/// Lines are paired before blank sample lines are dropped, so a blank line
/// in both cells keeps later links aligned.
pub fn parse_samples_used(samples: &str, links: &str) -> Vec<SampleUsed> {
    let links = links.lines().map(str::trim).chain(std::iter::repeat(""));

    samples
        .lines()
        .map(str::trim)
        .zip(links)
        .filter(|(line, _)| !line.is_empty())
        .map(|(line, link)| {
            let (artist, title) = match line.split_once(" - ") {
                Some((artist, title)) => (Some(artist.to_string()), title.to_string()),
                None => (None, line.to_string()),
            };
            SampleUsed {
                artist,
                title,
                link: (!link.is_empty()).then(|| link.to_string()),
            }
        })
        .collect()
}
