//! Reading exported Sheets API responses.
//!
//! A dump file holds one `values.get` response or an array of them:
//!
//!   {"range": "Unreleased!A1:I9000", "majorDimension": "ROWS", "values": [[...], ...]}
//!
//! The API drops trailing empty cells from each row, which is what makes
//! row cell counts meaningful to the classifier.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracker_types::TabKind;
use walkdir::WalkDir;

use crate::column::Range;
use crate::error::TrackerError;
use crate::tracker::RawValuesFetcher;

#[derive(Debug, Clone, Deserialize)]
pub struct RawTab {
    pub range: String,
    #[serde(default)]
    pub values: Range,
}

impl RawTab {
    /// Tab name from an A1 range: `'Music Videos'!A1:J500` → `Music Videos`.
    pub fn tab_name(&self) -> &str {
        let name = match self.range.rsplit_once('!') {
            Some((name, _)) => name,
            None => &self.range,
        };
        name.strip_prefix('\'')
            .and_then(|n| n.strip_suffix('\''))
            .unwrap_or(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DumpFile {
    Many(Vec<RawTab>),
    One(RawTab),
}

/// Tabs loaded from a dump file, served by tab name.
#[derive(Debug, Clone, Default)]
pub struct JsonDumpFetcher {
    tabs: HashMap<String, Range>,
}

impl JsonDumpFetcher {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw_tabs = match serde_json::from_str::<DumpFile>(json)? {
            DumpFile::Many(tabs) => tabs,
            DumpFile::One(tab) => vec![tab],
        };

        let tabs = raw_tabs
            .into_iter()
            .map(|t| (t.tab_name().to_string(), t.values))
            .collect();
        Ok(Self { tabs })
    }

    pub fn from_path(path: &Path) -> Result<Self, TrackerError> {
        let json = std::fs::read_to_string(path).map_err(|source| TrackerError::DumpReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let fetcher = Self::from_json(&json).map_err(|source| TrackerError::DumpParseError {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("{}: {} tab(s)", path.display(), fetcher.tabs.len());
        Ok(fetcher)
    }

    pub fn has_tab(&self, tab_name: &str) -> bool {
        self.tabs.contains_key(tab_name)
    }
}

impl RawValuesFetcher for JsonDumpFetcher {
    fn get_raw_values(&self, tab_name: &str) -> Result<Range, TrackerError> {
        self.tabs
            .get(tab_name)
            .cloned()
            .ok_or_else(|| TrackerError::TabNotFound(tab_name.to_string()))
    }
}

/// All `*.json` files under `root`, sorted by path. Nothing under
/// `skip_dir` is returned, so a rerun does not read its own output.
pub fn find_dumps(root: &Path, skip_dir: &Path) -> Vec<PathBuf> {
    let skip_dir = skip_dir.canonicalize().ok();
    let is_skipped = |path: &Path| {
        skip_dir
            .as_deref()
            .is_some_and(|skip| path.canonicalize().is_ok_and(|p| p == skip))
    };

    let mut dumps: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && is_skipped(e.path())))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    dumps.sort();
    dumps
}

/// A dump's path relative to `root`, without the extension:
/// `root/nested/a.json` → `nested/a`. Distinct dumps get distinct labels.
pub fn dump_label(root: &Path, dump: &Path) -> PathBuf {
    dump.strip_prefix(root).unwrap_or(dump).with_extension("")
}

/// Output file for one tab of a dump, mirroring the dump's directory:
/// `nested/a` → `nested/a-unreleased.json`.
pub fn tab_output_file(label: &Path, kind: TabKind) -> PathBuf {
    let stem = label
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("dump");
    label.with_file_name(format!("{stem}-{}.json", kind.slug()))
}
