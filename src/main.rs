use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use tracker_extract::Tracker;
use tracker_extract::config::{DEFAULT_CONFIG_FILE, TrackerConfig};
use tracker_extract::dump::{JsonDumpFetcher, dump_label, find_dumps, tab_output_file};
use tracker_types::{Emoji, Entry, TabKind, TabSummary};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "tracker_extract",
    about = "Tracker spreadsheet catalog extractor"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every JSON dump under a directory → output/*.json
    Extract {
        /// Directory holding Sheets API JSON dumps
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Print one parsed tab of a dump as JSON
    Show {
        dump: PathBuf,
        #[arg(long, value_enum)]
        tab: TabArg,
    },
    /// Print entry / era counts for every tab in a dump
    Summary { dump: PathBuf },
    /// Print the entries of a tab carrying a status marker
    Filter {
        dump: PathBuf,
        #[arg(long, value_enum)]
        tab: TabArg,
        /// best-of, special, grail, wanted, worst-of, ai, lost
        #[arg(long, value_parser = parse_emoji)]
        emoji: Emoji,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Unreleased,
    Released,
    Stems,
    Samples,
    MusicVideos,
}

impl From<TabArg> for TabKind {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Unreleased => TabKind::Unreleased,
            TabArg::Released => TabKind::Released,
            TabArg::Stems => TabKind::Stems,
            TabArg::Samples => TabKind::Samples,
            TabArg::MusicVideos => TabKind::MusicVideos,
        }
    }
}

fn parse_emoji(s: &str) -> Result<Emoji, String> {
    Emoji::from_slug(s).ok_or_else(|| format!("unknown status marker: {s}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = TrackerConfig::load_from_path(&cli.config)?.unwrap_or_default();

    match cli.command {
        Some(Command::Extract { dir }) => run_extract(&dir, &config),
        Some(Command::Show { dump, tab }) => run_show(&dump, tab.into(), &config),
        Some(Command::Summary { dump }) => run_summary(&dump, &config),
        Some(Command::Filter { dump, tab, emoji }) => run_filter(&dump, tab.into(), emoji, &config),
        // Default: extract from current directory
        None => run_extract(Path::new("."), &config),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    std::fs::write(path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    info!("  {} ({} bytes)", path.display(), json.len());
    Ok(())
}

fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

fn open_dump(dump: &Path, config: &TrackerConfig) -> Result<Tracker<JsonDumpFetcher>> {
    let fetcher = JsonDumpFetcher::from_path(dump)?;
    Ok(Tracker::with_config(fetcher, config.clone()))
}

/// Tab kinds whose configured sheet name is present in the dump.
fn available_tabs(tracker: &Tracker<JsonDumpFetcher>) -> Vec<TabKind> {
    TabKind::ALL
        .into_iter()
        .filter(|kind| tracker.fetcher().has_tab(tracker.config().tabs.name_of(*kind)))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: every dump under a directory → output/
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(dir: &Path, config: &TrackerConfig) -> Result<()> {
    let summaries = extract_into(dir, Path::new(OUTPUT_DIR), config)?;

    // ── Print statistics ───────────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  CATALOG STATISTICS");
    eprintln!("══════════════════════════════════════════");
    for s in &summaries {
        eprintln!(
            "  {:<24} {:<14} {:>6} entries  {:>4} eras  {:>4} sub-eras",
            s.source.as_deref().unwrap_or(""),
            s.tab,
            s.entry_count,
            s.era_count,
            s.subera_count
        );
    }

    Ok(())
}

/// Parse every dump under `dir`, writing one file per tab under `out_dir`
/// plus `summary.json`. Output paths mirror the dumps' paths below `dir`.
fn extract_into(dir: &Path, out_dir: &Path, config: &TrackerConfig) -> Result<Vec<TabSummary>> {
    info!("Scanning for dumps under: {}", dir.display());

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    let dumps = find_dumps(dir, out_dir);
    info!("Found {} dump file(s)", dumps.len());

    let mut summaries: Vec<TabSummary> = Vec::new();

    for dump in &dumps {
        let fetcher = match JsonDumpFetcher::from_path(dump) {
            Ok(f) => f,
            Err(e) => {
                warn!("Skipping {}: {e}", dump.display());
                continue;
            }
        };
        let label = dump_label(dir, dump);
        let tracker = Tracker::with_config(fetcher, config.clone());

        for kind in available_tabs(&tracker) {
            let tab = tracker.tab(kind)?;
            write_json(&out_dir.join(tab_output_file(&label, kind)), &tab)?;
            summaries.push(TabSummary {
                source: Some(label.display().to_string()),
                ..tab.summary()
            });
        }
    }

    write_json(&out_dir.join("summary.json"), &summaries)?;
    Ok(summaries)
}

// ═══════════════════════════════════════════════════════════════════════
//  SHOW / SUMMARY / FILTER: one dump, results on stdout
// ═══════════════════════════════════════════════════════════════════════

fn run_show(dump: &Path, kind: TabKind, config: &TrackerConfig) -> Result<()> {
    let tab = open_dump(dump, config)?.tab(kind)?;
    print_json(&tab)
}

fn run_summary(dump: &Path, config: &TrackerConfig) -> Result<()> {
    let tracker = open_dump(dump, config)?;

    let summaries = available_tabs(&tracker)
        .into_iter()
        .map(|kind| tracker.tab(kind).map(|t| t.summary()))
        .collect::<Result<Vec<_>, _>>()?;

    print_json(&summaries)
}

fn run_filter(dump: &Path, kind: TabKind, emoji: Emoji, config: &TrackerConfig) -> Result<()> {
    let tab = open_dump(dump, config)?.tab(kind)?;
    let matching: Vec<&Entry> = tab.with_emoji(emoji).collect();

    eprintln!(
        "Found {} {} entries marked {}",
        matching.len(),
        kind.slug(),
        emoji.glyph()
    );
    print_json(&matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    fn unreleased_dump(song: &str) -> String {
        serde_json::json!({
            "range": "Unreleased!A1:I3",
            "values": [
                ["Era", "Name", "Notes"],
                ["1 Full", "Era One", "", "", "", ""],
                ["Era One", song, "", "", "", "", "Full", "", ""],
            ]
        })
        .to_string()
    }

    fn first_entry_name(path: &Path) -> String {
        let tab: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        tab["entries"][0]["name"]["main_name"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_extract_keeps_same_named_dumps_apart() {
        let dir = TempDir::new().unwrap();
        let dumps = dir.path().join("d");
        std::fs::create_dir_all(dumps.join("nested")).unwrap();
        std::fs::write(dumps.join("a.json"), unreleased_dump("S1")).unwrap();
        std::fs::write(dumps.join("nested/a.json"), unreleased_dump("S2")).unwrap();
        let out = dir.path().join("out");

        let summaries = extract_into(&dumps, &out, &TrackerConfig::default()).unwrap();

        assert_eq!(first_entry_name(&out.join("a-unreleased.json")), "S1");
        assert_eq!(first_entry_name(&out.join("nested/a-unreleased.json")), "S2");

        let sources: Vec<Option<&str>> = summaries.iter().map(|s| s.source.as_deref()).collect();
        assert_eq!(
            sources,
            vec![Some("a"), Some(Path::new("nested").join("a").to_str().unwrap())]
        );
        assert!(out.join("summary.json").exists());
    }

    #[test]
    fn test_extract_rerun_ignores_its_own_output() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.json"), unreleased_dump("S1")).unwrap();
        let out = dir.path().join("output");

        let first = extract_into(dir.path(), &out, &TrackerConfig::default()).unwrap();
        let second = extract_into(dir.path(), &out, &TrackerConfig::default()).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }
}
