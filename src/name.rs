//! Decomposition of a "Name" cell.
//!
//! A name cell packs several conventions into free text:
//!
//!   ⭐🏆 Title [V2-V?]
//!   (feat. Someone) (prod. Someone Else)
//!   (Alt Title, Other Alt Title)
//!
//! Stages run in a fixed order over a shrinking buffer: emoji, version,
//! contributors, alternate names. Each stage assumes the syntax handled by
//! the stages before it is already gone, so the order must not change.

use std::sync::LazyLock;

use regex::Regex;
use tracker_types::{Contributors, Emoji, Name, Version, VersionEnd};

use crate::column::split_alt_names;

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[V([0-9]+)(?:-V([0-9]+|\?))*\]").unwrap());

pub fn parse_name(text: &str) -> Name {
    let (emojis, buffer) = extract_emojis(text);
    let (version, buffer) = extract_version(&buffer);
    let (contributors, buffer) = extract_contributors(&buffer);
    let (alt_names, main_name) = extract_alt_names(&buffer);

    Name {
        full_name: text.to_string(),
        main_name: main_name.trim().to_string(),
        alt_names,
        emojis,
        version,
        contributors,
    }
}

// ── Stage 1: status markers ─────────────────────────────────────────────

/// Walk the catalog once. A marker counts when its glyph leads the buffer
/// at the moment it is tested; it is then removed everywhere in the buffer.
pub fn extract_emojis(text: &str) -> (Vec<Emoji>, String) {
    let mut buffer = text.to_string();
    let mut emojis = Vec::new();

    for emoji in Emoji::CATALOG {
        if !buffer.starts_with(emoji.glyph()) {
            continue;
        }
        emojis.push(emoji);
        buffer = buffer.replace(emoji.glyph(), "");
    }

    (emojis, buffer)
}

// ── Stage 2: version marker ─────────────────────────────────────────────

/// `[V3]`, `[V1-V4]`, `[V2-V?]`. The first marker decides the version and
/// every marker is removed from the buffer.
pub fn extract_version(text: &str) -> (Option<Version>, String) {
    let Some(caps) = RE_VERSION.captures(text) else {
        return (None, text.to_string());
    };

    let Ok(start) = caps[1].parse::<u32>() else {
        return (None, text.to_string());
    };

    let version = match caps.get(2).map(|m| m.as_str()) {
        None => Version::single(start),
        Some("?") => Version::spanning(start, VersionEnd::Unknown),
        Some(end) => match end.parse::<u32>() {
            Ok(end) => Version::spanning(start, VersionEnd::Through(end)),
            Err(_) => return (None, text.to_string()),
        },
    };

    (Some(version), RE_VERSION.replace_all(text, "").into_owned())
}

// ── Stage 3: contributor line ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContribTag {
    Feat,
    Ref,
    With,
    Prod,
    Questioned,
}

impl ContribTag {
    const ALL: [ContribTag; 5] = [
        Self::Feat,
        Self::Ref,
        Self::With,
        Self::Prod,
        Self::Questioned,
    ];

    fn marker(&self) -> &'static str {
        match self {
            Self::Feat => "feat.",
            Self::Ref => "ref.",
            Self::With => "with",
            Self::Prod => "prod.",
            Self::Questioned => "???.",
        }
    }

    fn from_marker(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.marker() == s)
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

/// Pull the contributor line out of the buffer and parse it.
pub fn extract_contributors(text: &str) -> (Contributors, String) {
    match split_contributor_line(text) {
        Some((line, rest)) => (parse_contributor_line(line), rest),
        None => (Contributors::default(), text.to_string()),
    }
}

/// Three lines: the middle one is always the contributor line.
/// Two lines: the second one is, if its first word opens a known tag.
fn split_contributor_line(text: &str) -> Option<(&str, String)> {
    let lines: Vec<&str> = text.lines().collect();

    match lines.as_slice() {
        [first, contrib, last] => Some((*contrib, format!("{first}\n{last}"))),
        [first, second] if opens_known_tag(second) => Some((*second, first.to_string())),
        _ => None,
    }
}

fn opens_known_tag(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .and_then(|word| word.strip_prefix('('))
        .and_then(ContribTag::from_marker)
        .is_some()
}

/// Token automaton: `(tag` opens a slot (or closes it if the tag is
/// unknown), `word)` appends and closes, other words append to the open slot.
pub fn parse_contributor_line(line: &str) -> Contributors {
    let mut slots: [Vec<&str>; 5] = Default::default();
    let mut open: Option<ContribTag> = None;

    for word in line.split_whitespace() {
        if let Some(tag) = word.strip_prefix('(') {
            open = ContribTag::from_marker(tag);
        } else if let Some(last) = word.strip_suffix(')') {
            if let Some(tag) = open {
                slots[tag.slot()].push(last);
            }
            open = None;
        } else if let Some(tag) = open {
            slots[tag.slot()].push(word);
        }
    }

    let [feat, reference, with, prod, questioned] = slots.map(|words| Some(words.join(" ")));
    Contributors {
        feat,
        reference,
        with,
        prod,
        questioned,
    }
}

// ── Stage 4: alternate names ────────────────────────────────────────────

/// Second line (if any) holds `(Alt, Alt)`; first line is the main name.
pub fn extract_alt_names(text: &str) -> (Vec<String>, String) {
    let mut lines = text.lines();
    match (lines.next(), lines.next()) {
        (Some(first), Some(second)) => (split_alt_names(second), first.to_string()),
        _ => (Vec::new(), text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_full_pipeline() {
        let name = parse_name("⭐Some Title [V2-V?]\n(feat. Artist X)\n(Alt Title)");

        assert_eq!(name.emojis, vec![Emoji::BestOf]);
        assert_eq!(name.version, Some(Version::spanning(2, VersionEnd::Unknown)));
        assert!(name.version.unwrap().count_unknown());
        assert_eq!(name.contributors.feat, some("Artist X"));
        assert_eq!(name.contributors.prod, some(""));
        assert_eq!(name.alt_names, vec!["Alt Title".to_string()]);
        assert_eq!(name.main_name, "Some Title");
        assert_eq!(
            name.full_name,
            "⭐Some Title [V2-V?]\n(feat. Artist X)\n(Alt Title)"
        );
    }

    #[test]
    fn test_plain_name() {
        let name = parse_name("Hurricane");
        assert_eq!(name.main_name, "Hurricane");
        assert!(name.emojis.is_empty());
        assert!(name.version.is_none());
        assert!(!name.contributors.is_parsed());
        assert!(name.alt_names.is_empty());
    }

    #[test]
    fn test_empty_cell() {
        let name = parse_name("");
        assert_eq!(name.main_name, "");
        assert!(name.alt_names.is_empty());
    }

    // ── emoji ────────────────────────────────────────────────────────

    #[test]
    fn test_emojis_in_catalog_order() {
        let (emojis, rest) = extract_emojis("⭐🏆Title");
        assert_eq!(emojis, vec![Emoji::BestOf, Emoji::Grail]);
        assert_eq!(rest, "Title");
    }

    #[test]
    fn test_emoji_removed_everywhere() {
        let (emojis, rest) = extract_emojis("⭐Title ⭐ Remix");
        assert_eq!(emojis, vec![Emoji::BestOf]);
        assert_eq!(rest, "Title  Remix");
    }

    #[test]
    fn test_emoji_detection_is_sequential() {
        // BestOf is tested before the leading Special glyph is removed,
        // so the star it uncovers is never seen.
        let (emojis, rest) = extract_emojis("✨⭐Title");
        assert_eq!(emojis, vec![Emoji::Special]);
        assert_eq!(rest, "⭐Title");
    }

    #[test]
    fn test_emoji_not_leading_is_ignored() {
        let (emojis, rest) = extract_emojis("Title 🏆");
        assert!(emojis.is_empty());
        assert_eq!(rest, "Title 🏆");
    }

    #[test]
    fn test_variation_selector_glyphs() {
        let (emojis, rest) = extract_emojis("🗑\u{fe0f}⁉\u{fe0f}Title");
        assert_eq!(emojis, vec![Emoji::WorstOf, Emoji::Lost]);
        assert_eq!(rest, "Title");
    }

    // ── version ──────────────────────────────────────────────────────

    #[rstest]
    #[case("Title [V3]", Some(Version::single(3)), "Title ")]
    #[case("Title [V1-V4]", Some(Version::spanning(1, VersionEnd::Through(4))), "Title ")]
    #[case("Title [V2-V?]", Some(Version::spanning(2, VersionEnd::Unknown)), "Title ")]
    #[case("Title [V]", None, "Title [V]")]
    #[case("Title (V2)", None, "Title (V2)")]
    fn test_extract_version(
        #[case] text: &str,
        #[case] version: Option<Version>,
        #[case] rest: &str,
    ) {
        assert_eq!(extract_version(text), (version, rest.to_string()));
    }

    #[test]
    fn test_every_version_marker_is_removed() {
        let (version, rest) = extract_version("[V1] Title [V5]");
        assert_eq!(version, Some(Version::single(1)));
        assert_eq!(rest, " Title ");
    }

    #[test]
    fn test_version_digits_are_ascii_only() {
        let (version, rest) = extract_version("Title [V\u{0662}]");
        assert_eq!(version, None);
        assert_eq!(rest, "Title [V\u{0662}]");
    }

    // ── contributors ─────────────────────────────────────────────────

    #[test]
    fn test_three_lines_middle_is_contributors() {
        let (contribs, rest) = extract_contributors("Title\nanything here\n(Alt)");
        assert!(contribs.is_parsed());
        assert_eq!(contribs.feat, some(""));
        assert_eq!(rest, "Title\n(Alt)");
    }

    #[test]
    fn test_two_lines_with_tag_is_contributors() {
        let (contribs, rest) = extract_contributors("Title\n(prod. Mike Dean)");
        assert_eq!(contribs.prod, some("Mike Dean"));
        assert_eq!(rest, "Title");
    }

    #[test]
    fn test_two_lines_without_tag_is_left_alone() {
        let (contribs, rest) = extract_contributors("Title\n(Alt One, Alt Two)");
        assert!(!contribs.is_parsed());
        assert_eq!(rest, "Title\n(Alt One, Alt Two)");
    }

    #[test]
    fn test_trailing_newline_is_one_line() {
        let (contribs, rest) = extract_contributors("Title\n");
        assert!(!contribs.is_parsed());
        assert_eq!(rest, "Title\n");
    }

    #[test]
    fn test_contributor_line_all_tags() {
        let contribs = parse_contributor_line(
            "(feat. A B) (ref. C) (with D E F) (prod. G & H) (???. I)",
        );
        assert_eq!(
            contribs,
            Contributors {
                feat: some("A B"),
                reference: some("C"),
                with: some("D E F"),
                prod: some("G & H"),
                questioned: some("I"),
            }
        );
    }

    #[test]
    fn test_contributor_line_unknown_tag_discards_words() {
        let contribs = parse_contributor_line("(feat. A (remix. B C) D)");
        assert_eq!(contribs.feat, some("A"));
    }

    #[test]
    fn test_contributor_line_words_outside_tags_dropped() {
        let contribs = parse_contributor_line("stray (with A) more words");
        assert_eq!(contribs.with, some("A"));
        assert_eq!(contribs.feat, some(""));
    }

    // ── alt names ────────────────────────────────────────────────────

    #[test]
    fn test_alt_names_split() {
        let (alts, main) = extract_alt_names("Title\n(One, Two, Three)");
        assert_eq!(alts, vec!["One", "Two", "Three"]);
        assert_eq!(main, "Title");
    }

    #[test]
    fn test_two_line_name_with_contributors_and_no_alts() {
        let name = parse_name("🤖Title [V4]\n(feat. Someone)");
        assert_eq!(name.emojis, vec![Emoji::Ai]);
        assert_eq!(name.version, Some(Version::single(4)));
        assert_eq!(name.contributors.feat, some("Someone"));
        assert!(name.alt_names.is_empty());
        assert_eq!(name.main_name, "Title");
    }
}
