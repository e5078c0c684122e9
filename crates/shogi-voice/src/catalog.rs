//! Clip catalog: maps `(category, key)` to a time range inside the single
//! voice-asset waveform.
//!
//! The timestamp table ships as an embedded JSON document. Each category
//! lists `(key, start)` entries in strictly increasing start order and is
//! terminated by a sentinel entry whose key is [`SENTINEL_KEY`]; the duration
//! of entry *i* is the delta to entry *i + 1*. The table is validated once at
//! load time and frozen into a hash map for lookup.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use thiserror::Error;

/// Reserved key that terminates a category's entry list. Never a real clip.
pub const SENTINEL_KEY: u32 = u32::MAX;

/// Embedded timestamp table for the stock voice recording.
const CLIP_TABLE_JSON: &str = include_str!("../assets/clip_table.json");

/// Semantic partition of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Color announcements and fixed game-state phrases.
    Misc,
    /// The 81 board squares, keyed `file * 10 + rank`.
    Square,
    /// Piece names, keyed by color-stripped piece code.
    Piece,
    /// Piece names spoken in the terse capture phrasing, same keys as Piece.
    Capture,
    /// Disambiguation words, keyed by [`QualifierClip`].
    Qualifier,
}

/// Keys of the `Misc` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MiscClip {
    Black = 0,
    White = 1,
    Resign = 2,
    Ready = 3,
    Turn = 4,
    WrongMoveLeading = 5,
    WrongMoveTrailing = 6,
    Aborted = 7,
    Error = 8,
    Repetition = 9,
}

/// Keys of the `Qualifier` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum QualifierClip {
    Promote = 0,
    NoPromote = 1,
    Right = 2,
    Left = 3,
    Nearest = 4,
    Up = 5,
    Down = 6,
    Sideways = 7,
    Drop = 8,
}

/// A resolved clip: a bounded sub-range of the voice asset, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub start: f64,
    pub end: f64,
}

impl Clip {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Lookup failure. Recoverable: callers log and skip the clip, the rest of
/// the phrase still plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no clip for {category:?} key {key}")]
pub struct ClipNotFound {
    pub category: Category,
    pub key: u32,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    key: u32,
    start: f64,
}

#[derive(Debug, Deserialize)]
struct ClipTable {
    misc: Vec<TableEntry>,
    square: Vec<TableEntry>,
    piece: Vec<TableEntry>,
    capture: Vec<TableEntry>,
    qualifier: Vec<TableEntry>,
}

/// Immutable `(category, key) -> Clip` lookup table, shared read-only by the
/// composer and the scheduler for the life of the engine.
#[derive(Debug)]
pub struct ClipCatalog {
    clips: HashMap<(Category, u32), Clip>,
}

impl ClipCatalog {
    /// Load the embedded timestamp table.
    pub fn load() -> Result<Self> {
        let table: ClipTable =
            serde_json::from_str(CLIP_TABLE_JSON).context("Failed to parse clip table")?;
        Self::from_table(table)
    }

    /// Load a timestamp table from a JSON document, for recordings segmented
    /// differently from the stock asset.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: ClipTable = serde_json::from_str(json).context("Failed to parse clip table")?;
        Self::from_table(table)
    }

    fn from_table(table: ClipTable) -> Result<Self> {
        let mut clips = HashMap::new();
        for (category, entries) in [
            (Category::Misc, &table.misc),
            (Category::Square, &table.square),
            (Category::Piece, &table.piece),
            (Category::Capture, &table.capture),
            (Category::Qualifier, &table.qualifier),
        ] {
            insert_category(&mut clips, category, entries)
                .with_context(|| format!("Invalid clip table for {category:?}"))?;
        }
        info!("Clip catalog loaded: {} clips", clips.len());
        Ok(ClipCatalog { clips })
    }

    /// Resolve a clip's time range within the voice asset.
    pub fn lookup(&self, category: Category, key: u32) -> Result<Clip, ClipNotFound> {
        self.clips
            .get(&(category, key))
            .copied()
            .ok_or(ClipNotFound { category, key })
    }

    /// Number of real (non-sentinel) clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

fn insert_category(
    clips: &mut HashMap<(Category, u32), Clip>,
    category: Category,
    entries: &[TableEntry],
) -> Result<()> {
    let Some(last) = entries.last() else {
        bail!("category is empty");
    };
    if last.key != SENTINEL_KEY {
        bail!("category is not sentinel-terminated");
    }
    for pair in entries.windows(2) {
        let (cur, next) = (&pair[0], &pair[1]);
        if cur.key == SENTINEL_KEY {
            bail!("sentinel key {SENTINEL_KEY} appears before the end");
        }
        if next.start <= cur.start {
            bail!("entry for key {} has non-positive duration", cur.key);
        }
        let clip = Clip {
            start: cur.start,
            end: next.start,
        };
        if clips.insert((category, cur.key), clip).is_some() {
            bail!("duplicate key {}", cur.key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let catalog = ClipCatalog::load().unwrap();
        // 10 misc + 81 squares + 14 pieces + 14 capture + 9 qualifiers
        assert_eq!(catalog.len(), 128);
    }

    #[test]
    fn every_clip_has_positive_duration() {
        let catalog = ClipCatalog::load().unwrap();
        for clip in catalog.clips.values() {
            assert!(clip.duration() > 0.0);
        }
    }

    #[test]
    fn all_squares_present() {
        let catalog = ClipCatalog::load().unwrap();
        for file in 1..=9u32 {
            for rank in 1..=9u32 {
                catalog.lookup(Category::Square, file * 10 + rank).unwrap();
            }
        }
    }

    #[test]
    fn misc_and_qualifier_keys_present() {
        let catalog = ClipCatalog::load().unwrap();
        for key in 0..=9 {
            catalog.lookup(Category::Misc, key).unwrap();
        }
        for key in 0..=8 {
            catalog.lookup(Category::Qualifier, key).unwrap();
        }
    }

    #[test]
    fn unknown_key_is_not_found() {
        let catalog = ClipCatalog::load().unwrap();
        let err = catalog.lookup(Category::Square, 0).unwrap_err();
        assert_eq!(err.category, Category::Square);
        assert_eq!(err.key, 0);
    }

    #[test]
    fn sentinel_is_not_a_clip() {
        let catalog = ClipCatalog::load().unwrap();
        assert!(catalog.lookup(Category::Misc, SENTINEL_KEY).is_err());
    }

    #[test]
    fn rejects_unsorted_table() {
        let json = r#"{
            "misc": [
                {"key": 0, "start": 1.0},
                {"key": 1, "start": 0.5},
                {"key": 4294967295, "start": 2.0}
            ],
            "square": [{"key": 4294967295, "start": 0.0}],
            "piece": [{"key": 4294967295, "start": 0.0}],
            "capture": [{"key": 4294967295, "start": 0.0}],
            "qualifier": [{"key": 4294967295, "start": 0.0}]
        }"#;
        assert!(ClipCatalog::from_json(json).is_err());
    }

    #[test]
    fn rejects_missing_sentinel() {
        let json = r#"{
            "misc": [{"key": 0, "start": 0.0}],
            "square": [{"key": 4294967295, "start": 0.0}],
            "piece": [{"key": 4294967295, "start": 0.0}],
            "capture": [{"key": 4294967295, "start": 0.0}],
            "qualifier": [{"key": 4294967295, "start": 0.0}]
        }"#;
        assert!(ClipCatalog::from_json(json).is_err());
    }
}
