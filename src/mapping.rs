//! The collection mapping file: one JSON blob describing every sermon in a
//! collection, with per-sermon bible verses, hymns and themes. Verse and hymn
//! entries are either a bare string or an object carrying a `timecode` range
//! into the audio; both shapes occur in real mapping files.

use crate::timecode;

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Collection {
    pub transcripts: Vec<Sermon>,
}

impl Collection {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Collection> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .context(format!("Failed to read mapping file: '{}'", path.display()))?;
        serde_json::from_str(&data)
            .context(format!("Failed to parse mapping file: '{}'", path.display()))
    }
}

#[derive(Debug, Deserialize)]
pub struct Sermon {
    pub title: String,
    pub file: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub bible_verses: Vec<TimedItem>,
    #[serde(default)]
    pub hymns_songs: Vec<TimedItem>,
    #[serde(default)]
    pub themes: Vec<String>,
}

/// A point of interest on the progress bar, as a percentage of the duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub percent: f64,
    pub text: String,
}

impl Sermon {
    /// Progress-bar markers for every explicitly timecoded verse and hymn.
    ///
    /// Empty when the duration is unknown. Items whose timecode does not
    /// parse are skipped rather than placed at a NaN position.
    pub fn markers(&self, duration: f64) -> Vec<Marker> {
        if !duration.is_finite() || duration <= 0.0 {
            return Vec::new();
        }
        self.bible_verses
            .iter()
            .chain(self.hymns_songs.iter())
            .filter_map(|item| match item {
                TimedItem::Timed { text, .. } => {
                    let start = item.start_seconds();
                    if start.is_finite() {
                        Some(Marker {
                            percent: start / duration * 100.0,
                            text: text.clone(),
                        })
                    } else {
                        debug!("skipping marker with unparseable timecode: {:?}", text);
                        None
                    }
                }
                TimedItem::Plain(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TimedItem {
    Timed { timecode: String, text: String },
    Plain(String),
}

impl TimedItem {
    pub fn text(&self) -> &str {
        match self {
            TimedItem::Timed { text, .. } => text,
            TimedItem::Plain(text) => text,
        }
    }

    /// Start of the item's range in seconds.
    ///
    /// Plain items carry no timecode and count as the start of the sermon.
    /// A timecode that does not parse comes back as NaN, the codec's usual
    /// failure mode; display code tolerates it, marker placement skips it.
    pub fn start_seconds(&self) -> f64 {
        match self {
            TimedItem::Timed { timecode, .. } => {
                let start = timecode.split(" --> ").next().unwrap_or_default();
                timecode::parse(start)
            }
            TimedItem::Plain(_) => 0.0,
        }
    }
}
