//! Maps a playback position to the active segment of a track.

use crate::segment::Segment;

/// Returns the first segment whose closed interval contains `position`.
///
/// First in declaration order, not best fit: tracks may contain overlapping
/// or gapped intervals, and the earliest-declared match wins the tie.
/// Segments with NaN bounds never match. Pure, stateless, linear scan.
pub fn find_active(segments: &[Segment], position: f64) -> Option<&Segment> {
    segments.iter().find(|segment| segment.contains(position))
}

/// Tracks which segment is currently highlighted across position updates.
///
/// Locate queries arrive on every playback tick, so the caller needs to know
/// when the active segment actually changed instead of re-rendering each
/// time. `update` reports a segment exactly once, on the transition into it.
/// Moving into a gap between segments keeps the previous one highlighted;
/// only a different matching segment displaces it.
#[derive(Debug, Default)]
pub struct Highlighter {
    active: Option<usize>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the current highlight. Call when switching tracks.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// The currently highlighted segment, if any.
    pub fn active<'a>(&self, segments: &'a [Segment]) -> Option<&'a Segment> {
        self.active.and_then(|i| segments.get(i))
    }

    /// Feeds a new playback position. Returns the newly active segment on
    /// the tick where the highlight changes, `None` otherwise.
    pub fn update<'a>(&mut self, segments: &'a [Segment], position: f64) -> Option<&'a Segment> {
        let hit = segments.iter().position(|segment| segment.contains(position));
        match hit {
            Some(i) if self.active != Some(i) => {
                self.active = Some(i);
                segments.get(i)
            }
            _ => None,
        }
    }
}
