/// One timed entry of a transcript track.
///
/// Both bounds are seconds as floating point and may be NaN when the source
/// carried a well-shaped but numerically broken timestamp. Such a segment is
/// kept for display; it just never matches a locate query.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index as declared in the source track. Not validated against the
    /// segment's position, and `None` when the declaration is unparseable.
    pub index: Option<u32>,
    pub start: f64,
    pub end: f64,
    /// Text lines of the block, joined with a single space.
    pub text: String,
    /// The original `"START --> END"` range, retained for display.
    pub time_range: String,
}

impl Segment {
    /// Closed-interval containment test. Always false for NaN bounds.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position <= self.end
    }
}
