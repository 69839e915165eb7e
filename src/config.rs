// src/config.rs

/// Longest token span the matcher will try at one position.
pub const MAX_SPAN_LEN: usize = 10;
/// A span must score strictly above this to be accepted.
pub const SIMILARITY_THRESHOLD: f64 = 0.1;
/// Largest edit distance a spelling correction may bridge.
pub const MAX_EDIT_DISTANCE: usize = 2;
/// Corrections are only considered below this distance.
pub const EDIT_DISTANCE_CEILING: usize = 5;

/// Tunables of the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub max_span_len: usize,
    pub similarity_threshold: f64,
    pub max_edit_distance: usize,
    pub edit_distance_ceiling: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_span_len: MAX_SPAN_LEN,
            similarity_threshold: SIMILARITY_THRESHOLD,
            max_edit_distance: MAX_EDIT_DISTANCE,
            edit_distance_ceiling: EDIT_DISTANCE_CEILING,
        }
    }
}
