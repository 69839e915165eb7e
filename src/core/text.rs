// src/core/text.rs

/// Characters that end a sentence-like segment of a query.
const SEGMENT_BREAKS: [char; 4] = ['.', '?', '!', '\n'];

/// Splits a query into trimmed, non-empty segments on runs of `.`, `?`, `!`
/// and newlines.
pub fn segment(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEGMENT_BREAKS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Lower-cases `text` and splits it on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
