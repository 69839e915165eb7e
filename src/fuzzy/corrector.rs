// File: src/fuzzy/corrector.rs
use crate::config::{EDIT_DISTANCE_CEILING, MAX_EDIT_DISTANCE};

/// Levenshtein distance over Unicode scalar values, unit cost for insertion,
/// deletion and substitution.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Maps noisy tokens onto the closest vocabulary entry.
#[derive(Debug, Clone, Copy)]
pub struct SpellCorrector {
    max_edit_distance: usize,
    distance_ceiling: usize,
}

impl Default for SpellCorrector {
    fn default() -> Self {
        Self::new(MAX_EDIT_DISTANCE, EDIT_DISTANCE_CEILING)
    }
}

impl SpellCorrector {
    pub fn new(max_edit_distance: usize, distance_ceiling: usize) -> Self {
        Self {
            max_edit_distance,
            distance_ceiling,
        }
    }

    /// Returns the vocabulary entry nearest to `token`, or `token` itself when
    /// nothing is within the allowed distance.
    ///
    /// Ties go to the earliest entry, so a sorted vocabulary gives stable
    /// corrections.
    pub fn correct_word(&self, token: &str, vocabulary: &[String]) -> String {
        let token_len = token.chars().count();
        let mut min_distance = self.distance_ceiling;
        let mut corrected = token;

        for entry in vocabulary {
            // Length difference is a lower bound on the distance.
            if token_len.abs_diff(entry.chars().count()) > self.max_edit_distance {
                continue;
            }
            let distance = levenshtein(token, entry);
            if distance < min_distance && distance <= self.max_edit_distance {
                min_distance = distance;
                corrected = entry.as_str();
                if distance == 0 {
                    break;
                }
            }
        }

        if corrected != token {
            tracing::trace!(from = token, to = corrected, distance = min_distance, "corrected token");
        }
        corrected.to_owned()
    }

    /// Corrects every token independently, preserving order and length.
    pub fn correct_input<S: AsRef<str>>(&self, tokens: &[S], vocabulary: &[String]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| self.correct_word(t.as_ref(), vocabulary))
            .collect()
    }
}
