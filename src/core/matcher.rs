// src/core/matcher.rs
use crate::config::MatchConfig;
use crate::core::index::WeightVector;
use crate::core::scorer::cosine_similarity;
use crate::core::types::{KnowledgeBase, RecordId};

/// A query span accepted as an occurrence of a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanMatch {
    pub record: RecordId,
    /// First token of the span in the (corrected) query.
    pub start: usize,
    pub len: usize,
    pub similarity: f64,
}

/// Greedy left-to-right segmentation of `tokens` into stored records.
///
/// At each position every span length up to `max_span_len` is scored against
/// every record; the best pair is accepted if it beats the threshold, else the
/// position is skipped. Accepted spans are never revisited. Ties keep the
/// first pair seen, so shorter spans and earlier records win.
pub fn find_best_matches<S: AsRef<str>>(
    tokens: &[S],
    kb: &KnowledgeBase,
    config: &MatchConfig,
) -> Vec<SpanMatch> {
    let mut matches = Vec::new();
    let index = kb.index();
    if tokens.is_empty() || index.corpus().is_empty() {
        return matches;
    }

    let weighting = index.weighting();
    let record_vectors: Vec<WeightVector> = index
        .corpus()
        .iter()
        .map(|record_tokens| {
            if record_tokens.is_empty() {
                WeightVector::new()
            } else {
                index.weigh(record_tokens, weighting)
            }
        })
        .collect();

    let mut used = vec![false; tokens.len()];
    let mut start = 0;
    while start < tokens.len() {
        let mut best: Option<SpanMatch> = None;
        let mut highest = 0.0;

        let max_len = config.max_span_len.min(tokens.len() - start);
        for len in 1..=max_len {
            let end = start + len;
            if used[start..end].iter().any(|&u| u) {
                continue;
            }

            let span_vector = index.weigh(&tokens[start..end], weighting);
            for (record, record_vector) in record_vectors.iter().enumerate() {
                let similarity = cosine_similarity(&span_vector, record_vector);
                if similarity > highest {
                    highest = similarity;
                    best = Some(SpanMatch {
                        record,
                        start,
                        len,
                        similarity,
                    });
                }
            }
        }

        match best {
            Some(found) if found.similarity > config.similarity_threshold => {
                tracing::trace!(
                    record = found.record,
                    start = found.start,
                    len = found.len,
                    similarity = found.similarity,
                    "accepted span"
                );
                used[found.start..found.start + found.len].fill(true);
                start += found.len;
                matches.push(found);
            }
            _ => start += 1,
        }
    }

    matches
}
