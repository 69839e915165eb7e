// src/core/resolver.rs
use crate::core::matcher::SpanMatch;
use crate::core::types::KnowledgeBase;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Picks one answer per matched record and joins them with single spaces.
///
/// A record with a hook draws from the hook's pool; otherwise it draws from
/// its own answers. Unknown hooks and empty pools contribute nothing, not an
/// empty string, so the result never holds doubled or trailing spaces.
pub fn resolve_answers<R: Rng + ?Sized>(
    matches: &[SpanMatch],
    kb: &KnowledgeBase,
    rng: &mut R,
) -> String {
    let mut picked: Vec<&str> = Vec::with_capacity(matches.len());

    for found in matches {
        let Some(record) = kb.record(found.record) else {
            continue;
        };
        let pool = match &record.hook {
            Some(name) => match kb.hooks.get(name) {
                Some(hook) => &hook.answers,
                None => {
                    tracing::debug!(hook = %name, "record refers to an unknown hook");
                    continue;
                }
            },
            None => &record.answers,
        };
        if let Some(answer) = pool.choose(rng) {
            picked.push(answer);
        }
    }

    picked.join(" ")
}
