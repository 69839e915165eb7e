// src/placeholders.rs
use crate::core::types::{KnowledgeBase, DEFAULT_TIME_FORMAT};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use chrono_tz::Tz;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Date pattern used when the knowledge base leaves `formats.date` blank.
const BLANK_DATE_FORMAT: &str = "%Y-%m-%d";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(\w+)%").expect("placeholder pattern is valid"));

/// Expands `%date%`, `%time%`, `%ainame%`, `%model%`, `%trainer%` and any
/// `%key%` found in the knowledge base's placeholder map. Unknown keys are
/// left as written.
pub fn process_placeholders(answer: &str, kb: &KnowledgeBase) -> String {
    process_placeholders_at(answer, kb, Utc::now())
}

/// [`process_placeholders`] against a fixed clock.
pub fn process_placeholders_at(answer: &str, kb: &KnowledgeBase, now: DateTime<Utc>) -> String {
    let mut text = answer.to_string();

    if text.contains("%date%") || text.contains("%time%") {
        let local = now.with_timezone(&resolve_zone(&kb.formats.timezone, now));
        let date = render(&local, &kb.formats.date, BLANK_DATE_FORMAT);
        let time = render(&local, &kb.formats.time, DEFAULT_TIME_FORMAT);
        text = text.replace("%date%", &date).replace("%time%", &time);
    }

    text = text
        .replace("%ainame%", &kb.ai_name)
        .replace("%model%", &kb.model)
        .replace("%trainer%", &kb.trainer);

    PLACEHOLDER
        .replace_all(&text, |caps: &Captures| match kb.placeholders.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Offset in effect at `now` for `UTC`, `Local`, an IANA zone name such as
/// `Asia/Jakarta`, or a fixed offset like `+07:00`. Anything else is UTC.
fn resolve_zone(name: &str, now: DateTime<Utc>) -> FixedOffset {
    let utc = Utc.fix();
    match name.trim() {
        "" | "UTC" | "utc" | "Z" => utc,
        "Local" | "local" => *now.with_timezone(&Local).offset(),
        other => {
            if let Ok(zone) = other.parse::<Tz>() {
                return now.with_timezone(&zone).offset().fix();
            }
            other.parse().unwrap_or_else(|_| {
                tracing::debug!(zone = other, "unrecognized time zone, using UTC");
                utc
            })
        }
    }
}

/// Formats `at` with `pattern`, falling back to `default` when the pattern is
/// blank or contains an invalid specifier.
fn render(at: &DateTime<FixedOffset>, pattern: &str, default: &str) -> String {
    let valid = !pattern.is_empty()
        && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { default };
    at.format(pattern).to_string()
}
