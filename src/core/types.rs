// src/core/types.rs
use crate::core::index::FrequencyIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Position of a record in [`KnowledgeBase::records`].
pub type RecordId = usize;

pub const DEFAULT_AI_NAME: &str = "Beo Talk";
pub const DEFAULT_MODEL: &str = "BEE";
pub const DEFAULT_TRAINER: &str = "You";
pub const DEFAULT_NO_ANSWER: &str = "I'm sorry, I don't know the answer to that.";
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// A stored question pattern together with its answers.
///
/// Identity is the exact `question` text: training with the same text extends
/// this record instead of creating a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
    /// Name of a [`Hook`] whose answers replace `answers` at answer time.
    #[serde(default)]
    pub hook: Option<String>,
}

impl Record {
    pub fn new(question: impl Into<String>, answers: Vec<String>, hook: Option<String>) -> Self {
        Self {
            question: question.into(),
            answers,
            hook: hook.filter(|h| !h.is_empty()),
        }
    }
}

/// A named answer pool shared by any number of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(default)]
    pub answers: Vec<String>,
}

/// strftime patterns and zone used for `%date%` and `%time%`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formats {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// `UTC`, `Local`, an IANA name such as `Asia/Jakarta`, or a fixed
    /// offset such as `+07:00`.
    #[serde(default)]
    pub timezone: String,
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
            timezone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallbacks {
    #[serde(default)]
    pub noanswer: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            noanswer: DEFAULT_NO_ANSWER.to_string(),
        }
    }
}

/// The whole trainable state of a bot.
///
/// Everything except `index` is persisted. The index (vocabulary, corpus and
/// IDF table) is derived from `records` and rebuilt in full after every
/// mutation of the record set, so records are only added or changed through
/// [`crate::learning::LearningEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    #[serde(rename = "name")]
    pub ai_name: String,
    pub model: String,
    pub trainer: String,
    pub fallbacks: Fallbacks,
    pub formats: Formats,
    pub placeholders: BTreeMap<String, String>,
    #[serde(rename = "questions")]
    records: Vec<Record>,
    pub hooks: BTreeMap<String, Hook>,

    #[serde(skip)]
    index: FrequencyIndex,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            ai_name: DEFAULT_AI_NAME.to_string(),
            model: DEFAULT_MODEL.to_string(),
            trainer: DEFAULT_TRAINER.to_string(),
            fallbacks: Fallbacks::default(),
            formats: Formats::default(),
            placeholders: BTreeMap::new(),
            records: Vec::new(),
            hooks: BTreeMap::new(),
            index: FrequencyIndex::default(),
        }
    }
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived vocabulary, corpus and IDF table for the current records.
    pub fn index(&self) -> &FrequencyIndex {
        &self.index
    }

    /// Recomputes the derived index from scratch.
    pub fn rebuild_index(&mut self) {
        self.index = FrequencyIndex::build(&self.records);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Appends `record`. The caller rebuilds the index afterwards.
    pub(crate) fn push_record(&mut self, record: Record) -> RecordId {
        self.records.push(record);
        self.records.len() - 1
    }

    /// The caller rebuilds the index after changing a question.
    pub(crate) fn record_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.get_mut(id)
    }

    pub fn find_record(&self, question: &str) -> Option<RecordId> {
        self.records.iter().position(|r| r.question == question)
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    /// Restores defaults for sections a stored snapshot left blank, then
    /// rebuilds the index. Called after every load.
    pub(crate) fn normalize(&mut self) {
        if self.formats.date.is_empty()
            && self.formats.time.is_empty()
            && self.formats.timezone.is_empty()
        {
            self.formats = Formats::default();
        }
        if self.fallbacks.noanswer.is_empty() {
            self.fallbacks = Fallbacks::default();
        }
        for record in &mut self.records {
            if record.hook.as_deref() == Some("") {
                record.hook = None;
            }
        }
        self.rebuild_index();
    }
}
