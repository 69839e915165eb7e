// File: src/learning.rs
use crate::core::types::{Hook, KnowledgeBase, Record, RecordId};

/// One `train` call: a question with answers and/or a hook name.
pub struct TrainingExample {
    pub question: String,
    pub answers: Vec<String>,
    /// Empty or `None` means the record answers directly.
    pub hook: Option<String>,
}

/// What a training call did to the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainOutcome {
    Inserted(RecordId),
    /// The question already existed; `added` new answers were appended.
    Extended { record: RecordId, added: usize },
}

/// Applies training mutations to a knowledge base and keeps its derived
/// index in step with the record set.
#[derive(Debug, Default)]
pub struct LearningEngine;

impl LearningEngine {
    pub fn new() -> Self {
        Self
    }

    /// Upserts a record keyed by its exact question text.
    ///
    /// An existing record only gains answers it does not already have; its
    /// hook is left as it was. The index is rebuilt either way.
    pub fn learn(&self, kb: &mut KnowledgeBase, example: TrainingExample) -> TrainOutcome {
        let outcome = match kb.find_record(&example.question) {
            Some(id) => {
                let mut added = 0;
                if let Some(record) = kb.record_mut(id) {
                    for answer in example.answers {
                        if !record.answers.contains(&answer) {
                            record.answers.push(answer);
                            added += 1;
                        }
                    }
                }
                TrainOutcome::Extended { record: id, added }
            }
            None => TrainOutcome::Inserted(kb.push_record(Record::new(
                example.question,
                example.answers,
                example.hook,
            ))),
        };

        kb.rebuild_index();
        tracing::debug!(?outcome, records = kb.records().len(), "trained");
        outcome
    }

    /// Inserts or replaces a named hook. Hooks are resolved at answer time, so
    /// the index is untouched.
    pub fn add_hook(&self, kb: &mut KnowledgeBase, name: &str, answers: Vec<String>) {
        kb.hooks.insert(name.to_string(), Hook { answers });
        tracing::debug!(hook = name, "hook stored");
    }

    pub fn add_placeholder(&self, kb: &mut KnowledgeBase, key: &str, value: &str) {
        kb.placeholders.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(question: &str, answers: &[&str], hook: Option<&str>) -> TrainingExample {
        TrainingExample {
            question: question.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            hook: hook.map(str::to_string),
        }
    }

    #[test]
    fn inserts_then_extends_without_duplicates() {
        let engine = LearningEngine::new();
        let mut kb = KnowledgeBase::new();

        let first = engine.learn(&mut kb, example("Who are you?", &["A bot"], None));
        assert_eq!(first, TrainOutcome::Inserted(0));

        let second = engine.learn(
            &mut kb,
            example("Who are you?", &["A bot", "Beo"], Some("ignored")),
        );
        assert_eq!(second, TrainOutcome::Extended { record: 0, added: 1 });
        assert_eq!(kb.records().len(), 1);
        assert_eq!(kb.records()[0].answers, ["A bot", "Beo"]);
        assert_eq!(kb.records()[0].hook, None);
    }

    #[test]
    fn identity_is_case_sensitive() {
        let engine = LearningEngine::new();
        let mut kb = KnowledgeBase::new();
        engine.learn(&mut kb, example("hello", &["a"], None));
        engine.learn(&mut kb, example("Hello", &["b"], None));
        assert_eq!(kb.records().len(), 2);
        assert_eq!(kb.index().vocabulary(), ["hello"]);
        assert_eq!(kb.index().corpus().len(), 2);
    }

    #[test]
    fn every_training_call_rebuilds_the_index() {
        let engine = LearningEngine::new();
        let mut kb = KnowledgeBase::new();
        engine.learn(&mut kb, example("red apple", &["x"], None));
        assert_eq!(kb.index().idf()["red"], 0.0);

        engine.learn(&mut kb, example("green apple", &["y"], None));
        let idf = kb.index().idf();
        assert_eq!(idf["apple"], 0.0);
        assert!((idf["red"] - 2f64.ln()).abs() < 1e-12);
        assert_eq!(kb.index().vocabulary(), ["apple", "green", "red"]);
    }

    #[test]
    fn hooks_and_placeholders_are_replaced() {
        let engine = LearningEngine::new();
        let mut kb = KnowledgeBase::new();
        engine.add_hook(&mut kb, "greet", vec!["Hi".into()]);
        engine.add_hook(&mut kb, "greet", vec!["Hello".into(), "Hey".into()]);
        engine.add_placeholder(&mut kb, "name", "Beo");
        engine.add_placeholder(&mut kb, "name", "TestBot");
        assert_eq!(kb.hooks["greet"].answers, ["Hello", "Hey"]);
        assert_eq!(kb.placeholders["name"], "TestBot");
    }
}
