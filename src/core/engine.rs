use crate::config::MatchConfig;
use crate::core::matcher::{find_best_matches, SpanMatch};
use crate::core::resolver::resolve_answers;
use crate::core::text::{segment, tokenize};
use crate::core::types::KnowledgeBase;
use crate::error::{Error, Result};
use crate::fuzzy::SpellCorrector;
use crate::learning::{LearningEngine, TrainOutcome, TrainingExample};
use crate::persistence::{load_from_disk, save_to_disk};
use crate::placeholders::process_placeholders;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// How one query segment was read and what it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTrace {
    pub segment: String,
    pub tokens: Vec<String>,
    /// `tokens` after spelling correction; the matcher sees these.
    pub corrected: Vec<String>,
    pub matches: Vec<SpanMatch>,
}

/// Runs segmentation, correction and matching for every segment of `query`.
pub fn trace_query(
    query: &str,
    kb: &KnowledgeBase,
    corrector: &SpellCorrector,
    config: &MatchConfig,
) -> Vec<SegmentTrace> {
    segment(query)
        .map(|part| {
            let tokens = tokenize(part);
            let corrected = corrector.correct_input(&tokens, kb.index().vocabulary());
            let matches = find_best_matches(&corrected, kb, config);
            SegmentTrace {
                segment: part.to_string(),
                tokens,
                corrected,
                matches,
            }
        })
        .collect()
}

/// Answers `query` from `kb`, drawing random answer choices from `rng`.
///
/// Returns the fallback text verbatim when no segment matches anything.
pub fn answer_query<R: Rng + ?Sized>(
    query: &str,
    kb: &KnowledgeBase,
    corrector: &SpellCorrector,
    config: &MatchConfig,
    rng: &mut R,
) -> String {
    let matches: Vec<SpanMatch> = trace_query(query, kb, corrector, config)
        .into_iter()
        .flat_map(|t| t.matches)
        .collect();

    if matches.is_empty() {
        tracing::debug!(query, "no match, using fallback");
        return kb.fallbacks.noanswer.clone();
    }
    process_placeholders(&resolve_answers(&matches, kb, rng), kb)
}

// The chat engine owns the knowledge base plus everything needed to train it,
// query it and write it back. Record changes go through `train` so the index
// never lags behind the records.
pub struct ChatEngine {
    knowledge_base: KnowledgeBase,
    config: MatchConfig,
    corrector: SpellCorrector,
    learning_engine: LearningEngine,
    rng: StdRng,
    storage_path: Option<PathBuf>,
}

impl Default for ChatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatEngine {
    pub fn new() -> Self {
        Self::with_knowledge_base(KnowledgeBase::new())
    }

    pub fn with_knowledge_base(mut knowledge_base: KnowledgeBase) -> Self {
        knowledge_base.rebuild_index();
        let config = MatchConfig::default();
        Self {
            knowledge_base,
            corrector: SpellCorrector::new(config.max_edit_distance, config.edit_distance_ceiling),
            config,
            learning_engine: LearningEngine::new(),
            rng: StdRng::from_os_rng(),
            storage_path: None,
        }
    }

    /// Loads the knowledge base at `path` (empty if the file does not exist)
    /// and binds the engine to it for [`ChatEngine::save`].
    pub fn from_file_or_new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut engine = Self::with_knowledge_base(load_from_disk(path)?);
        engine.storage_path = Some(path.to_path_buf());
        Ok(engine)
    }

    /// Replaces the random source with a seeded one so answer choices repeat.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.corrector = SpellCorrector::new(config.max_edit_distance, config.edit_distance_ceiling);
        self.config = config;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    pub fn ask(&mut self, query: &str) -> String {
        answer_query(
            query,
            &self.knowledge_base,
            &self.corrector,
            &self.config,
            &mut self.rng,
        )
    }

    /// Per-segment breakdown of how `query` would be matched.
    pub fn explain(&self, query: &str) -> Vec<SegmentTrace> {
        trace_query(query, &self.knowledge_base, &self.corrector, &self.config)
    }

    pub fn train(&mut self, question: &str, answers: Vec<String>, hook: &str) -> TrainOutcome {
        let example = TrainingExample {
            question: question.to_string(),
            answers,
            hook: (!hook.is_empty()).then(|| hook.to_string()),
        };
        self.learning_engine.learn(&mut self.knowledge_base, example)
    }

    pub fn add_hook(&mut self, name: &str, answers: Vec<String>) {
        self.learning_engine
            .add_hook(&mut self.knowledge_base, name, answers);
    }

    pub fn add_placeholder(&mut self, key: &str, value: &str) {
        self.learning_engine
            .add_placeholder(&mut self.knowledge_base, key, value);
    }

    /// Writes the knowledge base back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.storage_path {
            Some(path) => save_to_disk(&self.knowledge_base, path),
            None => Err(Error::NoStoragePath),
        }
    }
}
