//! End-to-end behaviour of `ChatEngine` through train / ask / save.

use beo_core::core::types::DEFAULT_NO_ANSWER;
use beo_core::{ChatEngine, KnowledgeBase};

fn answers(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

#[test]
fn exact_question_returns_its_answer() {
    let mut engine = ChatEngine::new();
    engine.train("What is your name?", answers(&["My name is TestBot."]), "");
    assert_eq!(engine.ask("What is your name?"), "My name is TestBot.");
}

#[test]
fn single_typo_is_corrected() {
    let mut engine = ChatEngine::new();
    engine.train("What is your name?", answers(&["My name is TestBot."]), "");
    assert_eq!(engine.ask("what is your nam?"), "My name is TestBot.");
}

#[test]
fn empty_knowledge_base_returns_fallback() {
    let mut engine = ChatEngine::new();
    assert_eq!(engine.ask("anything"), DEFAULT_NO_ANSWER);
    assert_eq!(engine.ask(""), DEFAULT_NO_ANSWER);
    assert_eq!(engine.ask("?!."), DEFAULT_NO_ANSWER);
}

#[test]
fn custom_fallback_is_returned_verbatim() {
    let mut kb = KnowledgeBase::new();
    kb.fallbacks.noanswer = "No idea, %ainame% here.".into();
    let mut engine = ChatEngine::with_knowledge_base(kb);
    engine.train("ping", answers(&["pong"]), "");
    assert_eq!(engine.ask("zebra"), "No idea, %ainame% here.");
}

#[test]
fn hook_answers_come_from_the_pool() {
    let mut engine = ChatEngine::new().with_seed(11);
    engine.add_hook("greet", answers(&["Hi", "Hello"]));
    engine.train("hi", vec![], "greet");
    for _ in 0..25 {
        let answer = engine.ask("hi");
        assert!(answer == "Hi" || answer == "Hello", "unexpected {answer:?}");
    }
}

#[test]
fn similar_records_are_disambiguated() {
    let mut engine = ChatEngine::new();
    engine.train("capital of France?", answers(&["Paris"]), "");
    engine.train("capital of Spain?", answers(&["Madrid"]), "");
    let answer = engine.ask("capital of France?");
    assert_eq!(answer, "Paris");
    assert!(!answer.contains("Madrid"));
    assert_eq!(engine.ask("capital of Spain?"), "Madrid");
}

#[test]
fn single_record_matches_any_shared_token() {
    let mut engine = ChatEngine::new();
    engine.train("tell me a joke", answers(&["Knock knock."]), "");
    for query in ["joke", "tell", "please tell", "a joke now"] {
        assert_eq!(engine.ask(query), "Knock knock.", "query {query:?}");
    }
}

#[test]
fn retraining_adds_only_new_answers() {
    let mut engine = ChatEngine::new().with_seed(3);
    engine.train("how are you", answers(&["Fine"]), "");
    engine.train("how are you", answers(&["Fine", "Great"]), "");
    let record = &engine.knowledge_base().records()[0];
    assert_eq!(record.answers, ["Fine", "Great"]);
    for _ in 0..10 {
        let answer = engine.ask("how are you");
        assert!(answer == "Fine" || answer == "Great");
    }
}

#[test]
fn seeded_engines_agree() {
    let build = || {
        let mut engine = ChatEngine::new().with_seed(99);
        engine.train("roll", answers(&["1", "2", "3", "4", "5", "6"]), "");
        engine
    };
    let (mut a, mut b) = (build(), build());
    let rolls_a: Vec<String> = (0..10).map(|_| a.ask("roll")).collect();
    let rolls_b: Vec<String> = (0..10).map(|_| b.ask("roll")).collect();
    assert_eq!(rolls_a, rolls_b);
}

#[test]
fn saved_model_answers_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let mut engine = ChatEngine::from_file_or_new(&path).unwrap();
    engine.train("What is AI?", answers(&["Artificial Intelligence"]), "");
    engine.add_hook("greet", answers(&["Hello"]));
    engine.train("hello", vec![], "greet");
    engine.add_placeholder("owner", "Rina");
    engine.save().unwrap();

    let mut reloaded = ChatEngine::from_file_or_new(&path).unwrap();
    assert_eq!(reloaded.storage_path(), Some(path.as_path()));
    assert_eq!(reloaded.knowledge_base().records().len(), 2);
    assert_eq!(reloaded.knowledge_base().placeholders["owner"], "Rina");
    assert_eq!(reloaded.ask("what is ai"), "Artificial Intelligence");
    assert_eq!(reloaded.ask("hello"), "Hello");
}

#[test]
fn malformed_model_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "questions: [yaml, not json]").unwrap();
    assert!(ChatEngine::from_file_or_new(&path).is_err());
}
