// src/fuzzy/mod.rs

pub mod corrector;

pub use corrector::{levenshtein, SpellCorrector};
