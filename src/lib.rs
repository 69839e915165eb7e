// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod persistence;
pub mod placeholders;

pub use crate::config::MatchConfig;
pub use crate::core::engine::{ChatEngine, SegmentTrace};
pub use crate::core::types::{Hook, KnowledgeBase, Record};
pub use crate::error::{Error, Result};
