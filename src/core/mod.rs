// src/core/mod.rs

pub mod engine;
pub mod index;
pub mod matcher;
pub mod resolver;
pub mod scorer;
pub mod text;
pub mod types;
