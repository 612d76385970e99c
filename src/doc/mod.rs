//! Example engine descriptions
pub mod inline_four_engine;
