//! Engine module - answer tracking, scoring and ranking

pub mod assessment;
pub mod scoring;

pub use assessment::{AnswerSet, AssessmentEngine};
pub use scoring::ScoreCalculator;
