//! Answer scoring
//!
//! A `ScoringStrategy` turns a (question, given answer) pair into a signed
//! point delta. The built-in strategy is the `AnswerResolver`.

pub mod resolver;

pub use resolver::{AnswerResolver, MatchRule, Judgement};

use crate::question::Question;

/// Result of scoring one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the answer was judged correct
    pub correct: bool,
    /// Points to add to the player's score (may be negative)
    pub delta: i32,
}

/// Trait for scoring strategies
pub trait ScoringStrategy: Send + Sync {
    /// Judge an answer and compute the point delta
    fn evaluate(&self, question: &Question, given: Option<&str>) -> Outcome;

    /// Point delta only
    fn score(&self, question: &Question, given: Option<&str>) -> i32 {
        self.evaluate(question, given).delta
    }
}
