//! Answer Resolver
//!
//! Stored answers and given answers can each be a choice letter or full
//! text. The resolver decides correctness by trying, in order:
//!
//! 1. Given is a single letter
//!    - stored is a letter too: compare letters
//!    - stored is text: compare it with the choice the given letter points at
//! 2. Given is text
//!    - stored is a letter: compare the given text with the choice it points at
//!    - stored is text: compare directly, then against every set choice
//!
//! When a letter points at an empty slot the letter itself is compared with
//! the other side. All comparisons trim and ignore case.

use crate::question::Question;
use super::{Outcome, ScoringStrategy};

/// Which rule decided an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Question has no stored answer
    NoAnswer,
    /// Given letter compared with stored letter
    LetterToLetter,
    /// Given letter resolved to choice text, compared with stored text
    GivenLetterChoice,
    /// Stored letter resolved to choice text, compared with given text
    StoredLetterChoice,
    /// Letter pointed at an empty slot; compared literally
    LetterFallback,
    /// Given text compared with stored text
    Text,
    /// Given text matched one of the listed choices
    AnyChoice,
}

/// Correctness decision and the rule that made it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgement {
    pub correct: bool,
    pub rule: MatchRule,
}

impl Judgement {
    fn new(correct: bool, rule: MatchRule) -> Self {
        Self { correct, rule }
    }
}

/// Scores answers against canonical questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResolver {
    /// Wrong answers cost the question's value instead of scoring zero
    pub negative_on_wrong: bool,
}

impl Default for AnswerResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AnswerResolver {
    pub fn new(negative_on_wrong: bool) -> Self {
        Self { negative_on_wrong }
    }

    /// Signed point delta for an answer.
    ///
    /// A question without a stored answer always scores 0.
    pub fn resolve(&self, question: &Question, given: Option<&str>) -> i32 {
        self.evaluate(question, given).delta
    }

    /// Decide whether `given` answers `question`
    pub fn judge(&self, question: &Question, given: Option<&str>) -> Judgement {
        let Some(stored) = question.stored_answer() else {
            return Judgement::new(false, MatchRule::NoAnswer);
        };
        let given = given.unwrap_or("").trim();

        let given_is_letter = given.chars().count() == 1;
        let stored_is_letter = stored.chars().count() == 1;

        match (given_is_letter, stored_is_letter) {
            (true, true) => Judgement::new(same_text(given, stored), MatchRule::LetterToLetter),
            (true, false) => match question.choice_for_letter(given) {
                Some(choice) => Judgement::new(same_text(choice, stored), MatchRule::GivenLetterChoice),
                None => Judgement::new(same_text(given, stored), MatchRule::LetterFallback),
            },
            (false, true) => match question.choice_for_letter(stored) {
                Some(choice) => Judgement::new(same_text(choice, given), MatchRule::StoredLetterChoice),
                None => Judgement::new(same_text(stored, given), MatchRule::LetterFallback),
            },
            (false, false) => {
                if same_text(given, stored) {
                    Judgement::new(true, MatchRule::Text)
                } else if question.choices().any(|(_, choice)| same_text(choice, given)) {
                    Judgement::new(true, MatchRule::AnyChoice)
                } else {
                    Judgement::new(false, MatchRule::Text)
                }
            }
        }
    }
}

impl ScoringStrategy for AnswerResolver {
    fn evaluate(&self, question: &Question, given: Option<&str>) -> Outcome {
        let judgement = self.judge(question, given);
        tracing::debug!(
            "Judged answer {:?} for '{}': {:?}",
            given,
            question.short_description(),
            judgement
        );

        let delta = match judgement {
            Judgement { rule: MatchRule::NoAnswer, .. } => 0,
            Judgement { correct: true, .. } => question.value,
            _ if self.negative_on_wrong => question.value.saturating_neg(),
            _ => 0,
        };

        Outcome {
            correct: judgement.correct,
            delta,
        }
    }
}

/// Case-insensitive comparison of trimmed text
fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
