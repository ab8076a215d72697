//! Feedback oracles
//!
//! An oracle answers "what feedback does this guess get against this answer".
//! The verifier only talks to the trait, so a tree can be replayed against rules
//! other than the ones used to build its table.

use super::{Feedback, Word};

/// Source of truth for feedback during verification
pub trait FeedbackOracle {
    fn feedback(&self, guess: &Word, answer: &Word) -> Feedback;
}

/// Standard Wordle rules, including duplicate-letter handling
#[derive(Debug, Clone, Copy, Default)]
pub struct WordleRules;

impl FeedbackOracle for WordleRules {
    #[inline]
    fn feedback(&self, guess: &Word, answer: &Word) -> Feedback {
        Feedback::calculate(guess, answer)
    }
}

impl<F> FeedbackOracle for F
where
    F: Fn(&Word, &Word) -> Feedback,
{
    fn feedback(&self, guess: &Word, answer: &Word) -> Feedback {
        self(guess, answer)
    }
}
