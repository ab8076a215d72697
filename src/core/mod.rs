//! Core domain types
//!
//! Words, feedback codes and the oracle that relates them. Everything here is
//! independent of vocabularies and of the search.

mod feedback;
mod oracle;
mod word;

pub use feedback::{Feedback, LetterFeedback, NUM_CODES};
pub use oracle::{FeedbackOracle, WordleRules};
pub use word::{WORD_LENGTH, Word, WordError, letter_bit};
