//! Word lists for tree construction
//!
//! Vocabularies are plain newline-separated files; a word's index is its line
//! position after invalid lines are dropped.

pub mod loader;
mod vocabulary;

pub use vocabulary::{Vocabulary, VocabularyError};
