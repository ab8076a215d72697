//! Wordle Decision Trees
//!
//! Builds complete six-guess Wordle strategies as decision trees and verifies them
//! against every answer.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_tree::core::WordleRules;
//! use wordle_tree::table::FeedbackTable;
//! use wordle_tree::tree::{BuildConfig, SearchContext, TreeBuilder};
//! use wordle_tree::verify::TreeVerifier;
//! use wordle_tree::wordlists::{Vocabulary, loader::words_from_slice};
//!
//! let vocab = Vocabulary::symmetric(words_from_slice(&["crane", "slate", "irate", "moist"]))
//!     .unwrap();
//! let table = FeedbackTable::compute(&vocab, &WordleRules);
//!
//! let ctx = SearchContext::new(&vocab, &table, BuildConfig::default()).unwrap();
//! let outcome = TreeBuilder::new(&ctx).build(0);
//! assert!(outcome.is_complete());
//!
//! let report = TreeVerifier::new(&vocab, WordleRules).verify_all(&outcome.tree);
//! assert!(report.within_budget());
//! ```

// Core domain types
pub mod core;

// Feedback table and its binary format
pub mod table;

// Tree search
pub mod tree;

// Tree verification
pub mod verify;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
