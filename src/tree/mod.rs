//! Decision tree construction
//!
//! - [`ordering`]: static and exact guess orderings
//! - [`candidates`]: lazy filter of admissible next guesses
//! - [`builder`]: the depth-bounded recursive search
//! - [`observer`]: hooks for logging and progress reporting
//! - [`node`]: the tree itself and its JSON form

pub mod builder;
pub mod candidates;
pub mod node;
pub mod observer;
pub mod ordering;
pub mod path;

pub use builder::{BuildConfig, BuildOutcome, MAX_GUESSES, SearchContext, TreeBuilder};
pub use candidates::{CandidateFilter, black_letters};
pub use node::DecisionTree;
pub use observer::{
    AbandonedBranch, LogObserver, NextGuessStrategy, NoopObserver, ProgressObserver,
    SearchObserver,
};
pub use ordering::{
    ClusterHeuristic, GuessOrder, ScoreScope, cluster_score, first_perfect_splitter,
    score_guesses,
};
pub use path::SearchPath;
