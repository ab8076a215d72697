//! Guess ordering heuristics
//!
//! Both orderings score a guess by the clusters its feedback induces over a set of
//! answers and sort ascending, ties broken by guess index:
//! - the static order scores over the whole answer vocabulary, once per run
//! - the exact order scores over the answers still possible at a node
//!
//! The exact order is far more accurate for the node at hand but costs a full pass
//! over every guess, so the builder only uses it near the root.

use crate::core::NUM_CODES;
use crate::table::FeedbackTable;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Statistic taken over a guess's clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterHeuristic {
    /// Average cluster size: answers / distinct codes
    MeanCluster,
    /// Largest cluster size
    WorstCluster,
}

/// Answers a score is computed over
#[derive(Debug, Clone, Copy)]
pub enum ScoreScope<'a> {
    /// Every answer in the table
    Vocabulary,
    /// Only these answer indices
    Answers(&'a [usize]),
}

fn cluster_counts(table: &FeedbackTable, guess: usize, scope: ScoreScope) -> [usize; NUM_CODES] {
    match scope {
        ScoreScope::Vocabulary => table.code_counts(guess),
        ScoreScope::Answers(answers) => {
            let row = table.row(guess);
            let mut counts = [0; NUM_CODES];
            for &answer in answers {
                counts[row[answer].index()] += 1;
            }
            counts
        }
    }
}

/// Score one guess; lower is better
///
/// # Examples
/// ```
/// use wordle_tree::core::WordleRules;
/// use wordle_tree::table::FeedbackTable;
/// use wordle_tree::tree::{ClusterHeuristic, ScoreScope, cluster_score};
/// use wordle_tree::wordlists::{Vocabulary, loader::words_from_slice};
///
/// let vocab = Vocabulary::symmetric(words_from_slice(&["crane", "slate", "irate"])).unwrap();
/// let table = FeedbackTable::compute(&vocab, &WordleRules);
///
/// // every answer gives "crane" a different code
/// let mean = cluster_score(&table, 0, ScoreScope::Vocabulary, ClusterHeuristic::MeanCluster);
/// assert_eq!(mean, 1.0);
/// ```
#[must_use]
pub fn cluster_score(
    table: &FeedbackTable,
    guess: usize,
    scope: ScoreScope,
    heuristic: ClusterHeuristic,
) -> f64 {
    let counts = cluster_counts(table, guess, scope);
    match heuristic {
        ClusterHeuristic::MeanCluster => {
            let total: usize = counts.iter().sum();
            let distinct = counts.iter().filter(|&&count| count > 0).count();
            if distinct == 0 {
                0.0
            } else {
                total as f64 / distinct as f64
            }
        }
        ClusterHeuristic::WorstCluster => counts.iter().copied().max().unwrap_or(0) as f64,
    }
}

/// Score every guess in the table, in parallel
#[must_use]
pub fn score_guesses(
    table: &FeedbackTable,
    scope: ScoreScope,
    heuristic: ClusterHeuristic,
) -> Vec<f64> {
    (0..table.num_guesses())
        .into_par_iter()
        .map(|guess| cluster_score(table, guess, scope, heuristic))
        .collect()
}

/// First guess, by index, that leaves at most one answer per feedback code
///
/// At depth 4 such a guess guarantees the sixth guess is always correct. Taking the
/// first one rather than the one with the best expected depth trades tree quality
/// for search speed.
#[must_use]
pub fn first_perfect_splitter(table: &FeedbackTable, answers: &[usize]) -> Option<usize> {
    (0..table.num_guesses()).into_par_iter().position_first(|guess| {
        let row = table.row(guess);
        let mut seen = [false; NUM_CODES];
        answers.iter().all(|&answer| {
            let slot = &mut seen[row[answer].index()];
            !std::mem::replace(slot, true)
        })
    })
}

/// Guesses sorted by heuristic score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessOrder {
    heuristic: ClusterHeuristic,
    /// [`FeedbackTable::vocabulary`] of the table it was ranked on
    vocabulary: u64,
    num_answers: usize,
    scores: Vec<f64>,
    order: Vec<usize>,
}

impl GuessOrder {
    /// Score and sort all guesses over `scope`
    #[must_use]
    pub fn rank(table: &FeedbackTable, scope: ScoreScope, heuristic: ClusterHeuristic) -> Self {
        let scores = score_guesses(table, scope, heuristic);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        let num_answers = match scope {
            ScoreScope::Vocabulary => table.num_answers(),
            ScoreScope::Answers(answers) => answers.len(),
        };
        Self {
            heuristic,
            vocabulary: table.vocabulary(),
            num_answers,
            scores,
            order,
        }
    }

    /// Mean-cluster order over the whole vocabulary
    #[must_use]
    pub fn static_order(table: &FeedbackTable) -> Self {
        Self::rank(table, ScoreScope::Vocabulary, ClusterHeuristic::MeanCluster)
    }

    /// Mean-cluster order over the answers still possible at a node
    #[must_use]
    pub fn exact_order(table: &FeedbackTable, answers: &[usize]) -> Self {
        Self::rank(table, ScoreScope::Answers(answers), ClusterHeuristic::MeanCluster)
    }

    /// Guess indices, best first
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    #[must_use]
    pub fn score(&self, guess: usize) -> Option<f64> {
        self.scores.get(guess).copied()
    }

    #[must_use]
    pub const fn heuristic(&self) -> ClusterHeuristic {
        self.heuristic
    }

    /// Whether a cached order was computed for this table's word lists
    #[must_use]
    pub fn matches(&self, table: &FeedbackTable) -> bool {
        self.vocabulary == table.vocabulary()
            && self.scores.len() == table.num_guesses()
            && self.order.len() == table.num_guesses()
            && self.num_answers == table.num_answers()
    }

    /// Cache the order as JSON
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)
    }

    /// Load an order cached with [`GuessOrder::save`]
    ///
    /// # Errors
    /// Returns an I/O error if the file is missing or not a valid cache.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
