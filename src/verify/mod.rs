//! Tree verification
//!
//! Replays a decision tree against every answer: guess, score with the oracle,
//! follow the action for that feedback, until the guess is the answer. Feedback is
//! recomputed from the words rather than read from a table, so a tree built from a
//! faulty table is caught here.

use crate::core::{Feedback, FeedbackOracle};
use crate::tree::{DecisionTree, MAX_GUESSES};
use crate::wordlists::Vocabulary;
use std::collections::BTreeMap;
use std::fmt;

/// Why an answer could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The tree names a guess index outside the vocabulary
    UnknownGuess(usize),
    /// The tree has no action for the feedback observed along `path`
    MissingBranch {
        answer: String,
        hint: String,
        path: Vec<String>,
    },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGuess(index) => write!(f, "Tree uses unknown guess index {index}"),
            Self::MissingBranch { answer, hint, path } => write!(
                f,
                "No branch for answer '{answer}': feedback {hint} after {}",
                path.join(" -> ")
            ),
        }
    }
}

impl std::error::Error for VerifyError {}

/// How one answer was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Guesses needed, including the final correct one
    pub depth: usize,
    /// Guess indices in play order
    pub guesses: Vec<usize>,
}

/// Depth statistics over every answer
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyReport {
    pub answers: usize,
    pub resolved: usize,
    pub total_depth: usize,
    pub max_depth: usize,
    pub mean_depth: f64,
    /// Number of answers resolved at each depth
    pub distribution: BTreeMap<usize, usize>,
    /// Answers that failed, by answer index
    pub failures: Vec<(usize, VerifyError)>,
}

impl VerifyReport {
    /// Aggregate resolved depths and failures
    #[must_use]
    pub fn from_results(results: Vec<Result<Resolution, VerifyError>>) -> Self {
        let answers = results.len();
        let mut distribution = BTreeMap::new();
        let mut failures = Vec::new();
        let mut total_depth = 0;
        let mut max_depth = 0;

        for (answer, result) in results.into_iter().enumerate() {
            match result {
                Ok(resolution) => {
                    *distribution.entry(resolution.depth).or_insert(0) += 1;
                    total_depth += resolution.depth;
                    max_depth = max_depth.max(resolution.depth);
                }
                Err(e) => failures.push((answer, e)),
            }
        }

        let resolved = answers - failures.len();
        let mean_depth = if resolved == 0 {
            0.0
        } else {
            total_depth as f64 / resolved as f64
        };

        Self {
            answers,
            resolved,
            total_depth,
            max_depth,
            mean_depth,
            distribution,
            failures,
        }
    }

    /// Every answer resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Every answer resolved within the six-guess limit
    #[must_use]
    pub fn within_budget(&self) -> bool {
        self.is_complete() && self.max_depth <= MAX_GUESSES
    }
}

/// Replays trees against a vocabulary
pub struct TreeVerifier<'a, O> {
    vocab: &'a Vocabulary,
    oracle: O,
}

impl<'a, O: FeedbackOracle> TreeVerifier<'a, O> {
    #[must_use]
    pub const fn new(vocab: &'a Vocabulary, oracle: O) -> Self {
        Self { vocab, oracle }
    }

    /// Follow the tree for one answer
    ///
    /// # Errors
    /// Returns `VerifyError` if the tree names an unknown guess or lacks the branch
    /// for an observed feedback.
    ///
    /// # Panics
    /// Panics if `answer` is not an answer index.
    pub fn verify_answer(
        &self,
        tree: &DecisionTree,
        answer: usize,
    ) -> Result<Resolution, VerifyError> {
        let target = &self.vocab.answers()[answer];
        let mut node = tree;
        let mut guesses = Vec::new();

        loop {
            let guess = self
                .vocab
                .guess(node.guess())
                .ok_or(VerifyError::UnknownGuess(node.guess()))?;
            guesses.push(node.guess());

            let code = self.oracle.feedback(guess, target);
            if code == Feedback::ALL_CORRECT {
                log::debug!("{target} resolved in {} guesses", guesses.len());
                return Ok(Resolution {
                    depth: guesses.len(),
                    guesses,
                });
            }

            node = node.child(code).ok_or_else(|| VerifyError::MissingBranch {
                answer: target.to_string(),
                hint: code.to_string(),
                path: self.words(&guesses),
            })?;
        }
    }

    /// Follow the tree for every answer, in answer order
    #[must_use]
    pub fn verify_all(&self, tree: &DecisionTree) -> VerifyReport {
        let results = (0..self.vocab.num_answers())
            .map(|answer| self.verify_answer(tree, answer))
            .collect();
        let report = VerifyReport::from_results(results);
        for (_, failure) in &report.failures {
            log::warn!("{failure}");
        }
        report
    }

    fn words(&self, guesses: &[usize]) -> Vec<String> {
        guesses
            .iter()
            .map(|&guess| {
                self.vocab
                    .guess(guess)
                    .map_or_else(|| format!("#{guess}"), ToString::to_string)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WordleRules;
    use crate::wordlists::loader::words_from_slice;

    fn vocab(words: &[&str]) -> Vocabulary {
        Vocabulary::symmetric(words_from_slice(words)).unwrap()
    }

    fn code(value: u8) -> Feedback {
        Feedback::new(value).unwrap()
    }

    fn two_word_tree() -> DecisionTree {
        let mut actions = BTreeMap::new();
        actions.insert(code(130), DecisionTree::leaf(1));
        DecisionTree::new(0, actions)
    }

    #[test]
    fn two_word_tree_resolves_both() {
        let vocab = vocab(&["abcde", "edcba"]);
        let verifier = TreeVerifier::new(&vocab, WordleRules);

        let report = verifier.verify_all(&two_word_tree());

        assert!(report.within_budget());
        assert_eq!(report.total_depth, 3);
        assert_eq!(report.max_depth, 2);
        assert!((report.mean_depth - 1.5).abs() < f64::EPSILON);
        assert_eq!(report.distribution, BTreeMap::from([(1, 1), (2, 1)]));
        assert_eq!(
            verifier.verify_answer(&two_word_tree(), 1).unwrap().guesses,
            vec![0, 1]
        );
    }

    #[test]
    fn missing_branch_names_answer_hint_and_path() {
        let vocab = vocab(&["abcde", "edcba"]);
        let verifier = TreeVerifier::new(&vocab, WordleRules);

        let err = verifier
            .verify_answer(&DecisionTree::leaf(0), 1)
            .unwrap_err();

        assert_eq!(
            err,
            VerifyError::MissingBranch {
                answer: "edcba".to_string(),
                hint: "YYGYY".to_string(),
                path: vec!["abcde".to_string()],
            }
        );
        assert_eq!(
            err.to_string(),
            "No branch for answer 'edcba': feedback YYGYY after abcde"
        );
    }

    #[test]
    fn unknown_guess_fails_every_answer() {
        let vocab = vocab(&["abcde", "edcba"]);
        let report = TreeVerifier::new(&vocab, WordleRules).verify_all(&DecisionTree::leaf(9));

        assert!(!report.is_complete());
        assert_eq!(report.resolved, 0);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0], (0, VerifyError::UnknownGuess(9)));
        assert!(report.mean_depth.abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_code_in_tree_is_caught() {
        let vocab = vocab(&["abcde", "edcba"]);
        // 121 is the rotation's code, not the reversal's
        let mut actions = BTreeMap::new();
        actions.insert(code(121), DecisionTree::leaf(1));
        let tree = DecisionTree::new(0, actions);

        let report = TreeVerifier::new(&vocab, WordleRules).verify_all(&tree);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, 1);
    }

    #[test]
    fn deep_trees_are_outside_budget() {
        let depths = (1..=7).map(|depth| {
            Ok(Resolution {
                depth,
                guesses: (0..depth).collect(),
            })
        });
        let report = VerifyReport::from_results(depths.collect());

        assert!(report.is_complete());
        assert!(!report.within_budget());
        assert_eq!(report.max_depth, 7);
        assert_eq!(report.total_depth, 28);
    }
}
