//! Search instrumentation
//!
//! The builder reports what it is doing through a [`SearchObserver`]. Every hook has
//! an empty default body, so [`NoopObserver`] costs nothing once inlined.

use super::path::SearchPath;
use crate::core::Feedback;
use crate::wordlists::Vocabulary;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// How the builder picks candidates for one feedback branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextGuessStrategy {
    /// One answer left: guess it
    SoleAnswer,
    /// Last guess with several answers left: cannot succeed
    LastGuessExhausted,
    /// Two guesses left: first guess that isolates every answer
    PerfectSplit,
    /// Per-node ordering over the remaining answers
    ExactOrder,
    /// Precomputed ordering through the candidate filter
    StaticOrder,
}

/// Summary of a branch that could not be fully solved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbandonedBranch {
    pub code: Feedback,
    pub strategy: NextGuessStrategy,
    pub candidates_tried: usize,
    pub best_found: usize,
    pub needed: usize,
}

/// Hooks invoked by the tree builder
///
/// `path` is always the path of the node being built: `depth` guesses and
/// `depth - 1` codes.
#[allow(unused_variables)]
pub trait SearchObserver {
    /// A node was opened with `possible` answers still consistent
    fn node_entered(&mut self, path: &SearchPath, possible: usize) {}

    /// The node is about to try `branches` non-empty feedback clusters
    fn branches_planned(&mut self, path: &SearchPath, branches: usize) {}

    /// A branch finished, solved or not
    fn branch_finished(&mut self, path: &SearchPath, code: Feedback, solved: bool) {}

    /// A branch was not fully solved; the node is given up
    fn branch_abandoned(&mut self, path: &SearchPath, branch: &AbandonedBranch) {}

    /// Every answer at the node is resolved by its subtree
    fn node_solved(&mut self, path: &SearchPath, states_opened: u64) {}

    /// The node returned, solved or not
    fn node_finished(&mut self, path: &SearchPath, found: usize, possible: usize) {}

    /// All-correct feedback reached answers although the guess is not one of them
    fn unreachable_all_correct(&mut self, path: &SearchPath, answers: usize) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn node_entered(&mut self, path: &SearchPath, possible: usize) {
        (**self).node_entered(path, possible);
    }
    fn branches_planned(&mut self, path: &SearchPath, branches: usize) {
        (**self).branches_planned(path, branches);
    }
    fn branch_finished(&mut self, path: &SearchPath, code: Feedback, solved: bool) {
        (**self).branch_finished(path, code, solved);
    }
    fn branch_abandoned(&mut self, path: &SearchPath, branch: &AbandonedBranch) {
        (**self).branch_abandoned(path, branch);
    }
    fn node_solved(&mut self, path: &SearchPath, states_opened: u64) {
        (**self).node_solved(path, states_opened);
    }
    fn node_finished(&mut self, path: &SearchPath, found: usize, possible: usize) {
        (**self).node_finished(path, found, possible);
    }
    fn unreachable_all_correct(&mut self, path: &SearchPath, answers: usize) {
        (**self).unreachable_all_correct(path, answers);
    }
}

impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn node_entered(&mut self, path: &SearchPath, possible: usize) {
        self.0.node_entered(path, possible);
        self.1.node_entered(path, possible);
    }
    fn branches_planned(&mut self, path: &SearchPath, branches: usize) {
        self.0.branches_planned(path, branches);
        self.1.branches_planned(path, branches);
    }
    fn branch_finished(&mut self, path: &SearchPath, code: Feedback, solved: bool) {
        self.0.branch_finished(path, code, solved);
        self.1.branch_finished(path, code, solved);
    }
    fn branch_abandoned(&mut self, path: &SearchPath, branch: &AbandonedBranch) {
        self.0.branch_abandoned(path, branch);
        self.1.branch_abandoned(path, branch);
    }
    fn node_solved(&mut self, path: &SearchPath, states_opened: u64) {
        self.0.node_solved(path, states_opened);
        self.1.node_solved(path, states_opened);
    }
    fn node_finished(&mut self, path: &SearchPath, found: usize, possible: usize) {
        self.0.node_finished(path, found, possible);
        self.1.node_finished(path, found, possible);
    }
    fn unreachable_all_correct(&mut self, path: &SearchPath, answers: usize) {
        self.0.unreachable_all_correct(path, answers);
        self.1.unreachable_all_correct(path, answers);
    }
}

impl<O: SearchObserver> SearchObserver for Option<O> {
    fn node_entered(&mut self, path: &SearchPath, possible: usize) {
        if let Some(o) = self {
            o.node_entered(path, possible);
        }
    }
    fn branches_planned(&mut self, path: &SearchPath, branches: usize) {
        if let Some(o) = self {
            o.branches_planned(path, branches);
        }
    }
    fn branch_finished(&mut self, path: &SearchPath, code: Feedback, solved: bool) {
        if let Some(o) = self {
            o.branch_finished(path, code, solved);
        }
    }
    fn branch_abandoned(&mut self, path: &SearchPath, branch: &AbandonedBranch) {
        if let Some(o) = self {
            o.branch_abandoned(path, branch);
        }
    }
    fn node_solved(&mut self, path: &SearchPath, states_opened: u64) {
        if let Some(o) = self {
            o.node_solved(path, states_opened);
        }
    }
    fn node_finished(&mut self, path: &SearchPath, found: usize, possible: usize) {
        if let Some(o) = self {
            o.node_finished(path, found, possible);
        }
    }
    fn unreachable_all_correct(&mut self, path: &SearchPath, answers: usize) {
        if let Some(o) = self {
            o.unreachable_all_correct(path, answers);
        }
    }
}

/// Logs search progress through the `log` facade
///
/// - solved nodes at depth <= `progress_depth` are logged at info
/// - abandoned branches at depth <= `failure_depth` are logged at warn
/// - nodes at `timing_depth` report their wall-clock time at info
pub struct LogObserver<'a> {
    vocab: &'a Vocabulary,
    pub progress_depth: usize,
    pub failure_depth: usize,
    pub timing_depth: Option<usize>,
    started: Option<Instant>,
}

impl<'a> LogObserver<'a> {
    #[must_use]
    pub const fn new(vocab: &'a Vocabulary) -> Self {
        Self {
            vocab,
            progress_depth: 3,
            failure_depth: 3,
            timing_depth: None,
            started: None,
        }
    }
}

impl SearchObserver for LogObserver<'_> {
    fn node_entered(&mut self, path: &SearchPath, possible: usize) {
        if self.timing_depth == Some(path.depth()) {
            self.started = Some(Instant::now());
        }
        log::trace!(
            "[d={}] entering {} with {possible} answers",
            path.depth(),
            path.describe(self.vocab)
        );
    }

    fn branch_abandoned(&mut self, path: &SearchPath, branch: &AbandonedBranch) {
        if path.depth() <= self.failure_depth {
            log::warn!(
                "[d={}] subtree not solved: {} -> {} ({}/{} answers, {} candidates, {:?})",
                path.depth(),
                path.describe(self.vocab),
                branch.code,
                branch.best_found,
                branch.needed,
                branch.candidates_tried,
                branch.strategy
            );
        }
    }

    fn node_solved(&mut self, path: &SearchPath, states_opened: u64) {
        if path.depth() <= self.progress_depth {
            log::info!(
                "[d={}] guess solves subtree: {} ({states_opened} states)",
                path.depth(),
                path.describe(self.vocab)
            );
        }
    }

    fn node_finished(&mut self, path: &SearchPath, found: usize, possible: usize) {
        if self.timing_depth == Some(path.depth())
            && let Some(started) = self.started.take()
        {
            log::info!(
                "[d={}] {found}/{possible} answers in {:.2}s: {}",
                path.depth(),
                started.elapsed().as_secs_f64(),
                path.describe(self.vocab)
            );
        }
    }
}

/// Progress bar over the branches of nodes at one depth
pub struct ProgressObserver {
    bar: ProgressBar,
    depth: usize,
}

impl ProgressObserver {
    /// Track branches explored at `depth` (1 = the root's branches)
    #[must_use]
    pub fn new(depth: usize) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} branches | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        Self { bar, depth }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SearchObserver for ProgressObserver {
    fn branches_planned(&mut self, path: &SearchPath, branches: usize) {
        if path.depth() == self.depth {
            self.bar.inc_length(branches as u64);
        }
    }

    fn branch_finished(&mut self, path: &SearchPath, code: Feedback, solved: bool) {
        if path.depth() == self.depth {
            self.bar.inc(1);
            self.bar
                .set_message(format!("{code} {}", if solved { "solved" } else { "failed" }));
        }
    }
}
