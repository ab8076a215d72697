//! Depth-bounded decision tree search
//!
//! Every node guesses a word, splits the answers still possible by the feedback that
//! guess produces, and recursively looks for a next guess that resolves each cluster
//! within [`MAX_GUESSES`]. A node is solved only when every cluster is solved; the
//! first cluster that fails abandons the node so the caller can try its next
//! candidate.
//!
//! How candidates are picked depends on how many guesses remain:
//! - one answer left: guess it
//! - last guess with several answers left: nothing can work
//! - two guesses left: the first guess that separates every answer
//! - near the root: exact per-node ordering
//! - elsewhere: precomputed static ordering, skipping guesses with black letters

use super::candidates::CandidateFilter;
use super::node::DecisionTree;
use super::observer::{AbandonedBranch, NextGuessStrategy, NoopObserver, SearchObserver};
use super::ordering::{GuessOrder, first_perfect_splitter};
use super::path::SearchPath;
use crate::core::{Feedback, NUM_CODES};
use crate::table::{FeedbackTable, TableError};
use crate::wordlists::Vocabulary;
use rayon::prelude::*;

/// Guesses allowed per game
pub const MAX_GUESSES: usize = 6;

/// Search knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// At depth 4, accept only the first guess that separates every answer
    pub depth_four_shortcut: bool,
    /// Use the exact per-node ordering at depths up to this one (0 disables it)
    pub exact_order_depth: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            depth_four_shortcut: true,
            exact_order_depth: 2,
        }
    }
}

/// Read-only data shared by every node of a search
pub struct SearchContext<'a> {
    vocab: &'a Vocabulary,
    table: &'a FeedbackTable,
    static_order: GuessOrder,
    code_orders: Vec<Vec<Feedback>>,
    config: BuildConfig,
}

impl<'a> SearchContext<'a> {
    /// Prepare a context, computing the static order
    ///
    /// # Errors
    /// Returns `TableError::ShapeMismatch` if the table does not fit the vocabulary.
    pub fn new(
        vocab: &'a Vocabulary,
        table: &'a FeedbackTable,
        config: BuildConfig,
    ) -> Result<Self, TableError> {
        Self::with_order(vocab, table, GuessOrder::static_order(table), config)
    }

    /// Prepare a context around an existing static order (for example a cached one)
    ///
    /// # Errors
    /// Returns `TableError::ShapeMismatch` if the table does not fit the vocabulary.
    ///
    /// # Panics
    /// Panics if `static_order` was computed for a table of another shape.
    pub fn with_order(
        vocab: &'a Vocabulary,
        table: &'a FeedbackTable,
        static_order: GuessOrder,
        config: BuildConfig,
    ) -> Result<Self, TableError> {
        table.check_shape(vocab)?;
        assert!(
            static_order.matches(table),
            "static order does not match the feedback table"
        );
        let code_orders = (0..table.num_guesses())
            .into_par_iter()
            .map(|guess| table.codes_by_cluster_size(guess))
            .collect();
        Ok(Self {
            vocab,
            table,
            static_order,
            code_orders,
            config,
        })
    }

    #[must_use]
    pub const fn vocab(&self) -> &'a Vocabulary {
        self.vocab
    }

    #[must_use]
    pub const fn table(&self) -> &'a FeedbackTable {
        self.table
    }

    #[must_use]
    pub const fn static_order(&self) -> &GuessOrder {
        &self.static_order
    }

    #[must_use]
    pub const fn config(&self) -> BuildConfig {
        self.config
    }
}

/// Result of building one tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Best tree found; complete only if every possible answer is found
    pub tree: DecisionTree,
    /// Answers the tree resolves, ascending
    pub found: Vec<usize>,
    /// Answers the tree had to resolve, ascending
    pub possible: Vec<usize>,
    /// Nodes entered during the search
    pub states_opened: u64,
}

impl BuildOutcome {
    /// Whether the tree resolves every possible answer
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.possible.len()
    }

    /// Possible answers the tree does not resolve, ascending
    #[must_use]
    pub fn unresolved(&self) -> Vec<usize> {
        self.possible
            .iter()
            .copied()
            .filter(|answer| self.found.binary_search(answer).is_err())
            .collect()
    }
}

struct Subtree {
    tree: DecisionTree,
    found: Vec<usize>,
}

#[derive(Default)]
struct Branch {
    best: Option<Subtree>,
    tried: usize,
}

impl Branch {
    fn found(&self) -> usize {
        self.best.as_ref().map_or(0, |subtree| subtree.found.len())
    }
}

/// Recursive tree search over a [`SearchContext`]
///
/// # Examples
/// ```
/// use wordle_tree::core::WordleRules;
/// use wordle_tree::table::FeedbackTable;
/// use wordle_tree::tree::{BuildConfig, SearchContext, TreeBuilder};
/// use wordle_tree::wordlists::{Vocabulary, loader::words_from_slice};
///
/// let vocab = Vocabulary::symmetric(words_from_slice(&["crane", "slate", "irate"])).unwrap();
/// let table = FeedbackTable::compute(&vocab, &WordleRules);
/// let ctx = SearchContext::new(&vocab, &table, BuildConfig::default()).unwrap();
///
/// let outcome = TreeBuilder::new(&ctx).build(0);
/// assert!(outcome.is_complete());
/// assert_eq!(outcome.tree.guess(), 0);
/// ```
pub struct TreeBuilder<'c, 'a, O = NoopObserver> {
    ctx: &'c SearchContext<'a>,
    observer: O,
    states_opened: u64,
}

impl<'c, 'a> TreeBuilder<'c, 'a, NoopObserver> {
    #[must_use]
    pub const fn new(ctx: &'c SearchContext<'a>) -> Self {
        Self::with_observer(ctx, NoopObserver)
    }
}

impl<'c, 'a, O: SearchObserver> TreeBuilder<'c, 'a, O> {
    #[must_use]
    pub const fn with_observer(ctx: &'c SearchContext<'a>, observer: O) -> Self {
        Self {
            ctx,
            observer,
            states_opened: 0,
        }
    }

    /// Build a tree rooted at guess `root` over every answer
    ///
    /// # Panics
    /// Panics if `root` is not a guess index.
    pub fn build(&mut self, root: usize) -> BuildOutcome {
        let possible: Vec<usize> = (0..self.ctx.vocab.num_answers()).collect();
        self.build_from(&[root], &[], 1, possible)
    }

    /// Build the subtree of a node part way through a game
    ///
    /// `guesses` are the guesses made so far (the last one is this node's guess),
    /// `codes` the feedback for all but the last, and `possible` the answers still
    /// consistent with them.
    ///
    /// # Panics
    /// Panics if `depth` is not `guesses.len()`, is outside `1..=MAX_GUESSES`,
    /// `codes` is not one shorter than `guesses`, or an index is out of range.
    pub fn build_from(
        &mut self,
        guesses: &[usize],
        codes: &[Feedback],
        depth: usize,
        mut possible: Vec<usize>,
    ) -> BuildOutcome {
        assert!(
            (1..=MAX_GUESSES).contains(&depth),
            "depth {depth} outside 1..={MAX_GUESSES}"
        );
        assert_eq!(guesses.len(), depth, "one guess per level of depth");
        assert_eq!(codes.len() + 1, depth, "one code per guess but the last");
        let vocab = self.ctx.vocab;
        assert!(
            guesses.iter().all(|&guess| guess < vocab.num_guesses()),
            "guess index out of range"
        );
        assert!(
            possible.iter().all(|&answer| answer < vocab.num_answers()),
            "answer index out of range"
        );
        possible.sort_unstable();
        possible.dedup();

        let before = self.states_opened;
        let mut path = SearchPath::from_parts(guesses.to_vec(), codes.to_vec());
        let Subtree { tree, found } = self.search(&mut path, &possible);

        BuildOutcome {
            tree,
            found,
            possible,
            states_opened: self.states_opened - before,
        }
    }

    /// Nodes entered over every build so far
    #[must_use]
    pub const fn states_opened(&self) -> u64 {
        self.states_opened
    }

    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    fn search(&mut self, path: &mut SearchPath, possible: &[usize]) -> Subtree {
        let ctx = self.ctx;
        let depth = path.depth();
        let guess = path.last_guess();
        self.states_opened += 1;
        self.observer.node_entered(path, possible.len());

        let mut tree = DecisionTree::leaf(guess);
        let mut found = Vec::with_capacity(possible.len());
        let guessed_answer = ctx
            .vocab
            .answer_of_guess(guess)
            .filter(|answer| possible.binary_search(answer).is_ok());
        found.extend(guessed_answer);

        if depth < MAX_GUESSES {
            let row = ctx.table.row(guess);
            let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); NUM_CODES];
            for &answer in possible {
                clusters[row[answer].index()].push(answer);
            }

            let branches = ctx.code_orders[guess]
                .iter()
                .filter(|code| !code.is_all_correct() && !clusters[code.index()].is_empty())
                .count();
            self.observer.branches_planned(path, branches);

            for &code in &ctx.code_orders[guess] {
                let cluster = &clusters[code.index()];
                if cluster.is_empty() {
                    continue;
                }
                if code.is_all_correct() {
                    if guessed_answer.is_none() {
                        log::warn!(
                            "all-correct feedback for {} covers {} answers it does not name",
                            path.describe(ctx.vocab),
                            cluster.len()
                        );
                        self.observer.unreachable_all_correct(path, cluster.len());
                    }
                    continue;
                }

                path.push_code(code);
                let (strategy, branch) = self.solve_branch(path, cluster);
                let solved = branch.found() == cluster.len();
                self.observer.branch_finished(path, code, solved);
                if !solved {
                    self.observer.branch_abandoned(
                        path,
                        &AbandonedBranch {
                            code,
                            strategy,
                            candidates_tried: branch.tried,
                            best_found: branch.found(),
                            needed: cluster.len(),
                        },
                    );
                }
                path.pop_code();

                if let Some(best) = branch.best {
                    found.extend(best.found);
                    tree.insert(code, best.tree);
                }
                if !solved {
                    break;
                }
            }
        }

        found.sort_unstable();
        if found.len() == possible.len() {
            self.observer.node_solved(path, self.states_opened);
        }
        self.observer.node_finished(path, found.len(), possible.len());
        Subtree { tree, found }
    }

    /// Find a next guess for one feedback cluster; `path` ends with its code
    fn solve_branch(
        &mut self,
        path: &mut SearchPath,
        cluster: &[usize],
    ) -> (NextGuessStrategy, Branch) {
        let ctx = self.ctx;
        let depth = path.depth();

        if let [answer] = *cluster {
            let guess = ctx.vocab.guess_of_answer(answer);
            let branch = self.try_candidates(path, cluster, std::iter::once(guess));
            return (NextGuessStrategy::SoleAnswer, branch);
        }
        if depth + 1 >= MAX_GUESSES {
            return (NextGuessStrategy::LastGuessExhausted, Branch::default());
        }
        if depth + 2 == MAX_GUESSES && ctx.config.depth_four_shortcut {
            let splitter = first_perfect_splitter(ctx.table, cluster);
            let branch = self.try_candidates(path, cluster, splitter.into_iter());
            return (NextGuessStrategy::PerfectSplit, branch);
        }
        if depth <= ctx.config.exact_order_depth {
            let order = GuessOrder::exact_order(ctx.table, cluster).into_order();
            let candidates =
                CandidateFilter::unused_only(order.into_iter(), ctx.vocab, path.guesses());
            let branch = self.try_candidates(path, cluster, candidates);
            return (NextGuessStrategy::ExactOrder, branch);
        }

        let candidates = CandidateFilter::new(
            ctx.static_order.order().iter().copied(),
            ctx.vocab,
            path.guesses(),
            path.codes(),
        );
        let branch = self.try_candidates(path, cluster, candidates);
        (NextGuessStrategy::StaticOrder, branch)
    }

    /// Try candidates in order until one solves the cluster, keeping the best partial
    fn try_candidates<I>(
        &mut self,
        path: &mut SearchPath,
        cluster: &[usize],
        candidates: I,
    ) -> Branch
    where
        I: Iterator<Item = usize>,
    {
        let mut branch = Branch::default();
        for guess in candidates {
            branch.tried += 1;
            path.push_guess(guess);
            let subtree = self.search(path, cluster);
            path.pop_guess();

            if subtree.found.len() == cluster.len() {
                branch.best = Some(subtree);
                break;
            }
            if subtree.found.len() > branch.found() || branch.best.is_none() {
                branch.best = Some(subtree);
            }
        }
        branch
    }
}
