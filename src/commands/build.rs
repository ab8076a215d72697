//! Build decision trees for one root or for every root

use super::{load_or_compute_order, load_or_compute_table, load_vocabulary, write_json};
use crate::output::{print_build_outcome, print_root_line};
use crate::tree::{
    BuildConfig, BuildOutcome, LogObserver, ProgressObserver, SearchContext, TreeBuilder,
};
use crate::wordlists::Vocabulary;
use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Which root guesses to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootChoice {
    Word(String),
    All,
}

/// Options for the `build` command
#[derive(Debug, Clone)]
pub struct BuildCommand {
    pub guesses: PathBuf,
    pub answers: Option<PathBuf>,
    pub table: Option<PathBuf>,
    pub order_cache: Option<PathBuf>,
    pub root: RootChoice,
    /// Tree file for one root, directory for all roots
    pub out: PathBuf,
    pub search: BuildConfig,
    pub progress: bool,
}

#[derive(Serialize)]
struct RootSummary<'a> {
    root: &'a str,
    found: usize,
    possible: usize,
    complete: bool,
    states_opened: u64,
}

/// Run the `build` command, returning one outcome per root built
///
/// # Errors
/// Returns an error if inputs cannot be loaded, the root is unknown, or a tree
/// cannot be written.
pub fn run_build(command: &BuildCommand) -> Result<Vec<BuildOutcome>> {
    let vocab = load_vocabulary(&command.guesses, command.answers.as_deref())?;
    let table = load_or_compute_table(&vocab, command.table.as_deref())?;
    if let Some(path) = command.table.as_deref()
        && !path.exists()
    {
        table
            .save(path)
            .with_context(|| format!("Failed to write feedback table {}", path.display()))?;
    }
    let order = load_or_compute_order(&table, command.order_cache.as_deref())?;
    let ctx = SearchContext::with_order(&vocab, &table, order, command.search)
        .context("Feedback table does not match the word lists")?;

    match &command.root {
        RootChoice::Word(word) => {
            let root = vocab
                .guess_index(word)
                .ok_or_else(|| anyhow!("Root '{word}' is not in the guess list"))?;
            let outcome = build_one(&ctx, root, command.progress);
            write_json(&command.out, &outcome.tree)?;
            Ok(vec![outcome])
        }
        RootChoice::All => build_all(&ctx, &command.out),
    }
}

fn build_one(ctx: &SearchContext, root: usize, progress: bool) -> BuildOutcome {
    let vocab = ctx.vocab();
    let start = Instant::now();
    let bar = progress.then(|| ProgressObserver::new(1));
    let mut builder = TreeBuilder::with_observer(ctx, (LogObserver::new(vocab), bar));
    let outcome = builder.build(root);

    let (_, bar) = builder.into_observer();
    if let Some(bar) = bar {
        bar.finish();
    }
    print_build_outcome(&outcome, vocab, start.elapsed());
    outcome
}

fn build_all(ctx: &SearchContext, dir: &Path) -> Result<Vec<BuildOutcome>> {
    let vocab = ctx.vocab();
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    println!("🎯 Building trees for {} roots...", vocab.num_guesses());
    let pb = ProgressBar::new(vocab.num_guesses() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let outcomes = (0..vocab.num_guesses())
        .into_par_iter()
        .map(|root| {
            let outcome = TreeBuilder::new(ctx).build(root);
            let word = root_word(vocab, root);
            write_json(&dir.join(format!("{word}.json")), &outcome.tree)?;
            if outcome.is_complete() {
                pb.set_message(format!("{} solves all", word.to_uppercase()));
            }
            pb.inc(1);
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_with_message("Complete!");

    let summary: Vec<RootSummary> = outcomes
        .iter()
        .map(|outcome| RootSummary {
            root: root_word(vocab, outcome.tree.guess()),
            found: outcome.found.len(),
            possible: outcome.possible.len(),
            complete: outcome.is_complete(),
            states_opened: outcome.states_opened,
        })
        .collect();
    write_json(&dir.join("summary.json"), &summary)?;

    for outcome in &outcomes {
        print_root_line(outcome, vocab);
    }
    let complete = outcomes.iter().filter(|o| o.is_complete()).count();
    log::info!(
        "{:<32}{complete}/{} roots in {:.2}s",
        "complete trees",
        outcomes.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(outcomes)
}

fn root_word(vocab: &Vocabulary, root: usize) -> &str {
    vocab.guess(root).map_or("unknown", |word| word.text())
}
