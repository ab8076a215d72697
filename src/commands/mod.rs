//! Command implementations
//!
//! Thin glue between the CLI and the library: load inputs, run one operation,
//! write outputs. Errors are reported with `anyhow` context.

pub mod build;
pub mod convert;
pub mod table;
pub mod verify;

pub use build::{BuildCommand, RootChoice, run_build};
pub use convert::run_convert;
pub use table::run_table;
pub use verify::run_verify;

use crate::core::WordleRules;
use crate::table::FeedbackTable;
use crate::tree::GuessOrder;
use crate::wordlists::{Vocabulary, loader::load_from_file};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Load the guess list and, if given, a separate answer list
///
/// # Errors
/// Returns an error if a file cannot be read or the lists are inconsistent.
pub fn load_vocabulary(guesses: &Path, answers: Option<&Path>) -> Result<Vocabulary> {
    let guess_words = load_from_file(guesses)
        .with_context(|| format!("Failed to read guess list {}", guesses.display()))?;
    let vocab = match answers {
        Some(path) => {
            let answer_words = load_from_file(path)
                .with_context(|| format!("Failed to read answer list {}", path.display()))?;
            Vocabulary::asymmetric(guess_words, answer_words)
        }
        None => Vocabulary::symmetric(guess_words),
    }
    .context("Invalid vocabulary")?;

    log::info!(
        "{:<32}{} guesses, {} answers",
        "loaded vocabulary",
        vocab.num_guesses(),
        vocab.num_answers()
    );
    Ok(vocab)
}

/// Load a saved table if `path` exists, otherwise compute it
///
/// # Errors
/// Returns an error if the saved table is unreadable or does not fit `vocab`.
pub fn load_or_compute_table(vocab: &Vocabulary, path: Option<&Path>) -> Result<FeedbackTable> {
    if let Some(path) = path
        && path.exists()
    {
        let table = FeedbackTable::load(path)
            .with_context(|| format!("Failed to load feedback table {}", path.display()))?;
        table
            .check_vocabulary(vocab)
            .with_context(|| {
                format!("Feedback table {} does not match the word lists", path.display())
            })?;
        return Ok(table);
    }

    let start = Instant::now();
    let table = FeedbackTable::compute(vocab, &WordleRules);
    log::info!(
        "{:<32}{:.2}s",
        "computed feedback table",
        start.elapsed().as_secs_f64()
    );
    Ok(table)
}

/// Load a cached static order if it fits `table`, otherwise compute and cache it
///
/// # Errors
/// Returns an error if a fresh order cannot be written to `cache`.
pub fn load_or_compute_order(table: &FeedbackTable, cache: Option<&Path>) -> Result<GuessOrder> {
    if let Some(path) = cache
        && path.exists()
    {
        match GuessOrder::load(path) {
            Ok(order) if order.matches(table) => {
                log::info!("{:<32}{}", "loaded guess order", path.display());
                return Ok(order);
            }
            Ok(_) => log::warn!("guess order cache {} is stale", path.display()),
            Err(e) => log::warn!("ignoring guess order cache {}: {e}", path.display()),
        }
    }

    let order = GuessOrder::static_order(table);
    if let Some(path) = cache {
        order
            .save(path)
            .with_context(|| format!("Failed to write guess order cache {}", path.display()))?;
        log::info!("{:<32}{}", "saved guess order", path.display());
    }
    Ok(order)
}

/// Read a JSON document
///
/// # Errors
/// Returns an error if the file is unreadable or not valid JSON for `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write a JSON document
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
