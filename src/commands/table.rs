//! Precompute and save the feedback table

use super::load_vocabulary;
use crate::core::WordleRules;
use crate::output::print_table_summary;
use crate::table::FeedbackTable;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

/// Compute the table for the given word lists and write it to `out`
///
/// # Errors
/// Returns an error if the lists cannot be loaded, the table violates the
/// all-correct identity, or the file cannot be written.
pub fn run_table(guesses: &Path, answers: Option<&Path>, out: &Path) -> Result<FeedbackTable> {
    let vocab = load_vocabulary(guesses, answers)?;

    let start = Instant::now();
    let table = FeedbackTable::compute(&vocab, &WordleRules);
    table
        .check_identity(&vocab)
        .context("Computed feedback table is inconsistent")?;
    table
        .save(out)
        .with_context(|| format!("Failed to write feedback table {}", out.display()))?;

    print_table_summary(&table, start.elapsed());
    Ok(table)
}
