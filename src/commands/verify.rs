//! Replay a saved tree against every answer

use super::{load_vocabulary, read_json, write_json};
use crate::core::WordleRules;
use crate::output::{ReadableTree, print_verify_report};
use crate::tree::DecisionTree;
use crate::verify::{TreeVerifier, VerifyReport};
use anyhow::{Context, Result};
use std::path::Path;

/// Verify `tree` and print its depth statistics
///
/// Verification failures are part of the returned report; only I/O and format
/// problems are errors.
///
/// # Errors
/// Returns an error if the tree or word lists cannot be loaded, or the readable
/// copy cannot be written.
pub fn run_verify(
    tree: &Path,
    guesses: &Path,
    answers: Option<&Path>,
    readable: Option<&Path>,
) -> Result<VerifyReport> {
    let vocab = load_vocabulary(guesses, answers)?;
    let tree: DecisionTree = read_json(tree)?;

    let report = TreeVerifier::new(&vocab, WordleRules).verify_all(&tree);
    print_verify_report(&report, &vocab);

    if let Some(path) = readable {
        let labelled = ReadableTree::from_tree(&tree, &vocab)
            .context("Tree does not match the guess list")?;
        write_json(path, &labelled)?;
    }
    Ok(report)
}
