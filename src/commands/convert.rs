//! Convert between index trees and readable trees

use super::{load_vocabulary, read_json, write_json};
use crate::output::ReadableTree;
use crate::tree::DecisionTree;
use anyhow::{Context, Result};
use std::path::Path;

/// Rewrite a tree file with words and hint strings, or back with `reverse`
///
/// # Errors
/// Returns an error if a file cannot be read or written, or the tree does not fit
/// the word lists.
pub fn run_convert(
    tree: &Path,
    guesses: &Path,
    answers: Option<&Path>,
    out: &Path,
    reverse: bool,
) -> Result<()> {
    let vocab = load_vocabulary(guesses, answers)?;

    if reverse {
        let readable: ReadableTree = read_json(tree)?;
        let indexed = readable
            .to_tree(&vocab)
            .context("Readable tree does not match the guess list")?;
        write_json(out, &indexed)?;
    } else {
        let indexed: DecisionTree = read_json(tree)?;
        let readable = ReadableTree::from_tree(&indexed, &vocab)
            .context("Tree does not match the guess list")?;
        write_json(out, &readable)?;
    }

    log::info!("{:<32}{}", "wrote converted tree", out.display());
    Ok(())
}
