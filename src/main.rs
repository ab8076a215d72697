//! Wordle decision tree builder - CLI
//!
//! Precomputes feedback tables, builds six-guess decision trees, and verifies or
//! converts saved trees.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wordle_tree::{
    commands::{BuildCommand, RootChoice, run_build, run_convert, run_table, run_verify},
    tree::BuildConfig,
};

#[derive(Parser)]
#[command(
    name = "wordle_tree",
    about = "Builds and verifies complete six-guess Wordle decision trees",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Word list locations shared by every command
#[derive(Args)]
struct WordLists {
    /// Newline-separated guess list; its order defines guess indices
    #[arg(short, long)]
    guesses: PathBuf,

    /// Newline-separated answer list (defaults to the guess list)
    #[arg(short, long)]
    answers: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the feedback table and save it
    Table {
        #[command(flatten)]
        words: WordLists,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Build a decision tree for one root guess, or for every guess
    Build {
        #[command(flatten)]
        words: WordLists,

        /// Saved feedback table (computed and saved here if missing)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Static guess order cache (JSON)
        #[arg(long)]
        order_cache: Option<PathBuf>,

        /// Root guess
        #[arg(short, long, conflicts_with = "all_roots", required_unless_present = "all_roots")]
        root: Option<String>,

        /// Build a tree for every guess in parallel
        #[arg(long)]
        all_roots: bool,

        /// Tree file, or output directory with --all-roots
        #[arg(short, long)]
        out: PathBuf,

        /// Search every candidate at depth 4 instead of the first perfect splitter
        #[arg(long)]
        no_depth_four_shortcut: bool,

        /// Use the exact per-node ordering up to this depth (0 disables it)
        #[arg(long, default_value = "2")]
        exact_order_depth: usize,

        /// Show a progress bar over the root's branches
        #[arg(long)]
        progress: bool,
    },

    /// Replay a tree against every answer and report depths
    Verify {
        /// Tree file (JSON)
        #[arg(long)]
        tree: PathBuf,

        #[command(flatten)]
        words: WordLists,

        /// Also write a readable copy of the tree here
        #[arg(long)]
        readable: Option<PathBuf>,
    },

    /// Rewrite a tree with words and hint strings
    Convert {
        /// Tree file (JSON)
        #[arg(long)]
        tree: PathBuf,

        #[command(flatten)]
        words: WordLists,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        /// Convert a readable tree back to indices and codes
        #[arg(long)]
        reverse: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Table { words, out } => {
            run_table(&words.guesses, words.answers.as_deref(), &out)?;
            Ok(())
        }
        Commands::Build {
            words,
            table,
            order_cache,
            root,
            all_roots,
            out,
            no_depth_four_shortcut,
            exact_order_depth,
            progress,
        } => {
            let root = match (root, all_roots) {
                (_, true) => RootChoice::All,
                (Some(word), false) => RootChoice::Word(word),
                (None, false) => bail!("either --root or --all-roots is required"),
            };
            let command = BuildCommand {
                guesses: words.guesses,
                answers: words.answers,
                table,
                order_cache,
                root,
                out,
                search: BuildConfig {
                    depth_four_shortcut: !no_depth_four_shortcut,
                    exact_order_depth,
                },
                progress,
            };
            let outcomes = run_build(&command)?;
            if matches!(command.root, RootChoice::Word(_))
                && outcomes.iter().any(|outcome| !outcome.is_complete())
            {
                bail!("tree does not cover every answer");
            }
            Ok(())
        }
        Commands::Verify {
            tree,
            words,
            readable,
        } => {
            let report = run_verify(
                &tree,
                &words.guesses,
                words.answers.as_deref(),
                readable.as_deref(),
            )?;
            if !report.within_budget() {
                bail!("verification failed");
            }
            Ok(())
        }
        Commands::Convert {
            tree,
            words,
            out,
            reverse,
        } => run_convert(
            &tree,
            &words.guesses,
            words.answers.as_deref(),
            &out,
            reverse,
        ),
    }
}
