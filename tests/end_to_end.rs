//! Build, verify and convert trees through the public API

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use wordle_tree::commands::{
    BuildCommand, RootChoice, read_json, run_build, run_convert, run_table, run_verify,
};
use wordle_tree::core::WordleRules;
use wordle_tree::output::ReadableTree;
use wordle_tree::table::FeedbackTable;
use wordle_tree::tree::{BuildConfig, DecisionTree, GuessOrder, SearchContext, TreeBuilder};
use wordle_tree::verify::TreeVerifier;
use wordle_tree::wordlists::{Vocabulary, loader::words_from_slice};

const WORDS: [&str; 8] = [
    "crane", "slate", "irate", "grate", "fuzzy", "moist", "abide", "speed",
];

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wordle_tree_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn built_tree_verifies_every_answer() {
    let vocab = Vocabulary::symmetric(words_from_slice(&WORDS)).unwrap();
    let table = FeedbackTable::compute(&vocab, &WordleRules);
    table.check_identity(&vocab).unwrap();
    let ctx = SearchContext::new(&vocab, &table, BuildConfig::default()).unwrap();

    let outcome = TreeBuilder::new(&ctx).build(0);
    assert!(outcome.is_complete());

    let verifier = TreeVerifier::new(&vocab, WordleRules);
    let report = verifier.verify_all(&outcome.tree);
    assert!(report.within_budget());
    assert_eq!(report.total_depth, 18);
    assert_eq!(report.max_depth, 3);
    assert!((report.mean_depth - 2.25).abs() < 1e-12);
    assert_eq!(report.distribution, BTreeMap::from([(1, 1), (2, 4), (3, 3)]));
}

#[test]
fn partial_tree_verifies_what_it_found() {
    let words = [
        "bills", "fills", "hills", "kills", "mills", "pills", "tills", "wills", "gills", "sills",
    ];
    let vocab = Vocabulary::symmetric(words_from_slice(&words)).unwrap();
    let table = FeedbackTable::compute(&vocab, &WordleRules);
    let ctx = SearchContext::new(&vocab, &table, BuildConfig::default()).unwrap();

    let outcome = TreeBuilder::new(&ctx).build(0);
    assert!(!outcome.is_complete());

    let verifier = TreeVerifier::new(&vocab, WordleRules);
    for &answer in &outcome.found {
        let resolution = verifier.verify_answer(&outcome.tree, answer).unwrap();
        assert!(resolution.depth <= 6);
    }
    for answer in outcome.unresolved() {
        assert!(verifier.verify_answer(&outcome.tree, answer).is_err());
    }
}

#[test]
fn every_root_of_a_small_vocabulary_verifies() {
    let vocab = Vocabulary::symmetric(words_from_slice(&WORDS)).unwrap();
    let table = FeedbackTable::compute(&vocab, &WordleRules);
    let ctx = SearchContext::new(&vocab, &table, BuildConfig::default()).unwrap();
    let verifier = TreeVerifier::new(&vocab, WordleRules);

    for root in 0..vocab.num_guesses() {
        let outcome = TreeBuilder::new(&ctx).build(root);
        let report = verifier.verify_all(&outcome.tree);
        assert_eq!(report.resolved, outcome.found.len(), "root {root}");
        assert_eq!(outcome.tree.guess(), root);
    }
}

#[test]
fn asymmetric_vocabulary_guesses_outside_answers() {
    let guesses = words_from_slice(&["salet", "crane", "slate", "irate", "moist"]);
    let answers = words_from_slice(&["crane", "slate", "irate", "moist"]);
    let vocab = Vocabulary::asymmetric(guesses, answers).unwrap();
    let table = FeedbackTable::compute(&vocab, &WordleRules);
    table.check_identity(&vocab).unwrap();
    let ctx = SearchContext::new(&vocab, &table, BuildConfig::default()).unwrap();

    let outcome = TreeBuilder::new(&ctx).build(0);
    assert!(outcome.is_complete());
    assert!(!outcome.tree.is_leaf());

    let report = TreeVerifier::new(&vocab, WordleRules).verify_all(&outcome.tree);
    assert!(report.within_budget());
    assert_eq!(report.distribution.get(&1), None);
}

#[test]
fn commands_round_trip_through_files() {
    let dir = scratch_dir("commands");
    let words_path = dir.join("words.txt");
    fs::write(&words_path, WORDS.join("\n")).unwrap();
    let table_path = dir.join("table.bin");
    let order_path = dir.join("order.json");
    let tree_path = dir.join("tree.json");
    let readable_path = dir.join("readable.json");
    let back_path = dir.join("back.json");

    let table = run_table(&words_path, None, &table_path).unwrap();
    assert_eq!(FeedbackTable::load(&table_path).unwrap(), table);

    let command = BuildCommand {
        guesses: words_path.clone(),
        answers: None,
        table: Some(table_path),
        order_cache: Some(order_path.clone()),
        root: RootChoice::Word("CRANE".to_string()),
        out: tree_path.clone(),
        search: BuildConfig::default(),
        progress: false,
    };
    let outcomes = run_build(&command).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_complete());
    assert!(GuessOrder::load(&order_path).unwrap().matches(&table));

    let report = run_verify(&tree_path, &words_path, None, Some(&readable_path)).unwrap();
    assert!(report.within_budget());

    run_convert(&readable_path, &words_path, None, &back_path, true).unwrap();
    let original: DecisionTree = read_json(&tree_path).unwrap();
    let restored: DecisionTree = read_json(&back_path).unwrap();
    assert_eq!(restored, original);

    let readable: ReadableTree = read_json(&readable_path).unwrap();
    assert_eq!(readable.guess, "crane");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn all_roots_writes_one_tree_per_guess() {
    let dir = scratch_dir("all_roots");
    let words_path = dir.join("words.txt");
    fs::write(&words_path, ["abcde", "edcba", "eabcd"].join("\n")).unwrap();
    let out = dir.join("trees");

    let command = BuildCommand {
        guesses: words_path,
        answers: None,
        table: None,
        order_cache: None,
        root: RootChoice::All,
        out: out.clone(),
        search: BuildConfig::default(),
        progress: false,
    };
    let outcomes = run_build(&command).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|outcome| outcome.is_complete()));
    for word in ["abcde", "edcba", "eabcd"] {
        assert!(out.join(format!("{word}.json")).exists());
    }
    assert!(out.join("summary.json").exists());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn table_saved_for_other_word_lists_is_rejected() {
    let dir = scratch_dir("stale_table");
    let words_path = dir.join("words.txt");
    fs::write(&words_path, WORDS.join("\n")).unwrap();
    let shuffled_path = dir.join("shuffled.txt");
    let mut shuffled = WORDS;
    shuffled.reverse();
    fs::write(&shuffled_path, shuffled.join("\n")).unwrap();
    let table_path = dir.join("table.bin");

    // same shape and all-correct diagonal, computed for the reversed list
    run_table(&shuffled_path, None, &table_path).unwrap();

    let command = BuildCommand {
        guesses: words_path,
        answers: None,
        table: Some(table_path),
        order_cache: None,
        root: RootChoice::Word("crane".to_string()),
        out: dir.join("tree.json"),
        search: BuildConfig::default(),
        progress: false,
    };
    let err = run_build(&command).unwrap_err();
    assert!(format!("{err:#}").contains("does not match the word lists"));
    assert!(!dir.join("tree.json").exists());

    fs::remove_dir_all(dir).unwrap();
}
