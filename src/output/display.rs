//! Display functions for command results

use crate::table::FeedbackTable;
use crate::tree::{BuildOutcome, MAX_GUESSES};
use crate::verify::VerifyReport;
use crate::wordlists::Vocabulary;
use colored::Colorize;
use std::time::Duration;

/// Bar of `width` cells with `fraction` of them filled
#[must_use]
pub fn distribution_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64) as usize).min(width);
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(width - filled).bright_black()
    )
}

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print the table shape and build time
pub fn print_table_summary(table: &FeedbackTable, elapsed: Duration) {
    header("FEEDBACK TABLE");
    println!("   Guesses:   {}", table.num_guesses());
    println!("   Answers:   {}", table.num_answers());
    println!("   Cells:     {}", table.num_guesses() * table.num_answers());
    println!("   Time:      {:.2}s", elapsed.as_secs_f64());
}

/// Print the result of building one tree
pub fn print_build_outcome(outcome: &BuildOutcome, vocab: &Vocabulary, elapsed: Duration) {
    let root = vocab
        .guess(outcome.tree.guess())
        .map_or_else(|| format!("#{}", outcome.tree.guess()), ToString::to_string);
    header(&format!("TREE FOR {}", root.to_uppercase()));

    let coverage = format!("{}/{}", outcome.found.len(), outcome.possible.len());
    if outcome.is_complete() {
        println!("   Coverage:      {}", coverage.green().bold());
    } else {
        println!("   Coverage:      {}", coverage.red().bold());
    }
    println!("   Nodes:         {}", outcome.tree.num_nodes());
    println!("   Height:        {}", outcome.tree.height());
    println!("   States opened: {}", outcome.states_opened);
    println!("   Time taken:    {:.2}s", elapsed.as_secs_f64());

    let unresolved = outcome.unresolved();
    if !unresolved.is_empty() {
        let words: Vec<&str> = unresolved
            .iter()
            .take(10)
            .map(|&answer| vocab.answers()[answer].text())
            .collect();
        let more = unresolved.len().saturating_sub(words.len());
        print!("   Unresolved:    {}", words.join(", ").yellow());
        if more > 0 {
            print!(" (+{more} more)");
        }
        println!();
    }
}

/// Print one line per root of a multi-root build
pub fn print_root_line(outcome: &BuildOutcome, vocab: &Vocabulary) {
    let root = vocab
        .guess(outcome.tree.guess())
        .map_or("?????", |word| word.text());
    let status = if outcome.is_complete() {
        "✅".to_string()
    } else {
        format!("❌ {} unresolved", outcome.possible.len() - outcome.found.len())
    };
    println!(
        "   {} {:>5}/{:<5} {}",
        root.to_uppercase().bright_yellow(),
        outcome.found.len(),
        outcome.possible.len(),
        status
    );
}

/// Print verification statistics and failures
pub fn print_verify_report(report: &VerifyReport, vocab: &Vocabulary) {
    header("VERIFICATION");

    println!("\n📊 {}", "Coverage:".bright_cyan().bold());
    println!("   Answers:        {}", report.answers);
    println!("   Resolved:       {}", format!("{}", report.resolved).green());
    if !report.is_complete() {
        println!(
            "   Failed:         {}",
            format!("{}", report.failures.len()).red()
        );
    }
    println!(
        "   Mean depth:     {}",
        format!("{:.4}", report.mean_depth).bright_yellow().bold()
    );
    println!("   Max depth:      {}", report.max_depth);
    println!("   Total depth:    {}", report.total_depth);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let last = report.max_depth.max(MAX_GUESSES);
    for depth in 1..=last {
        if let Some(&count) = report.distribution.get(&depth) {
            let pct = count as f64 / report.answers.max(1) as f64;
            println!(
                "   {depth}: {} {count:5} ({:5.1}%)",
                distribution_bar(pct, 40),
                pct * 100.0
            );
        }
    }

    for (answer, failure) in report.failures.iter().take(10) {
        println!(
            "   {} {}: {failure}",
            "✗".red(),
            vocab.answers()[*answer].text().to_uppercase()
        );
    }

    println!();
    if report.within_budget() {
        println!(
            "{}",
            format!("✅ Every answer solved within {MAX_GUESSES} guesses")
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Tree does not solve every answer within {MAX_GUESSES} guesses")
                .red()
                .bold()
        );
    }
}
