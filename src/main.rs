//! Interactive console for querying an FAQ dataset.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use semmatch::constants::{ALL_DOMAINS, DEFAULT_TOP_K, is_valid_threshold};
use semmatch::{Config, FaqDataset, MatchingEngine, VectorEncoder, normalize_text};

#[derive(Debug, Parser)]
#[command(name = "semmatch", version, about = "Semantic FAQ matching console")]
struct Args {
    /// FAQ dataset (JSON object of domain -> [{question, answer}]).
    /// Defaults to `SEMMATCH_FAQ_PATH`, then `data/samples/faq.json`.
    #[arg(long)]
    faq: Option<PathBuf>,

    /// Domain to search, or `all`.
    #[arg(long, default_value = ALL_DOMAINS)]
    domain: String,

    /// Matches shown per question.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Threshold override for this session (0.0 - 1.0).
    #[arg(long)]
    threshold: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.top_k >= 1, "--top-k must be at least 1");
    if let Some(threshold) = args.threshold {
        anyhow::ensure!(
            is_valid_threshold(threshold),
            "--threshold must be between 0.0 and 1.0"
        );
    }
    let config = Config::from_env()?;

    let faq_path = args.faq.unwrap_or_else(|| config.faq_path.clone());
    let dataset = FaqDataset::load(&faq_path)
        .with_context(|| format!("loading FAQ dataset {}", faq_path.display()))?;
    let domain = args.domain.trim().to_lowercase();
    let entries = dataset.entries(Some(&domain))?;

    println!(
        "=== SemMatch console (domain: {domain}, {} entries) ===",
        entries.len()
    );
    println!("Loading model '{}'...", config.model);

    let encoder = VectorEncoder::load(config.encoder_config())?;
    let engine = MatchingEngine::new(encoder.into(), entries, config.match_config())?;

    println!("Type a question (or 'quit' to exit).");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("\nYour question: ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim();
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let result = match engine.match_query_with_threshold(
            &normalize_text(query),
            args.top_k,
            args.threshold,
        ) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };

        println!("\nBest score:      {:.4}", result.best_score);
        println!(
            "Above threshold: {} (threshold {:.2})",
            result.meets_threshold, result.threshold
        );
        for (rank, m) in result.matches.iter().enumerate() {
            println!("  #{}  score {:.4}", rank + 1, m.score);
            println!("      Q: {}", m.text);
            println!("      A: {}", m.metadata);
        }
    }

    println!("Goodbye!");
    Ok(())
}
