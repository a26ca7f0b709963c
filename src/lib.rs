pub mod config;
pub mod controller;
pub mod debounce;
pub mod fetch;
pub mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{Config, DEFAULT_DEBOUNCE_MS, DEFAULT_LIMIT, parse_limit};
use crate::fetch::{HttpWordFetcher, WordFetcher};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "words",
    version,
    about = "Interactive TUI client for a word-suggestion endpoint"
)]
pub struct Cli {
    /// Suggestion endpoint (defaults to WORD_SEARCH_URL, then localhost)
    #[arg(long)]
    pub url: Option<String>,

    /// Quiet period between the last keystroke and the search, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive TUI
    Tui,
    /// One-shot lookup, printing matches to stdout
    Query {
        text: String,

        /// Maximum number of results (5, 10, 50 or 100)
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = parse_limit)]
        limit: usize,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Tui => {
            let config = Config::resolve(cli.url, cli.debounce_ms, DEFAULT_LIMIT);
            ui::tui::run_tui(config)
        }
        Commands::Query { text, limit } => {
            let config = Config::resolve(cli.url, cli.debounce_ms, limit);
            run_query(&config, &text, limit)
        }
    }
}

fn run_query(config: &Config, text: &str, limit: usize) -> Result<()> {
    let fetcher = HttpWordFetcher::new(config.endpoint.clone(), config.fetch_timeout);
    let words = fetcher.fetch(text, limit)?;
    if words.is_empty() {
        println!("No matching word found.");
        return Ok(());
    }
    for word in words {
        println!("{word}");
    }
    Ok(())
}
