mod config;
mod crawl;
mod extract;
mod fetch;
mod snippets;
mod writer;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zhihu_jokes", about = "Zhihu joke answer scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl configured questions and write one joke file per question
    Run {
        /// Question ids to crawl (overrides configuration)
        questions: Vec<u64>,
        /// Session cookie (overrides configuration)
        #[arg(long)]
        cookie: Option<String>,
        /// Output directory for joke files (overrides configuration)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Extract snippets from a saved payload file, no network
    Extract {
        /// Saved question page (HTML) or answers API response (JSON)
        file: PathBuf,
        /// Treat the file as an answers API response
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            questions,
            cookie,
            out_dir,
        } => {
            let settings = config::load(questions, cookie, out_dir)?;
            let stats = crawl::run(&settings).await?;
            println!(
                "Done: {} questions ({} written, {} skipped).",
                stats.total, stats.written, stats.skipped
            );
            Ok(())
        }
        Commands::Extract { file, json } => extract_file(&file, json),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Offline extraction: run one extractor over a saved payload and print the
/// snippets it would store. Useful for checking a page saved from the
/// browser without burning requests.
fn extract_file(path: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut jokes = snippets::SnippetList::new();
    let count = if json {
        extract::api::extract(&raw, &mut jokes)
    } else {
        let count = extract::page::extract(&raw, &mut jokes)?;
        println!("Title: {}", jokes.title().unwrap_or_default());
        count
    };
    if jokes.is_empty() {
        println!("No snippets found.");
        return Ok(());
    }
    println!("{} snippets", count);

    // In page mode the first element is the title, already printed above.
    for snippet in jokes.iter().skip(if json { 0 } else { 1 }) {
        println!("---");
        println!("{}", snippet);
    }
    Ok(())
}
