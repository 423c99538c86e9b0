//! Diagsum CLI
//!
//! Command-line interface for the diagnosis summary:
//! - Fetch the sheet and print the ranked summary
//! - Print the top-categories chart payload
//! - List period options
//! - Generate a default config file
//!
//! Fetches directly from the spreadsheet endpoint; no API server needed.

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diagsum::config::{generate_default_config, Config};
use diagsum::sheet::SheetClient;
use diagsum::summary::{aggregate, period_options, rank, FilterState, RankedEntry, VisibleWindow};

#[derive(Parser)]
#[command(name = "diagsum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Diagnosis summary over a public spreadsheet")]
#[command(
    long_about = "Diagsum fetches rows from a spreadsheet-to-JSON endpoint,\naggregates counts per diagnosis, and prints the ranked summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the sheet and print the ranked summary
    Summary {
        /// Search text (case-insensitive substring over labels)
        #[arg(short, long, default_value = "")]
        search: String,
        /// Selected period token (carried, not applied as a filter)
        #[arg(short, long)]
        period: Option<String>,
        /// Show only the first N entries (window cursor)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the top categories as a chart payload
    Chart {
        /// Number of categories
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// List period dropdown options
    Periods,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "diagsum=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    match cli.command {
        Commands::Summary {
            search,
            period,
            limit,
        } => {
            let ranked = fetch_ranked(&config, FilterState { search, period }).await?;
            let (visible, has_more) = match limit {
                Some(cursor) => {
                    let window = VisibleWindow::with_cursor(cursor);
                    (window.visible(&ranked).to_vec(), window.has_more(&ranked))
                }
                None => (ranked.clone(), false),
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&visible)?),
                "csv" => {
                    println!("label,count");
                    for entry in &visible {
                        println!("\"{}\",{}", entry.label.replace('"', "\"\""), entry.count);
                    }
                }
                _ => {
                    print_table(&visible);
                    println!();
                    println!("{} of {} entries", visible.len(), ranked.len());
                    if has_more {
                        println!("(more available: raise --limit)");
                    }
                }
            }
        }

        Commands::Chart { top } => {
            let ranked = fetch_ranked(&config, FilterState::default()).await?;
            let top = top.unwrap_or(config.api.chart_top);
            let slice = &ranked[..top.min(ranked.len())];

            let payload = serde_json::json!({
                "labels": slice.iter().map(|e| e.label.as_str()).collect::<Vec<_>>(),
                "data": slice.iter().map(|e| e.count).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }

        Commands::Periods => {
            for period in period_options(Utc::now().date_naive()) {
                println!("{period}");
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {}", path.display()))?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{content}"),
            }
        }
    }

    Ok(())
}

/// Fetch rows once and run them through the pipeline
async fn fetch_ranked(config: &Config, filter: FilterState) -> anyhow::Result<Vec<RankedEntry>> {
    let client = SheetClient::new(config.sheet.clone().into());

    let rows = client
        .fetch_rows()
        .await
        .with_context(|| format!("fetching {}", client.sheet_url()))?;
    let tally = aggregate(&rows, client.diagnosis_key());

    Ok(rank(&tally, &filter))
}

/// Print ranked entries as an aligned table
fn print_table(entries: &[RankedEntry]) {
    if entries.is_empty() {
        println!("No matching entries");
        return;
    }

    let label_width = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("diagnosis".len());

    println!("{:>4}  {:<label_width$}  {:>6}", "#", "diagnosis", "count");
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>4}  {:<label_width$}  {:>6}",
            i + 1,
            entry.label,
            entry.count
        );
    }
}
