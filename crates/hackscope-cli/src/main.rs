use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hackscope_catalog::{load_catalog_file, validate};
use hackscope_core::SortKey;
use hackscope_query::{discover, FilterState};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hackscope")]
#[command(about = "Hackathon discovery command-line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the discovery web UI.
    Serve,
    /// Run a discovery query against a catalog file.
    Search {
        /// Free-text query; key:value tokens such as `status:live` or
        /// `prize:>10000` are recognized.
        query: Option<String>,
        #[arg(long, default_value = "catalog/hackathons.json")]
        catalog: PathBuf,
        /// Category checkbox selection; repeatable.
        #[arg(long)]
        category: Vec<String>,
        /// Status checkbox selection; repeatable.
        #[arg(long)]
        status: Vec<String>,
        /// Difficulty checkbox selection; repeatable.
        #[arg(long)]
        difficulty: Vec<String>,
        /// Mode checkbox selection; repeatable.
        #[arg(long)]
        mode: Vec<String>,
        /// Prize range index (0 = Under 5k .. 4 = Above 50k); repeatable.
        #[arg(long = "prize-range")]
        prize_range: Vec<usize>,
        /// Sort strategy: latest, ending-soon, prize-desc, prize-asc, popular.
        #[arg(long, default_value = "latest")]
        sort: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Check a catalog file and report suspicious records.
    Validate {
        #[arg(long, default_value = "catalog/hackathons.json")]
        catalog: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => hackscope_web::serve_from_env().await?,
        Commands::Search {
            query,
            catalog,
            category,
            status,
            difficulty,
            mode,
            prize_range,
            sort,
            limit,
        } => {
            let sort_by = SortKey::parse(&sort)
                .with_context(|| format!("unknown sort strategy: {sort}"))?;
            let records = load_catalog_file(&catalog)
                .await
                .with_context(|| format!("loading catalog {}", catalog.display()))?;
            let state = FilterState {
                search_text: query.unwrap_or_default(),
                selected_categories: category.into_iter().collect(),
                selected_statuses: status.into_iter().collect(),
                selected_difficulties: difficulty.into_iter().collect(),
                selected_modes: mode.into_iter().collect(),
                selected_prize_ranges: prize_range.into_iter().collect(),
                sort_by,
            };
            let discovery = discover(&records, &state);
            for record in discovery.records.iter().take(limit) {
                println!(
                    "{} [{}] {} - ${} ({} registered)",
                    record.title,
                    record.status.label(),
                    record.organizer,
                    record.prize(),
                    record.registration_count()
                );
            }
            println!(
                "{} of {} matching shown",
                discovery.records.len().min(limit),
                discovery.records.len()
            );
        }
        Commands::Validate { catalog } => {
            let records = load_catalog_file(&catalog)
                .await
                .with_context(|| format!("loading catalog {}", catalog.display()))?;
            let warnings = validate(&records);
            for warning in &warnings {
                println!("{}: {}", warning.id, warning.message);
            }
            if !warnings.is_empty() {
                anyhow::bail!("{} catalog warning(s)", warnings.len());
            }
            println!("{} records, no warnings", records.len());
        }
    }

    Ok(())
}
