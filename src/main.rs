use anyhow::Result;
use clap::{Parser, Subcommand};
use prettytable::{row, Table};
use tokio::signal;
use tracing::info;

use sitrep::config::Config;
use sitrep::db::Database;
use sitrep::ingest;
use sitrep::logging::configure_logging;

#[derive(Parser)]
#[command(name = "sitrep", about = "Situation-monitoring feed aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch feeds on the configured interval until interrupted
    Run,
    /// Run exactly one ingestion batch and print the summary
    Fetch,
    /// Print summary statistics for the freshness window
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let cli = Cli::parse();
    let config = Config::from_env();
    let db = Database::new(&config.database_path).await?;

    match cli.command {
        Command::Run => {
            info!(
                "Refreshing {} feeds every {} minutes",
                sitrep::feeds::FEED_SOURCES.len(),
                config.refresh_interval_minutes
            );
            tokio::select! {
                _ = ingest::ingest_loop(&db, &config) => {}
                _ = signal::ctrl_c() => {
                    info!("Ctrl-C received, shutting down");
                }
            }
        }
        Command::Fetch => {
            let summary = ingest::run_batch(&db, &config).await?;
            println!("{}", summary);
        }
        Command::Stats => {
            let stats = db.stats(config.max_article_age_days).await?;

            let mut table = Table::new();
            table.add_row(row!["Articles in window", stats.total_articles]);
            table.add_row(row!["Distinct sources", stats.sources_count]);
            table.add_row(row!["Distinct locations", stats.locations_count]);

            let mut categories: Vec<_> = stats.categories.iter().collect();
            categories.sort();
            for (category, count) in categories {
                table.add_row(row![category, count]);
            }

            table.printstd();
        }
    }

    Ok(())
}
