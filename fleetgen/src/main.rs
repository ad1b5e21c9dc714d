//! fleetgen CLI - write a bulk sample dataset

use chrono::Utc;
use clap::Parser;
use fleetdb::{transfer, Store};
use fleetgen::{generate, GeneratorConfig, DEFAULT_COUNT, DEFAULT_SEED};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleetgen")]
#[command(about = "Generate deterministic sample data for fleetdb", long_about = None)]
struct Cli {
    /// RNG seed; the same seed gives the same data
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Records per kind
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    count: usize,

    /// Output file for the export document
    #[arg(short, long, default_value = "generated_tms_data.json")]
    out: PathBuf,

    /// Import straight into this data directory instead of writing a file
    #[arg(long, value_name = "DIR")]
    into: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GeneratorConfig {
        seed: cli.seed,
        count: cli.count,
        ..GeneratorConfig::default()
    };

    tracing::info!(seed = config.seed, count = config.count, "Generating sample data");
    let doc = generate(&config, Utc::now());

    match cli.into {
        Some(dir) => {
            let store = Store::open(&dir);
            let summary = transfer::import(&store, doc).await?;
            println!(
                "Imported {} tables with {} records each into {:?}",
                summary.replaced.len(),
                config.count,
                dir
            );
        }
        None => {
            let json = doc.to_json_pretty()?;
            tokio::fs::write(&cli.out, json).await?;
            println!(
                "Generated {} records for each type and saved to {:?}",
                config.count, cli.out
            );
        }
    }

    Ok(())
}
