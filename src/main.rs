//! fleetdb CLI - fleet maintenance records

use clap::{Parser, Subcommand, ValueEnum};
use fleetdb::report::EntityRef;
use fleetdb::{forms, Fleet, RecordKind};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fleetdb")]
#[command(about = "Fleet maintenance records backed by CSV tables", long_about = None)]
struct Cli {
    /// Data directory holding the CSV tables
    #[arg(short, long, env = "FLEETDB_DATA_DIR", default_value = "tms_data")]
    data_dir: PathBuf,

    /// Log more (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, config file and empty tables
    Init,

    /// Show row counts per table
    Status,

    /// Add a record from name=value fields
    Add {
        /// Record kind (drivers, trucks, trailers, maintenance, otr, pm, shop-jobs)
        kind: RecordKind,

        /// Field value as name=value (repeatable)
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },

    /// Print every record of a kind as JSON
    List {
        kind: RecordKind,
    },

    /// Print fleet-wide statistics
    Dashboard,

    /// Print the report for one driver, truck or trailer
    Report {
        #[arg(value_enum)]
        entity: ReportEntity,

        id: String,
    },

    /// Write a JSON backup of every table
    Export {
        /// Directory for the backup (defaults to the configured backup_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace tables from a JSON backup
    Import {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportEntity {
    Truck,
    Driver,
    Trailer,
}

impl From<ReportEntity> for RecordKind {
    fn from(entity: ReportEntity) -> Self {
        match entity {
            ReportEntity::Truck => RecordKind::Truck,
            ReportEntity::Driver => RecordKind::Driver,
            ReportEntity::Trailer => RecordKind::Trailer,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON output
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = run(&cli).await;
    if let Err(e) = &result {
        if let Some(err) = e.downcast_ref::<fleetdb::Error>() {
            if let Some(hint) = err.suggestion() {
                eprintln!("hint: {}", hint);
            }
        }
    }
    result
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init => init_store(&cli.data_dir).await,
        Commands::Status => show_status(&cli.data_dir).await,
        Commands::Add { kind, fields } => add_record(&cli.data_dir, *kind, fields).await,
        Commands::List { kind } => list_records(&cli.data_dir, *kind).await,
        Commands::Dashboard => show_dashboard(&cli.data_dir).await,
        Commands::Report { entity, id } => show_report(&cli.data_dir, *entity, id).await,
        Commands::Export { out } => export_backup(&cli.data_dir, out.as_deref()).await,
        Commands::Import { file } => import_backup(&cli.data_dir, file).await,
    }
}

async fn init_store(path: &Path) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    let created = fleet.init().await?;

    println!("Initialized fleet data at {:?}", path);
    if created.is_empty() {
        println!("All tables already existed.");
    } else {
        for kind in created {
            println!("  created {}", kind.file_name());
        }
    }

    println!();
    println!("Get started:");
    println!("  fleetdb add drivers -f first_name=John -f last_name=Martinez \\");
    println!("      -f license_number=CDL123 -f driver_type=CD -f hire_date=2022-01-10 -f status=Active");
    println!("  fleetdb dashboard");

    Ok(())
}

async fn show_status(path: &Path) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;

    println!("fleetdb status");
    println!("==============");
    println!("Data: {:?}", fleet.data_dir());
    println!("Backups: {:?}", fleet.config().backup_dir());
    println!();

    for (kind, rows) in fleet.store().counts().await {
        let marker = if fleet.store().table_exists(kind).await {
            ""
        } else {
            " (missing)"
        };
        println!("  {:<12} {:>6}{}", kind.table_name(), rows, marker);
    }

    Ok(())
}

async fn add_record(path: &Path, kind: RecordKind, fields: &[String]) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    let form = forms::parse_pairs(fields)?;
    let id = fleet.add(kind, &form).await?;
    println!("{} '{}' added.", kind.label(), id);
    Ok(())
}

async fn list_records(path: &Path, kind: RecordKind) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    print_json(&fleet.list(kind).await?)
}

async fn show_dashboard(path: &Path) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    print_json(&fleet.dashboard().await)
}

async fn show_report(path: &Path, entity: ReportEntity, id: &str) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    let entity = EntityRef::new(entity.into(), id)?;
    print_json(&fleet.report(&entity).await?)
}

async fn export_backup(path: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    let backup = fleet.backup(out).await?;
    println!("Exported to {:?}", backup);
    Ok(())
}

async fn import_backup(path: &Path, file: &Path) -> anyhow::Result<()> {
    let fleet = Fleet::open(path).await?;
    let summary = fleet.import_file(file).await?;

    for table in &summary.replaced {
        println!("  replaced {:<12} {:>6} rows", table.table, table.rows);
    }
    for table in &summary.skipped {
        println!("  skipped  {}", table);
    }
    println!("Import complete.");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
