//! fleetdb - fleet maintenance records in flat CSV tables
//!
//! Tracks drivers, trucks, trailers and four kinds of maintenance activity
//! (shop maintenance, over-the-road repairs, preventive maintenance, shop
//! jobs), and derives dashboards and per-vehicle reports from them.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Fleet handle                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │    Forms     │  │   Transfer   │  │  Schema Registry   │  │
//! │  │  (coercion)  │  │ (export/imp) │  │  (7 record kinds)  │  │
//! │  └──────┬───────┘  └──────┬───────┘  └─────────┬──────────┘  │
//! │         │                 │                    │             │
//! │         ▼                 ▼                    ▼             │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                     Record Store                       │  │
//! │  │   load / save / append, one lock per table             │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │ Snapshot                      │
//! │                              ▼                               │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              Join & Aggregation Engine                 │  │
//! │  │   denormalize / dashboard / truck, driver, trailer     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                              │                               │
//! │                              ▼                               │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │           File System (one CSV per kind)               │  │
//! │  │   <data_dir>/drivers.csv  ...  <data_dir>/shop_jobs.csv│  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod report;
pub mod schema;
pub mod storage;
pub mod transfer;

pub use config::Config;
pub use error::{Error, Result};
pub use schema::RecordKind;
pub use storage::{Snapshot, Store};

use chrono::Utc;
use forms::FormData;
use model::{Driver, MaintenanceRecord, OtrRepair, PmRecord, Record, ShopJob, Trailer, Truck};
use report::{DashboardStats, Denormalize, EntityRef, EntityReport, Lookups};
use serde::Serialize;
use std::path::{Path, PathBuf};
use transfer::{ExportDocument, ImportSummary};

/// The main fleet handle
pub struct Fleet {
    config: Config,
    store: Store,
}

impl Fleet {
    /// Open the fleet stored in `data_dir`, reading its config if present
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let config = Config::load(data_dir).await?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let store = Store::open(&config.data_dir);
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        self.store.root()
    }

    /// Create the config file and any missing tables
    pub async fn init(&self) -> Result<Vec<RecordKind>> {
        self.config.write_if_missing().await?;
        self.store.ensure_all_initialized().await
    }

    /// Coerce form input into a new record of `kind` and append it
    ///
    /// Returns the generated id.
    pub async fn add(&self, kind: RecordKind, form: &FormData) -> Result<String> {
        match kind {
            RecordKind::Driver => self.add_record::<Driver>(form).await,
            RecordKind::Truck => self.add_record::<Truck>(form).await,
            RecordKind::Trailer => self.add_record::<Trailer>(form).await,
            RecordKind::Maintenance => self.add_record::<MaintenanceRecord>(form).await,
            RecordKind::OtrRepair => self.add_record::<OtrRepair>(form).await,
            RecordKind::PmRecord => self.add_record::<PmRecord>(form).await,
            RecordKind::ShopJob => self.add_record::<ShopJob>(form).await,
        }
    }

    async fn add_record<R: Record>(&self, form: &FormData) -> Result<String> {
        let record: R = forms::coerce(form)?;
        let id = record.id().to_string();
        self.store.append(record).await?;
        Ok(id)
    }

    /// Every record of `kind` as JSON, with joined display fields where
    /// the kind references other entities
    pub async fn list(&self, kind: RecordKind) -> Result<serde_json::Value> {
        match kind {
            RecordKind::Driver => to_json(self.store.load::<Driver>().await),
            RecordKind::Trailer => to_json(self.store.load::<Trailer>().await),
            RecordKind::Truck => self.list_denormalized::<Truck>().await,
            RecordKind::Maintenance => self.list_denormalized::<MaintenanceRecord>().await,
            RecordKind::OtrRepair => self.list_denormalized::<OtrRepair>().await,
            RecordKind::PmRecord => self.list_denormalized::<PmRecord>().await,
            RecordKind::ShopJob => self.list_denormalized::<ShopJob>().await,
        }
    }

    async fn list_denormalized<R: Denormalize>(&self) -> Result<serde_json::Value> {
        let records = self.store.load::<R>().await;
        let drivers = self.store.load::<Driver>().await;
        let trucks = self.store.load::<Truck>().await;
        let trailers = self.store.load::<Trailer>().await;

        let lookups = Lookups::new(&drivers, &trucks, &trailers);
        to_json(report::denormalize(&records, &lookups))
    }

    pub async fn dashboard(&self) -> DashboardStats {
        report::aggregate_global(&self.store.snapshot().await)
    }

    pub async fn report(&self, entity: &EntityRef) -> Result<EntityReport> {
        report::aggregate_for_entity(&self.store.snapshot().await, entity)
    }

    pub async fn export(&self) -> ExportDocument {
        transfer::export(&self.store, self.config.data_version()).await
    }

    /// Export everything into a timestamped backup file
    pub async fn backup(&self, dir: Option<&Path>) -> Result<PathBuf> {
        let doc = self.export().await;
        let dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.backup_dir());
        transfer::write_backup(&doc, &dir, Utc::now()).await
    }

    /// Replace tables from an export document on disk
    pub async fn import_file(&self, path: &Path) -> Result<ImportSummary> {
        let doc = transfer::read_document(path).await?;
        transfer::import(&self.store, doc).await
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
