//! Storage layer for fleetdb
//!
//! One CSV table per record kind under a single data directory. The
//! [`Store`] handle owns that directory and serializes writes per table.

pub mod codec;
pub mod table;

pub use codec::{Decoded, RowError};
pub use table::Table;

use crate::error::Result;
use crate::model::{
    self, Driver, MaintenanceRecord, OtrRepair, PmRecord, Record, ShopJob, Trailer, Truck,
};
use crate::schema::RecordKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

/// Handle to the record store rooted at a data directory
///
/// Writers holding the same `Store` (typically behind an `Arc`) never
/// interleave on a table: `save` and `append` take that table's lock.
/// Nothing guards against a second process writing the same directory.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    /// One lock per table, indexed by [`RecordKind::index`]
    locks: [Mutex<()>; RecordKind::COUNT],
}

impl Store {
    /// Open a store at `root`; nothing is touched on disk until used
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table<R: Record>(&self) -> Table<R> {
        Table::open(&self.root)
    }

    /// Path of the CSV file backing `kind`
    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    pub async fn table_exists(&self, kind: RecordKind) -> bool {
        tokio::fs::try_exists(self.path_for(kind))
            .await
            .unwrap_or(false)
    }

    /// Create a header-only file for `kind` if it is missing
    ///
    /// Returns `true` if the file was created. Existing files are never
    /// truncated or rewritten.
    pub async fn ensure_initialized(&self, kind: RecordKind) -> Result<bool> {
        let created = table::init_file(&self.path_for(kind), kind.schema()).await?;
        if created {
            tracing::info!(table = kind.table_name(), "Initialized empty table");
        }
        Ok(created)
    }

    /// Initialize every table; returns the kinds that were created
    pub async fn ensure_all_initialized(&self) -> Result<Vec<RecordKind>> {
        let mut created = Vec::new();
        for kind in RecordKind::ALL {
            if self.ensure_initialized(kind).await? {
                created.push(kind);
            }
        }
        Ok(created)
    }

    /// Load every record of kind `R`, in file order
    ///
    /// A missing, empty or unreadable table loads as empty; the failure is
    /// logged rather than returned.
    pub async fn load<R: Record>(&self) -> Vec<R> {
        self.table::<R>().load().await
    }

    /// Replace the whole table for `R` with `records`
    pub async fn save<R: Record>(&self, records: &[R]) -> Result<()> {
        let _guard = self.lock(R::KIND).await;
        self.table::<R>().write(records).await?;
        tracing::info!(table = R::KIND.table_name(), rows = records.len(), "Saved table");
        Ok(())
    }

    /// Add one record at the end of its table
    ///
    /// Reads strictly: if the existing file cannot be read, nothing is
    /// written. Rows the decoder had to drop are not carried over.
    pub async fn append<R: Record>(&self, record: R) -> Result<()> {
        let _guard = self.lock(R::KIND).await;
        let table = self.table::<R>();

        let mut decoded = table.read().await?;
        if !decoded.dropped.is_empty() {
            tracing::warn!(
                table = R::KIND.table_name(),
                dropped = decoded.dropped.len(),
                "Rewriting table without rows that failed to parse"
            );
        }

        tracing::info!(table = R::KIND.table_name(), id = %record.id(), "Appending record");
        decoded.rows.push(record);
        table.write(&decoded.rows).await
    }

    /// A fresh short random id
    pub fn generate_id(&self) -> String {
        model::generate_id()
    }

    /// Load all seven tables
    pub async fn snapshot(&self) -> Snapshot {
        Snapshot {
            drivers: self.load().await,
            trucks: self.load().await,
            trailers: self.load().await,
            maintenance: self.load().await,
            otr_repairs: self.load().await,
            pm_records: self.load().await,
            shop_jobs: self.load().await,
        }
    }

    /// Row count per table, in canonical order
    pub async fn counts(&self) -> Vec<(RecordKind, usize)> {
        let snapshot = self.snapshot().await;
        RecordKind::ALL
            .iter()
            .map(|kind| (*kind, snapshot.len_of(*kind)))
            .collect()
    }

    async fn lock(&self, kind: RecordKind) -> MutexGuard<'_, ()> {
        self.locks[kind.index()].lock().await
    }
}

/// Every table loaded at once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub drivers: Vec<Driver>,
    pub trucks: Vec<Truck>,
    pub trailers: Vec<Trailer>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub otr_repairs: Vec<OtrRepair>,
    pub pm_records: Vec<PmRecord>,
    pub shop_jobs: Vec<ShopJob>,
}

impl Snapshot {
    pub fn len_of(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Driver => self.drivers.len(),
            RecordKind::Truck => self.trucks.len(),
            RecordKind::Trailer => self.trailers.len(),
            RecordKind::Maintenance => self.maintenance.len(),
            RecordKind::OtrRepair => self.otr_repairs.len(),
            RecordKind::PmRecord => self.pm_records.len(),
            RecordKind::ShopJob => self.shop_jobs.len(),
        }
    }
}
