//! Table - one record kind stored in one CSV file
//!
//! Tables are analogous to collections in a document database: the file
//! holds every record of its kind, in insertion order.
//!
//! Directory structure:
//! ```text
//! /tms_data/
//!   drivers.csv
//!   trucks.csv
//!   trailers.csv
//!   maintenance.csv
//!   otr_repairs.csv
//!   pm_records.csv
//!   shop_jobs.csv
//! ```

use super::codec::{self, Decoded};
use crate::error::{Error, Result};
use crate::model::Record;
use crate::schema::{RecordKind, Schema};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Handle to the CSV file backing one record kind
#[derive(Debug)]
pub struct Table<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Table<R> {
    /// Open the table for `R` inside `data_dir`
    pub fn open(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(R::KIND.file_name()),
            _record: PhantomData,
        }
    }

    pub fn kind(&self) -> RecordKind {
        R::KIND
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists
    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Create a header-only file if none exists; returns whether it was created
    pub async fn ensure_initialized(&self) -> Result<bool> {
        init_file(&self.path, R::KIND.schema()).await
    }

    /// Read and decode the file; a missing file is an empty table
    pub async fn read(&self) -> Result<Decoded<R>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Decoded::default()),
            Err(source) => {
                return Err(Error::FileReadError {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let decoded = codec::decode::<R>(&bytes)?;
        for row in &decoded.dropped {
            tracing::warn!(
                table = R::KIND.table_name(),
                line = row.line,
                "Dropping unreadable row: {}",
                row.message
            );
        }
        Ok(decoded)
    }

    /// Best-effort read: any failure yields an empty table plus a diagnostic
    pub async fn load(&self) -> Vec<R> {
        match self.read().await {
            Ok(decoded) => {
                tracing::debug!(
                    table = R::KIND.table_name(),
                    rows = decoded.rows.len(),
                    "Loaded table"
                );
                decoded.rows
            }
            Err(e) => {
                tracing::warn!(
                    table = R::KIND.table_name(),
                    path = %self.path.display(),
                    "Failed to load table, treating as empty: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the file with exactly these records
    ///
    /// Writes a sibling temp file and renames it into place, so a reader
    /// never sees a half-written table.
    pub async fn write(&self, records: &[R]) -> Result<()> {
        let bytes = codec::encode(records)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }

        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(|source| self.write_error(source))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.write_error(source))?;

        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::FileWriteError {
            path: self.path.clone(),
            source,
        }
    }
}

/// Create `path` containing only the schema header, unless it already exists
pub(crate) async fn init_file(path: &Path, schema: &Schema) -> Result<bool> {
    let write_error = |source| Error::FileWriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    // create_new never truncates: an existing file is left untouched
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(source) => return Err(write_error(source)),
    };

    let header = format!("{}\n", schema.header_line());
    file.write_all(header.as_bytes()).await.map_err(write_error)?;
    file.flush().await.map_err(write_error)?;
    Ok(true)
}
