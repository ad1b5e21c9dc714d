//! Whole-store export and import
//!
//! The export document is one JSON object with an array per table:
//!
//! ```json
//! {
//!   "export_date": "2024-06-01T14:03:11Z",
//!   "data_version": "TMS v1.0",
//!   "drivers": [ { "driver_id": "d001", ... } ],
//!   "trucks": [ ... ],
//!   ...
//! }
//! ```
//!
//! Cells keep the shape other tools expect: booleans are JSON booleans and
//! an unset reference or date is `""`. On import, scalar cells in text
//! columns are read as text, so a `"year": 2021` written by a spreadsheet
//! export loads as `"2021"`.
//!
//! Import replaces each table present in the document and leaves tables
//! whose key is absent untouched. Tables are replaced one at a time; if a
//! write fails part-way, tables already replaced stay replaced.

use crate::error::{Error, Result};
use crate::model::{
    Driver, MaintenanceRecord, OtrRepair, PmRecord, Record, ShopJob, Trailer, Truck,
};
use crate::schema::{FieldType, RecordKind};
use crate::storage::{Snapshot, Store};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A full or partial copy of the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub data_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drivers: Option<Vec<Driver>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trucks: Option<Vec<Truck>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailers: Option<Vec<Trailer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Vec<MaintenanceRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otr_repairs: Option<Vec<OtrRepair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_records: Option<Vec<PmRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_jobs: Option<Vec<ShopJob>>,
}

impl ExportDocument {
    /// A document carrying every table of `snapshot`
    pub fn from_snapshot(
        snapshot: Snapshot,
        data_version: impl Into<String>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            data_version: data_version.into(),
            drivers: Some(snapshot.drivers),
            trucks: Some(snapshot.trucks),
            trailers: Some(snapshot.trailers),
            maintenance: Some(snapshot.maintenance),
            otr_repairs: Some(snapshot.otr_repairs),
            pm_records: Some(snapshot.pm_records),
            shop_jobs: Some(snapshot.shop_jobs),
        }
    }

    /// Tables present in the document, in canonical order
    pub fn tables(&self) -> Vec<RecordKind> {
        RecordKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    /// The document as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut value = serde_json::to_value(self)?;
        reshape_cells(&mut value, to_document_cell);
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn has(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Driver => self.drivers.is_some(),
            RecordKind::Truck => self.trucks.is_some(),
            RecordKind::Trailer => self.trailers.is_some(),
            RecordKind::Maintenance => self.maintenance.is_some(),
            RecordKind::OtrRepair => self.otr_repairs.is_some(),
            RecordKind::PmRecord => self.pm_records.is_some(),
            RecordKind::ShopJob => self.shop_jobs.is_some(),
        }
    }
}

/// One table written by an import
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedTable {
    pub table: &'static str,
    pub rows: usize,
}

/// What an import did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub replaced: Vec<ImportedTable>,
    /// Tables the document did not mention
    pub skipped: Vec<&'static str>,
}

/// Export every table
pub async fn export(store: &Store, data_version: &str) -> ExportDocument {
    let snapshot = store.snapshot().await;
    ExportDocument::from_snapshot(snapshot, data_version, Utc::now())
}

/// Write `doc` as `tms_backup_YYYYMMDD_HHMMSS.json` under `dir`
pub async fn write_backup(
    doc: &ExportDocument,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = dir.join(backup_file_name(now));
    let json = doc.to_json_pretty()?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| Error::FileWriteError {
            path: dir.to_path_buf(),
            source,
        })?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|source| Error::FileWriteError {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Wrote backup");
    Ok(path)
}

pub fn backup_file_name(now: DateTime<Utc>) -> String {
    format!("tms_backup_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Parse an export document
pub fn parse_document(text: &str) -> Result<ExportDocument> {
    let payload = |e: serde_json::Error| Error::ImportPayload {
        message: e.to_string(),
    };
    let mut value: Value = serde_json::from_str(text).map_err(payload)?;
    reshape_cells(&mut value, from_document_cell);
    serde_json::from_value(value).map_err(payload)
}

/// Apply `reshape` to every known column of every table in `doc`
fn reshape_cells(doc: &mut Value, reshape: fn(FieldType, &mut Value)) {
    for kind in RecordKind::ALL {
        let Some(rows) = doc.get_mut(kind.table_name()).and_then(Value::as_array_mut) else {
            continue;
        };
        for row in rows.iter_mut().filter_map(Value::as_object_mut) {
            for field in kind.schema().fields {
                if let Some(cell) = row.get_mut(field.name) {
                    reshape(field.field_type, cell);
                }
            }
        }
    }
}

fn to_document_cell(field_type: FieldType, cell: &mut Value) {
    let shaped = match (field_type, &*cell) {
        (FieldType::Bool, Value::String(s)) => Value::Bool(s == "True"),
        (FieldType::Ref(_) | FieldType::Date, Value::Null) => Value::from(""),
        _ => return,
    };
    *cell = shaped;
}

fn from_document_cell(field_type: FieldType, cell: &mut Value) {
    let textual = matches!(
        field_type,
        FieldType::Id | FieldType::Text | FieldType::Ref(_) | FieldType::Date | FieldType::Timestamp
    );
    if !textual {
        return;
    }
    let text = match &*cell {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        Value::Null => String::new(),
        _ => return,
    };
    *cell = Value::String(text);
}

/// Read and parse an export document from disk
pub async fn read_document(path: &Path) -> Result<ExportDocument> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
    parse_document(&text)
}

/// Replace every table present in `doc`
pub async fn import(store: &Store, doc: ExportDocument) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    replace(store, doc.drivers, &mut summary).await?;
    replace(store, doc.trucks, &mut summary).await?;
    replace(store, doc.trailers, &mut summary).await?;
    replace(store, doc.maintenance, &mut summary).await?;
    replace(store, doc.otr_repairs, &mut summary).await?;
    replace(store, doc.pm_records, &mut summary).await?;
    replace(store, doc.shop_jobs, &mut summary).await?;

    tracing::info!(
        replaced = summary.replaced.len(),
        skipped = summary.skipped.len(),
        "Import finished"
    );
    Ok(summary)
}

async fn replace<R: Record>(
    store: &Store,
    rows: Option<Vec<R>>,
    summary: &mut ImportSummary,
) -> Result<()> {
    let table = R::KIND.table_name();
    match rows {
        Some(rows) => {
            store.save(&rows).await?;
            summary.replaced.push(ImportedTable {
                table,
                rows: rows.len(),
            });
        }
        None => summary.skipped.push(table),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DriverType;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_backup_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 14, 3, 11).unwrap();
        assert_eq!(backup_file_name(now), "tms_backup_20240601_140311.json");
    }

    #[test]
    fn test_absent_keys_parse_as_none() {
        let doc = parse_document(r#"{"drivers": [], "export_date": "2024-01-01T00:00:00"}"#)
            .unwrap();
        assert_eq!(doc.drivers, Some(vec![]));
        assert!(doc.trucks.is_none());
        assert_eq!(doc.tables(), vec![RecordKind::Driver]);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            parse_document("{ not json").unwrap_err(),
            Error::ImportPayload { .. }
        ));
        assert!(matches!(
            parse_document(r#"{"drivers": 7}"#).unwrap_err(),
            Error::ImportPayload { .. }
        ));
    }

    #[test]
    fn test_numeric_cells_in_text_columns() {
        let doc = parse_document(
            r#"{
                "drivers": [{"driver_id": 17, "first_name": "John", "last_name": "Martinez",
                             "phone": 5550100, "notes": null,
                             "created_at": "2024-01-01T08:00:00"}],
                "trucks": [{"truck_id": "t1", "truck_number": 8001, "year": 2021,
                            "vin": 12345, "mileage": 150000, "assigned_driver": 17,
                            "created_at": "2024-01-01T08:00:00"}]
            }"#,
        )
        .unwrap();

        let driver = &doc.drivers.as_ref().unwrap()[0];
        assert_eq!(driver.driver_id.as_str(), "17");
        assert_eq!(driver.phone, "5550100");
        assert_eq!(driver.notes, "");

        let truck = &doc.trucks.as_ref().unwrap()[0];
        assert_eq!(truck.year, "2021");
        assert_eq!(truck.truck_number, "8001");
        assert_eq!(truck.vin, "12345");
        assert_eq!(truck.mileage, 150000);
        assert!(truck.assigned_driver.matches_id(&driver.driver_id));
    }

    #[test]
    fn test_written_cells_use_json_booleans_and_empty_references() {
        let mut repair = OtrRepair::new("t1", "d1").with_id("o1");
        repair.insurance_claim = true;
        let doc = ExportDocument {
            trailers: Some(vec![Trailer::new("TR100", "Reefer").with_id("tr1")]),
            otr_repairs: Some(vec![repair]),
            ..ExportDocument::default()
        };

        let json = doc.to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["otr_repairs"][0]["insurance_claim"], Value::Bool(true));
        assert_eq!(value["trailers"][0]["assigned_truck"], Value::from(""));
        assert_eq!(value["trailers"][0]["last_inspection"], Value::from(""));

        assert_eq!(parse_document(&json).unwrap(), doc);
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_store() {
        let source_dir = TempDir::new().unwrap();
        let source = Store::open(source_dir.path());
        source
            .append(Driver::new("John", "Martinez", DriverType::Cd).with_id("d1"))
            .await
            .unwrap();
        source
            .append(Truck::new("T8001", "Volvo", "VNL").with_id("t1").assigned_to("d1"))
            .await
            .unwrap();

        let doc = export(&source, "TMS v1.0").await;
        assert_eq!(doc.tables().len(), 7);

        let target_dir = TempDir::new().unwrap();
        let target = Store::open(target_dir.path());
        let summary = import(&target, doc).await.unwrap();

        assert_eq!(summary.replaced.len(), 7);
        assert!(summary.skipped.is_empty());
        assert_eq!(target.snapshot().await, source.snapshot().await);
    }

    #[tokio::test]
    async fn test_backup_round_trips_through_disk() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path().join("data"));
        store
            .append(Trailer::new("TR100", "Reefer").with_id("tr1"))
            .await
            .unwrap();

        let doc = export(&store, "TMS v1.0").await;
        let path = write_backup(&doc, &tmp.path().join("backups"), Utc::now())
            .await
            .unwrap();
        let read_back = read_document(&path).await.unwrap();
        assert_eq!(read_back, doc);
    }
}
