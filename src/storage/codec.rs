//! CSV encoding and decoding of record tables
//!
//! Every table file is UTF-8 CSV with a header row in schema order:
//!
//! ```text
//! pm_id,truck_id,pm_type,date,mileage,...,oil_change,...,total_cost,status,notes,created_at
//! 3f9a1c0e,t001,A Service,2024-06-01,182000,...,True,...,412.5,Completed,,2024-06-01T14:03:11Z
//! ```
//!
//! Rows are matched to fields by header name, so a file whose columns were
//! reordered by another tool still loads. Writing always uses schema order.

use crate::error::{Error, Result};
use crate::model::Record;

/// A row the decoder could not turn into a record
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the file (0 if unknown)
    pub line: u64,
    pub message: String,
}

/// Result of decoding a table file
#[derive(Debug, Clone)]
pub struct Decoded<R> {
    pub rows: Vec<R>,
    pub dropped: Vec<RowError>,
}

impl<R> Default for Decoded<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

/// Decode a table file's bytes
///
/// Fails only when the header itself is unusable; individual rows that do
/// not parse (wrong column count, unreadable timestamp) are collected in
/// [`Decoded::dropped`].
pub fn decode<R: Record>(bytes: &[u8]) -> Result<Decoded<R>> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Decoded::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let schema = R::KIND.schema();
    if !headers.iter().any(|h| h == schema.id_field()) {
        return Err(Error::CsvError {
            message: format!(
                "{} table header is missing the '{}' column",
                R::KIND,
                schema.id_field()
            ),
        });
    }

    let mut decoded = Decoded::default();
    for result in reader.deserialize::<R>() {
        match result {
            Ok(row) => decoded.rows.push(row),
            Err(err) => decoded.dropped.push(RowError {
                line: err.position().map(|p| p.line()).unwrap_or(0),
                message: err.to_string(),
            }),
        }
    }

    Ok(decoded)
}

/// Encode records as a complete table file: header, then one row per record
pub fn encode<R: Record>(records: &[R]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(R::KIND.schema().field_names())?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| Error::CsvError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Driver, DriverType, OtrRepair, PmRecord, Trailer, Truck};
    use crate::schema::RecordKind;

    fn header_of(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_header_follows_schema_order() {
        assert_eq!(
            header_of(&encode::<Driver>(&[]).unwrap()),
            RecordKind::Driver.schema().header_line()
        );
        assert_eq!(
            header_of(&encode::<PmRecord>(&[]).unwrap()),
            RecordKind::PmRecord.schema().header_line()
        );
    }

    #[test]
    fn test_rows_follow_header_order() {
        // A default record serializes one cell per schema column
        let bytes = encode(&[Trailer::default()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row.split(',').count(),
            RecordKind::Trailer.schema().fields.len()
        );
    }

    #[test]
    fn test_booleans_written_as_python_literals() {
        let mut repair = OtrRepair::new("t001", "d001").with_costs(10.0, 0.0, 0.0);
        repair.insurance_claim = true;
        let text = String::from_utf8(encode(&[repair]).unwrap()).unwrap();
        assert!(text.contains(",True,"));
    }

    #[test]
    fn test_roundtrip_preserves_records() {
        let driver = Driver::new("Maria", "Lopez", DriverType::LpOwner).with_id("00ab12cd");
        let bytes = encode(std::slice::from_ref(&driver)).unwrap();
        let decoded = decode::<Driver>(&bytes).unwrap();
        assert_eq!(decoded.rows, vec![driver]);
        assert!(decoded.dropped.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let good = Truck::new("T8001", "Volvo", "VNL 760");
        let mut text = String::from_utf8(encode(std::slice::from_ref(&good)).unwrap()).unwrap();
        text.push_str("short,row\n");

        let decoded = decode::<Truck>(text.as_bytes()).unwrap();
        assert_eq!(decoded.rows, vec![good]);
        assert_eq!(decoded.dropped.len(), 1);
        assert_eq!(decoded.dropped[0].line, 3);
    }

    #[test]
    fn test_bad_cost_cell_degrades_to_zero() {
        let csv = "pm_id,truck_id,parts_cost,labor_cost,total_cost,created_at\n\
                   pm1,t001,oops,50,50,2024-06-01T00:00:00Z\n";
        let decoded = decode::<PmRecord>(csv.as_bytes()).unwrap();
        assert_eq!(decoded.rows.len(), 1);
        assert_eq!(decoded.rows[0].parts_cost, 0.0);
        assert_eq!(decoded.rows[0].labor_cost, 50.0);
    }

    #[test]
    fn test_empty_and_foreign_files() {
        assert!(decode::<Driver>(b"").unwrap().rows.is_empty());
        assert!(decode::<Driver>(b"\n  \n").unwrap().rows.is_empty());
        assert!(decode::<Driver>(b"name,age\nbob,4\n").is_err());
    }
}
