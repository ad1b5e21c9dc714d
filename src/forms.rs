//! Turning raw form input into typed records
//!
//! Callers hand over untyped `name -> text` pairs (from a web form or the
//! CLI's `--field name=value`). The record kind's schema decides how each
//! value is read:
//!
//! - required fields must be present and non-blank
//! - numbers must parse; absent numbers are 0
//! - dates must be `YYYY-MM-DD`; absent dates stay empty
//! - booleans are checkboxes: present means true, whatever the value
//!
//! The id, `created_at` and cost totals are never taken from the input.

use crate::error::{Error, Result};
use crate::model::{fields, generate_id, Record};
use crate::schema::{FieldDef, FieldType, Presence, RecordKind, Schema};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Raw submitted values, by field name
pub type FormData = BTreeMap<String, String>;

/// Parse `name=value` arguments into form data
pub fn parse_pairs<I, S>(pairs: I) -> Result<FormData>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut form = FormData::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::Other(format!("Expected name=value, got '{}'", pair)))?;
        form.insert(name.trim().to_string(), value.to_string());
    }
    Ok(form)
}

/// Build a new record of kind `R` from form data, stamped now
pub fn coerce<R: Record>(form: &FormData) -> Result<R> {
    coerce_at(form, Utc::now())
}

/// Build a new record of kind `R` from form data with a given creation time
pub fn coerce_at<R: Record>(form: &FormData, now: DateTime<Utc>) -> Result<R> {
    let schema = R::KIND.schema();
    reject_unknown(schema, form)?;

    let mut object = Map::new();
    for field in schema.fields {
        let value = match field.presence {
            Presence::Generated => generated_value(field, now),
            Presence::Derived => Value::from(0.0),
            Presence::Required | Presence::Optional => input_value(R::KIND, field, form)?,
        };
        object.insert(field.name.to_string(), value);
    }

    if R::KIND.is_detail() && references_truck_and_trailer(&object) {
        return Err(Error::ConflictingReferences { kind: R::KIND });
    }

    let mut record: R = serde_json::from_value(Value::Object(object))?;
    record.refresh_derived();
    Ok(record)
}

fn reject_unknown(schema: &Schema, form: &FormData) -> Result<()> {
    for name in form.keys() {
        match schema.field(name) {
            Some(field) if field.is_input() => {}
            _ => {
                return Err(Error::UnknownField {
                    kind: schema.kind,
                    field: name.clone(),
                })
            }
        }
    }
    Ok(())
}

fn generated_value(field: &FieldDef, now: DateTime<Utc>) -> Value {
    match field.field_type {
        FieldType::Timestamp => Value::from(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
        _ => Value::from(generate_id()),
    }
}

fn input_value(kind: RecordKind, field: &FieldDef, form: &FormData) -> Result<Value> {
    let raw = form.get(field.name);

    // Checkboxes only submit when ticked
    if field.field_type == FieldType::Bool {
        return Ok(Value::Bool(raw.is_some()));
    }

    let text = match raw.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(text) => text,
        None if field.is_required() => {
            return Err(Error::MissingRequiredField {
                kind,
                field: field.name.to_string(),
            })
        }
        None => return Ok(empty_value(field.field_type)),
    };

    let mismatch = |expected| Error::TypeMismatch {
        field: field.name.to_string(),
        expected,
        actual: text.to_string(),
    };

    let value = match field.field_type {
        FieldType::Int => Value::from(text.parse::<u64>().map_err(|_| mismatch("integer"))?),
        FieldType::Float => Value::from(fields::parse_decimal(text).ok_or_else(|| mismatch("number"))?),
        FieldType::Date => {
            let date = fields::parse_date(text).ok_or_else(|| mismatch("date (YYYY-MM-DD)"))?;
            Value::from(date.format("%Y-%m-%d").to_string())
        }
        _ => Value::from(text),
    };
    Ok(value)
}

fn empty_value(field_type: FieldType) -> Value {
    match field_type {
        FieldType::Int => Value::from(0u64),
        FieldType::Float => Value::from(0.0),
        _ => Value::from(""),
    }
}

fn references_truck_and_trailer(object: &Map<String, Value>) -> bool {
    let present = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    };
    present("truck_id") && present("trailer_id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Driver, DriverType, MaintenanceRecord, OtrRepair, PmRecord, ShopJob};
    use chrono::NaiveDate;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn driver_form() -> FormData {
        form(&[
            ("first_name", "Maria"),
            ("last_name", "Lopez"),
            ("license_number", "CDL123456"),
            ("driver_type", "CD"),
            ("hire_date", "2021-03-15"),
            ("status", "Active"),
        ])
    }

    #[test]
    fn test_driver_from_form() {
        let driver: Driver = coerce(&driver_form()).unwrap();
        assert_eq!(driver.full_name(), "Maria Lopez");
        assert_eq!(driver.driver_type, DriverType::Cd);
        assert_eq!(driver.hire_date, NaiveDate::from_ymd_opt(2021, 3, 15));
        assert_eq!(driver.driver_id.as_str().len(), 8);
        assert_eq!(driver.phone, "");
    }

    #[test]
    fn test_missing_required_field() {
        let mut data = driver_form();
        data.remove("license_number");
        let err = coerce::<Driver>(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField { ref field, .. } if field == "license_number"
        ));

        data.insert("license_number".to_string(), "   ".to_string());
        assert!(coerce::<Driver>(&data).is_err());
    }

    #[test]
    fn test_unknown_and_generated_fields_rejected() {
        let mut data = driver_form();
        data.insert("favourite_color".to_string(), "blue".to_string());
        assert!(matches!(
            coerce::<Driver>(&data).unwrap_err(),
            Error::UnknownField { .. }
        ));

        let mut data = driver_form();
        data.insert("driver_id".to_string(), "d001".to_string());
        assert!(coerce::<Driver>(&data).is_err());
    }

    #[test]
    fn test_otr_total_and_checkbox() {
        let data = form(&[
            ("truck_id", "t001"),
            ("driver_id", "d001"),
            ("breakdown_date", "2024-02-10"),
            ("location", "Dallas, TX"),
            ("issue_description", "Blown tire"),
            ("repair_shop", "Roadside Pros"),
            ("repair_cost", "200"),
            ("tow_cost", "50"),
            ("hotel_cost", "25"),
            ("insurance_claim", "on"),
            ("status", "Open"),
        ]);
        let repair: OtrRepair = coerce(&data).unwrap();
        assert_eq!(repair.total_cost, 275.0);
        assert!(repair.insurance_claim);
        assert_eq!(repair.labor_hours, 0.0);
    }

    #[test]
    fn test_bad_number_is_type_mismatch() {
        let data = form(&[
            ("truck_id", "t001"),
            ("pm_type", "A Service"),
            ("date", "2024-05-01"),
            ("shop_name", "Main Shop"),
            ("status", "Completed"),
            ("parts_cost", "lots"),
        ]);
        let err = coerce::<PmRecord>(&data).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "parts_cost"));
    }

    #[test]
    fn test_pm_checkboxes_default_false() {
        let data = form(&[
            ("truck_id", "t001"),
            ("pm_type", "A Service"),
            ("date", "2024-05-01"),
            ("shop_name", "Main Shop"),
            ("status", "Completed"),
            ("oil_change", ""),
            ("parts_cost", "100.00"),
            ("labor_cost", "50.00"),
        ]);
        let pm: PmRecord = coerce(&data).unwrap();
        assert!(pm.oil_change);
        assert!(!pm.filter_change);
        assert_eq!(pm.total_cost, 150.0);
    }

    #[test]
    fn test_maintenance_cannot_reference_both() {
        let data = form(&[
            ("truck_id", "t001"),
            ("trailer_id", "tr001"),
            ("maintenance_type", "Inspection"),
            ("date", "2024-05-01"),
            ("status", "Completed"),
        ]);
        assert!(matches!(
            coerce::<MaintenanceRecord>(&data).unwrap_err(),
            Error::ConflictingReferences { .. }
        ));
    }

    #[test]
    fn test_shop_job_for_trailer() {
        let data = form(&[
            ("trailer_id", "tr001"),
            ("job_type", "Brake Work"),
            ("date_started", "2024-05-01"),
            ("description", "Replace pads"),
            ("technician", "Mike"),
            ("status", "Open"),
            ("priority", "High"),
            ("parts_cost", "100"),
            ("labor_cost", "50"),
        ]);
        let now = Utc::now();
        let job: ShopJob = coerce_at(&data, now).unwrap();
        assert_eq!(job.truck_id, None);
        assert_eq!(job.total_cost, 150.0);
        assert_eq!(job.created_at.timestamp(), now.timestamp());
    }

    #[test]
    fn test_parse_pairs() {
        let data = parse_pairs(["first_name=Ann", "notes=a=b"]).unwrap();
        assert_eq!(data["first_name"], "Ann");
        assert_eq!(data["notes"], "a=b");
        assert!(parse_pairs(["oops"]).is_err());
    }
}
