//! Lenient field codecs shared by every record kind
//!
//! CSV cells and JSON values written by older tools are not always well
//! formed. A cell that cannot be read as its declared type degrades to a
//! default (zero, false, no date) instead of rejecting the whole row:
//!
//! ```text
//! parts_cost: "12.50"  -> 12.5
//! parts_cost: "n/a"    -> 0.0
//! oil_change: "True"   -> true
//! hire_date:  ""       -> None
//! ```
//!
//! Only `created_at` is strict: a row without a readable creation time is
//! dropped by the loader.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// Any scalar a CSV cell or JSON value can hold
#[derive(Debug, Clone, PartialEq)]
enum Loose {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

struct LooseVisitor;

impl<'de> Visitor<'de> for LooseVisitor {
    type Value = Loose;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Loose, E> {
        Ok(Loose::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Loose, E> {
        Ok(Loose::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Loose, E> {
        Ok(Loose::UInt(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Loose, E> {
        Ok(Loose::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Loose, E> {
        Ok(Loose::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Loose, E> {
        Ok(Loose::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Loose, E> {
        Ok(Loose::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Loose, E> {
        Ok(Loose::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Loose, D::Error> {
        deserializer.deserialize_any(LooseVisitor)
    }
}

impl<'de> Deserialize<'de> for Loose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LooseVisitor)
    }
}

/// Parse decimal text, tolerating thousands separators and a leading `$`
pub fn parse_decimal(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a `YYYY-MM-DD` (or `YYYY/MM/DD`) date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a creation timestamp: RFC 3339, or a naive ISO timestamp taken as UTC
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc())
}

/// Decimal amount; anything unreadable is 0
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Loose::deserialize(deserializer)? {
        Loose::Int(i) => i as f64,
        Loose::UInt(u) => u as f64,
        Loose::Float(f) if f.is_finite() => f,
        Loose::Text(s) => parse_decimal(&s).unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(value)
}

/// Whole count (mileage); decimals are truncated, anything unreadable is 0
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Loose::deserialize(deserializer)? {
        Loose::UInt(u) => u,
        Loose::Int(i) => u64::try_from(i).unwrap_or(0),
        Loose::Float(f) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
        Loose::Text(s) => parse_decimal(&s)
            .filter(|f| *f >= 0.0)
            .map(|f| f.trunc() as u64)
            .unwrap_or(0),
        _ => 0,
    };
    Ok(value)
}

/// Optional date; empty or unreadable text is `None`
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Text(s) => Ok(parse_date(&s)),
        _ => Ok(None),
    }
}

/// Creation timestamp; unreadable values reject the row
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Text(s) => parse_timestamp(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid created_at timestamp '{}'", s))),
        other => Err(de::Error::custom(format!(
            "invalid created_at timestamp {:?}",
            other
        ))),
    }
}

/// Optional reference; empty text means "no reference"
///
/// Read as text (never number-sniffed) so ids like `00123abc` keep their
/// leading zeros. Anything else is kept verbatim: references match ids
/// exactly, padding included.
pub fn optional_ref<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(T::from))
}

/// Booleans stored as `True`/`False`
pub mod flag {
    use super::Loose;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = match Loose::deserialize(deserializer)? {
            Loose::Bool(b) => b,
            Loose::UInt(u) => u != 0,
            Loose::Int(i) => i != 0,
            Loose::Text(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "1" | "yes" | "y" | "on"
            ),
            _ => false,
        };
        Ok(value)
    }
}
