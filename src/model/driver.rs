use super::fields;
use super::ids::DriverId;
use super::Record;
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employment category of a driver
///
/// Unrecognised values are kept verbatim so they survive a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriverType {
    /// Company driver
    Cd,
    /// Lease purchase
    Lp,
    /// Lease purchase, owner operator
    LpOwner,
    Other(String),
}

impl DriverType {
    pub fn as_str(&self) -> &str {
        match self {
            DriverType::Cd => "CD",
            DriverType::Lp => "LP",
            DriverType::LpOwner => "LP Owner",
            DriverType::Other(s) => s,
        }
    }
}

impl Default for DriverType {
    fn default() -> Self {
        DriverType::Other(String::new())
    }
}

impl From<String> for DriverType {
    fn from(s: String) -> Self {
        match s.trim() {
            "CD" => DriverType::Cd,
            "LP" => DriverType::Lp,
            "LP Owner" => DriverType::LpOwner,
            _ => DriverType::Other(s),
        }
    }
}

impl From<DriverType> for String {
    fn from(t: DriverType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver on the roster
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Driver {
    pub driver_id: DriverId,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub driver_type: DriverType,
    #[serde(deserialize_with = "fields::optional_date")]
    pub hire_date: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(deserialize_with = "fields::optional_date")]
    pub cdl_expiry: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::optional_date")]
    pub medical_expiry: Option<NaiveDate>,
    pub status: String,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Driver {
    /// A new driver with a generated id, stamped now
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        driver_type: DriverType,
    ) -> Self {
        Self {
            driver_id: DriverId::generate(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            driver_type,
            status: "Active".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<DriverId>) -> Self {
        self.driver_id = id.into();
        self
    }

    /// `"{first_name} {last_name}"`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_company_driver(&self) -> bool {
        self.driver_type == DriverType::Cd
    }
}

impl Record for Driver {
    const KIND: RecordKind = RecordKind::Driver;
    type Id = DriverId;

    fn id(&self) -> &DriverId {
        &self.driver_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
