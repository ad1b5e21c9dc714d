use super::fields;
use super::ids::{DriverRef, TruckId};
use super::Record;
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A tractor unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Truck {
    pub truck_id: TruckId,
    pub truck_number: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub vin: String,
    pub engine_type: String,
    #[serde(deserialize_with = "fields::count")]
    pub mileage: u64,
    /// Driver id, or (in older data) the driver's full name
    pub assigned_driver: DriverRef,
    pub status: String,
    #[serde(deserialize_with = "fields::optional_date")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::optional_date")]
    pub last_pm_date: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::optional_date")]
    pub next_pm_due: Option<NaiveDate>,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Truck {
    pub fn new(
        truck_number: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            truck_id: TruckId::generate(),
            truck_number: truck_number.into(),
            make: make.into(),
            model: model.into(),
            status: "Active".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<TruckId>) -> Self {
        self.truck_id = id.into();
        self
    }

    pub fn assigned_to(mut self, driver: impl Into<DriverRef>) -> Self {
        self.assigned_driver = driver.into();
        self
    }

    /// `"{make} {model}"`
    pub fn make_model(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

impl Record for Truck {
    const KIND: RecordKind = RecordKind::Truck;
    type Id = TruckId;

    fn id(&self) -> &TruckId {
        &self.truck_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
