use super::fields;
use super::ids::{DriverId, OtrId, TruckId};
use super::{CostBearing, Record};
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An over-the-road breakdown and its repair
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtrRepair {
    pub otr_id: OtrId,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub truck_id: Option<TruckId>,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub driver_id: Option<DriverId>,
    #[serde(deserialize_with = "fields::optional_date")]
    pub breakdown_date: Option<NaiveDate>,
    pub location: String,
    pub issue_description: String,
    pub repair_shop: String,
    #[serde(deserialize_with = "fields::amount")]
    pub repair_cost: f64,
    pub parts_used: String,
    #[serde(deserialize_with = "fields::amount")]
    pub labor_hours: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub downtime_hours: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub tow_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub hotel_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub total_cost: f64,
    #[serde(with = "fields::flag")]
    pub insurance_claim: bool,
    pub status: String,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl OtrRepair {
    pub fn new(truck_id: impl Into<TruckId>, driver_id: impl Into<DriverId>) -> Self {
        Self {
            otr_id: OtrId::generate(),
            truck_id: Some(truck_id.into()),
            driver_id: Some(driver_id.into()),
            status: "Open".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<OtrId>) -> Self {
        self.otr_id = id.into();
        self
    }

    /// Set repair, tow and hotel costs; `total_cost` follows
    pub fn with_costs(mut self, repair_cost: f64, tow_cost: f64, hotel_cost: f64) -> Self {
        self.repair_cost = repair_cost;
        self.tow_cost = tow_cost;
        self.hotel_cost = hotel_cost;
        self.refresh_derived();
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == "Open"
    }
}

impl Record for OtrRepair {
    const KIND: RecordKind = RecordKind::OtrRepair;
    type Id = OtrId;

    fn id(&self) -> &OtrId {
        &self.otr_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn refresh_derived(&mut self) {
        self.total_cost = self.component_total();
    }
}

impl CostBearing for OtrRepair {
    fn total_cost(&self) -> f64 {
        self.total_cost
    }

    fn component_total(&self) -> f64 {
        self.repair_cost + self.tow_cost + self.hotel_cost
    }
}
