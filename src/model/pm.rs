use super::fields;
use super::ids::{PmId, TruckId};
use super::{CostBearing, Record};
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Preventive-maintenance service on a truck
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PmRecord {
    pub pm_id: PmId,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub truck_id: Option<TruckId>,
    pub pm_type: String,
    #[serde(deserialize_with = "fields::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::count")]
    pub mileage: u64,
    #[serde(deserialize_with = "fields::optional_date")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::count")]
    pub next_due_mileage: u64,
    pub shop_name: String,
    pub technician: String,
    #[serde(with = "fields::flag")]
    pub oil_change: bool,
    #[serde(with = "fields::flag")]
    pub filter_change: bool,
    pub inspection_items: String,
    #[serde(deserialize_with = "fields::amount")]
    pub parts_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub labor_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub total_cost: f64,
    pub status: String,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl PmRecord {
    pub fn new(truck_id: impl Into<TruckId>, pm_type: impl Into<String>) -> Self {
        Self {
            pm_id: PmId::generate(),
            truck_id: Some(truck_id.into()),
            pm_type: pm_type.into(),
            status: "Completed".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<PmId>) -> Self {
        self.pm_id = id.into();
        self
    }

    /// Set parts and labor; `total_cost` follows
    pub fn with_costs(mut self, parts_cost: f64, labor_cost: f64) -> Self {
        self.parts_cost = parts_cost;
        self.labor_cost = labor_cost;
        self.refresh_derived();
        self
    }
}

impl Record for PmRecord {
    const KIND: RecordKind = RecordKind::PmRecord;
    type Id = PmId;

    fn id(&self) -> &PmId {
        &self.pm_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn refresh_derived(&mut self) {
        self.total_cost = self.component_total();
    }
}

impl CostBearing for PmRecord {
    fn total_cost(&self) -> f64 {
        self.total_cost
    }

    fn component_total(&self) -> f64 {
        self.parts_cost + self.labor_cost
    }
}
