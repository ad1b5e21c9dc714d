use super::fields;
use super::ids::{MaintenanceId, TrailerId, TruckId};
use super::{CostBearing, Record};
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Shop maintenance on a truck or a trailer (never both)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceRecord {
    pub maintenance_id: MaintenanceId,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub truck_id: Option<TruckId>,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub trailer_id: Option<TrailerId>,
    pub maintenance_type: String,
    #[serde(deserialize_with = "fields::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::count")]
    pub mileage: u64,
    pub description: String,
    #[serde(deserialize_with = "fields::amount")]
    pub parts_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub labor_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub total_cost: f64,
    pub shop_name: String,
    pub shop_location: String,
    pub technician: String,
    pub status: String,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    fn new(maintenance_type: impl Into<String>) -> Self {
        Self {
            maintenance_id: MaintenanceId::generate(),
            maintenance_type: maintenance_type.into(),
            status: "Completed".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn for_truck(truck_id: impl Into<TruckId>, maintenance_type: impl Into<String>) -> Self {
        Self {
            truck_id: Some(truck_id.into()),
            ..Self::new(maintenance_type)
        }
    }

    pub fn for_trailer(
        trailer_id: impl Into<TrailerId>,
        maintenance_type: impl Into<String>,
    ) -> Self {
        Self {
            trailer_id: Some(trailer_id.into()),
            ..Self::new(maintenance_type)
        }
    }

    pub fn with_id(mut self, id: impl Into<MaintenanceId>) -> Self {
        self.maintenance_id = id.into();
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

impl Record for MaintenanceRecord {
    const KIND: RecordKind = RecordKind::Maintenance;
    type Id = MaintenanceId;

    fn id(&self) -> &MaintenanceId {
        &self.maintenance_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn refresh_derived(&mut self) {
        self.total_cost = self.component_total();
    }
}

impl CostBearing for MaintenanceRecord {
    fn total_cost(&self) -> f64 {
        self.total_cost
    }

    fn component_total(&self) -> f64 {
        self.parts_cost + self.labor_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_parts_plus_labor() {
        let record = MaintenanceRecord::for_truck("t001", "Brake Service").with_costs(100.00, 50.00);
        assert_eq!(record.total_cost, 150.00);
        assert_eq!(record.trailer_id, None);
    }

    #[test]
    fn test_trailer_record_has_no_truck() {
        let record = MaintenanceRecord::for_trailer("tr001", "Inspection");
        assert_eq!(record.truck_id, None);
        assert_eq!(record.trailer_id, Some(TrailerId::new("tr001")));
    }
}
