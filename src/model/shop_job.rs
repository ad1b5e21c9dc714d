use super::fields;
use super::ids::{ShopJobId, TrailerId, TruckId};
use super::{CostBearing, Record};
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(s) => s,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.trim() {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            _ => Priority::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work done in the company shop on a truck or a trailer (never both)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopJob {
    pub job_id: ShopJobId,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub truck_id: Option<TruckId>,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub trailer_id: Option<TrailerId>,
    pub job_type: String,
    #[serde(deserialize_with = "fields::optional_date")]
    pub date_started: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::optional_date")]
    pub date_completed: Option<NaiveDate>,
    pub description: String,
    pub technician: String,
    pub parts_used: String,
    #[serde(deserialize_with = "fields::amount")]
    pub labor_hours: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub parts_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub labor_cost: f64,
    #[serde(deserialize_with = "fields::amount")]
    pub total_cost: f64,
    pub status: String,
    pub priority: Priority,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ShopJob {
    fn new(job_type: impl Into<String>) -> Self {
        Self {
            job_id: ShopJobId::generate(),
            job_type: job_type.into(),
            status: "Open".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn for_truck(truck_id: impl Into<TruckId>, job_type: impl Into<String>) -> Self {
        Self {
            truck_id: Some(truck_id.into()),
            ..Self::new(job_type)
        }
    }

    pub fn for_trailer(trailer_id: impl Into<TrailerId>, job_type: impl Into<String>) -> Self {
        Self {
            trailer_id: Some(trailer_id.into()),
            ..Self::new(job_type)
        }
    }

    pub fn with_id(mut self, id: impl Into<ShopJobId>) -> Self {
        self.job_id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
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

impl Record for ShopJob {
    const KIND: RecordKind = RecordKind::ShopJob;
    type Id = ShopJobId;

    fn id(&self) -> &ShopJobId {
        &self.job_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn refresh_derived(&mut self) {
        self.total_cost = self.component_total();
    }
}

impl CostBearing for ShopJob {
    fn total_cost(&self) -> f64 {
        self.total_cost
    }

    fn component_total(&self) -> f64 {
        self.parts_cost + self.labor_cost
    }
}
