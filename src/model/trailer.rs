use super::fields;
use super::ids::{TrailerId, TruckId};
use super::Record;
use crate::schema::RecordKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trailer {
    pub trailer_id: TrailerId,
    pub trailer_number: String,
    #[serde(rename = "type")]
    pub trailer_type: String,
    pub year: String,
    pub make: String,
    pub capacity: String,
    #[serde(deserialize_with = "fields::optional_ref")]
    pub assigned_truck: Option<TruckId>,
    pub status: String,
    #[serde(deserialize_with = "fields::optional_date")]
    pub last_inspection: Option<NaiveDate>,
    #[serde(deserialize_with = "fields::optional_date")]
    pub next_inspection_due: Option<NaiveDate>,
    pub notes: String,
    #[serde(deserialize_with = "fields::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Trailer {
    pub fn new(trailer_number: impl Into<String>, trailer_type: impl Into<String>) -> Self {
        Self {
            trailer_id: TrailerId::generate(),
            trailer_number: trailer_number.into(),
            trailer_type: trailer_type.into(),
            status: "Available".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<TrailerId>) -> Self {
        self.trailer_id = id.into();
        self
    }

    pub fn hitched_to(mut self, truck: impl Into<TruckId>) -> Self {
        self.assigned_truck = Some(truck.into());
        self
    }
}

impl Record for Trailer {
    const KIND: RecordKind = RecordKind::Trailer;
    type Id = TrailerId;

    fn id(&self) -> &TrailerId {
        &self.trailer_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
