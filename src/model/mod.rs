//! Typed records for the seven record kinds
//!
//! Each struct's field order is the column order declared in the schema
//! registry, so a record serializes straight into a CSV row.

pub mod fields;
pub mod ids;

mod driver;
mod maintenance;
mod otr;
mod pm;
mod shop_job;
mod trailer;
mod truck;

pub use driver::{Driver, DriverType};
pub use ids::{
    generate_id, DriverId, DriverRef, MaintenanceId, OtrId, PmId, ShopJobId, TrailerId, TruckId,
};
pub use maintenance::MaintenanceRecord;
pub use otr::OtrRepair;
pub use pm::PmRecord;
pub use shop_job::{Priority, ShopJob};
pub use trailer::Trailer;
pub use truck::Truck;

use crate::schema::RecordKind;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// A row in one of the store's tables
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Which table this record lives in
    const KIND: RecordKind;

    type Id: fmt::Display + PartialEq + Clone;

    fn id(&self) -> &Self::Id;

    fn created_at(&self) -> DateTime<Utc>;

    /// Recompute fields derived from other fields (cost totals)
    fn refresh_derived(&mut self) {}
}

/// Detail records that carry a `total_cost`
pub trait CostBearing: Record {
    fn total_cost(&self) -> f64;

    /// Sum of the component costs, ignoring the stored total
    fn component_total(&self) -> f64;
}

/// Sum `total_cost` over a set of detail records
pub fn sum_total_cost<'a, R, I>(records: I) -> f64
where
    R: CostBearing + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records.into_iter().map(CostBearing::total_cost).sum()
}
