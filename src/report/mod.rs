//! Join and aggregation engine
//!
//! Read-only derivations over tables already loaded by the store:
//! denormalized views of detail tables, the dashboard, and per-entity
//! reports.

mod aggregate;
mod denormalize;
mod lookup;

pub use aggregate::{
    aggregate_for_entity, aggregate_global, driver_report, trailer_report, truck_report,
    DashboardStats, DriverReport, DriverTotals, EntityRef, EntityReport, TrailerReport,
    TrailerTotals, TruckReport, TruckTotals,
};
pub use denormalize::{denormalize, Denormalize, Denormalized, Joined};
pub use lookup::Lookups;
