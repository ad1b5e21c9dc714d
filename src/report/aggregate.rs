//! Dashboard statistics and per-entity reports
//!
//! Everything here is a pure function of a [`Snapshot`]. Missing tables are
//! simply empty and contribute zero to every count and sum.

use super::lookup::Lookups;
use crate::error::{Error, Result};
use crate::model::{
    sum_total_cost, Driver, DriverId, MaintenanceRecord, OtrRepair, PmRecord, ShopJob, Trailer,
    TrailerId, Truck, TruckId,
};
use crate::schema::RecordKind;
use crate::storage::Snapshot;
use serde::Serialize;

/// Fleet-wide counts and cost sums
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_drivers: usize,
    /// Drivers whose type is `CD`
    pub cd_drivers: usize,
    pub total_trucks: usize,
    /// Trucks whose status is `Active`
    pub active_trucks: usize,
    pub total_trailers: usize,
    /// Trailers whose status is `Available`
    pub available_trailers: usize,
    pub total_maintenance: usize,
    pub total_otr: usize,
    /// OTR repairs whose status is `Open`
    pub open_otr: usize,
    pub total_pm: usize,
    pub shop_jobs: usize,
    pub total_maintenance_cost: f64,
    pub total_otr_cost: f64,
}

/// Compute the dashboard over every table
pub fn aggregate_global(snapshot: &Snapshot) -> DashboardStats {
    DashboardStats {
        total_drivers: snapshot.drivers.len(),
        cd_drivers: snapshot
            .drivers
            .iter()
            .filter(|d| d.is_company_driver())
            .count(),
        total_trucks: snapshot.trucks.len(),
        active_trucks: snapshot
            .trucks
            .iter()
            .filter(|t| t.status == "Active")
            .count(),
        total_trailers: snapshot.trailers.len(),
        available_trailers: snapshot
            .trailers
            .iter()
            .filter(|t| t.status == "Available")
            .count(),
        total_maintenance: snapshot.maintenance.len(),
        total_otr: snapshot.otr_repairs.len(),
        open_otr: snapshot.otr_repairs.iter().filter(|r| r.is_open()).count(),
        total_pm: snapshot.pm_records.len(),
        shop_jobs: snapshot.shop_jobs.len(),
        total_maintenance_cost: sum_total_cost(&snapshot.maintenance),
        total_otr_cost: sum_total_cost(&snapshot.otr_repairs),
    }
}

// ============================================================================
// Per-entity reports
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TruckTotals {
    pub maintenance: f64,
    pub otr: f64,
    pub pm: f64,
    pub shop: f64,
    pub grand_total: f64,
}

/// A truck with every detail record that references it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckReport {
    pub truck: Truck,
    pub maintenance: Vec<MaintenanceRecord>,
    pub otr_repairs: Vec<OtrRepair>,
    pub pm_records: Vec<PmRecord>,
    pub shop_jobs: Vec<ShopJob>,
    pub totals: TruckTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriverTotals {
    pub otr_cases: usize,
    pub otr_cost: f64,
    pub downtime_hours: f64,
    pub grand_total: f64,
}

/// A driver with their OTR history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverReport {
    pub driver: Driver,
    /// First truck whose `assigned_driver` equals the driver's full name
    pub assigned_truck: Option<Truck>,
    /// First truck whose `assigned_driver` equals the driver's id
    pub assigned_truck_by_id: Option<Truck>,
    pub otr_repairs: Vec<OtrRepair>,
    pub totals: DriverTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrailerTotals {
    pub maintenance: f64,
    pub shop: f64,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailerReport {
    pub trailer: Trailer,
    pub maintenance: Vec<MaintenanceRecord>,
    pub shop_jobs: Vec<ShopJob>,
    pub totals: TrailerTotals,
}

/// Which entity a report is about
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRef {
    Truck(TruckId),
    Driver(DriverId),
    Trailer(TrailerId),
}

impl EntityRef {
    /// Build a reference from a record kind and a raw id
    ///
    /// Only drivers, trucks and trailers have reports.
    pub fn new(kind: RecordKind, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        match kind {
            RecordKind::Truck => Ok(EntityRef::Truck(id.into())),
            RecordKind::Driver => Ok(EntityRef::Driver(id.into())),
            RecordKind::Trailer => Ok(EntityRef::Trailer(id.into())),
            kind => Err(Error::NoReport { kind }),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            EntityRef::Truck(_) => RecordKind::Truck,
            EntityRef::Driver(_) => RecordKind::Driver,
            EntityRef::Trailer(_) => RecordKind::Trailer,
        }
    }

    fn id(&self) -> &str {
        match self {
            EntityRef::Truck(id) => id.as_str(),
            EntityRef::Driver(id) => id.as_str(),
            EntityRef::Trailer(id) => id.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum EntityReport {
    Truck(TruckReport),
    Driver(DriverReport),
    Trailer(TrailerReport),
}

/// Build the report for one entity
///
/// Fails with [`Error::RecordNotFound`] when the entity itself is missing.
pub fn aggregate_for_entity(snapshot: &Snapshot, entity: &EntityRef) -> Result<EntityReport> {
    let report = match entity {
        EntityRef::Truck(id) => truck_report(snapshot, id).map(EntityReport::Truck),
        EntityRef::Driver(id) => driver_report(snapshot, id).map(EntityReport::Driver),
        EntityRef::Trailer(id) => trailer_report(snapshot, id).map(EntityReport::Trailer),
    };

    report.ok_or_else(|| Error::RecordNotFound {
        kind: entity.kind(),
        id: entity.id().to_string(),
    })
}

pub fn truck_report(snapshot: &Snapshot, id: &TruckId) -> Option<TruckReport> {
    let truck = Lookups::from_snapshot(snapshot).truck(id)?.clone();
    let refers = |truck_id: &Option<TruckId>| truck_id.as_ref() == Some(id);

    let maintenance: Vec<_> = matching(&snapshot.maintenance, |r| refers(&r.truck_id));
    let otr_repairs: Vec<_> = matching(&snapshot.otr_repairs, |r| refers(&r.truck_id));
    let pm_records: Vec<_> = matching(&snapshot.pm_records, |r| refers(&r.truck_id));
    let shop_jobs: Vec<_> = matching(&snapshot.shop_jobs, |r| refers(&r.truck_id));

    let mut totals = TruckTotals {
        maintenance: sum_total_cost(&maintenance),
        otr: sum_total_cost(&otr_repairs),
        pm: sum_total_cost(&pm_records),
        shop: sum_total_cost(&shop_jobs),
        grand_total: 0.0,
    };
    totals.grand_total = totals.maintenance + totals.otr + totals.pm + totals.shop;

    Some(TruckReport {
        truck,
        maintenance,
        otr_repairs,
        pm_records,
        shop_jobs,
        totals,
    })
}

pub fn driver_report(snapshot: &Snapshot, id: &DriverId) -> Option<DriverReport> {
    let lookups = Lookups::from_snapshot(snapshot);
    let driver = lookups.driver(id)?.clone();

    let assigned_truck = lookups
        .trucks_assigned_to_name(&driver.full_name())
        .first()
        .map(|t| (*t).clone());
    let assigned_truck_by_id = lookups
        .trucks_assigned_to(id)
        .first()
        .map(|t| (*t).clone());

    let otr_repairs = matching(&snapshot.otr_repairs, |r| r.driver_id.as_ref() == Some(id));
    let otr_cost = sum_total_cost(&otr_repairs);
    let totals = DriverTotals {
        otr_cases: otr_repairs.len(),
        otr_cost,
        downtime_hours: otr_repairs.iter().map(|r| r.downtime_hours).sum(),
        grand_total: otr_cost,
    };

    Some(DriverReport {
        driver,
        assigned_truck,
        assigned_truck_by_id,
        otr_repairs,
        totals,
    })
}

pub fn trailer_report(snapshot: &Snapshot, id: &TrailerId) -> Option<TrailerReport> {
    let trailer = Lookups::from_snapshot(snapshot).trailer(id)?.clone();
    let refers = |trailer_id: &Option<TrailerId>| trailer_id.as_ref() == Some(id);

    let maintenance = matching(&snapshot.maintenance, |r| refers(&r.trailer_id));
    let shop_jobs = matching(&snapshot.shop_jobs, |r| refers(&r.trailer_id));

    let maintenance_total = sum_total_cost(&maintenance);
    let shop_total = sum_total_cost(&shop_jobs);

    Some(TrailerReport {
        trailer,
        maintenance,
        shop_jobs,
        totals: TrailerTotals {
            maintenance: maintenance_total,
            shop: shop_total,
            grand_total: maintenance_total + shop_total,
        },
    })
}

fn matching<R: Clone>(records: &[R], pred: impl Fn(&R) -> bool) -> Vec<R> {
    records.iter().filter(|r| pred(r)).cloned().collect()
}
