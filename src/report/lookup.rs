//! Lookup-by-id over the entity tables

use crate::model::{Driver, DriverId, Trailer, TrailerId, Truck, TruckId};
use crate::storage::Snapshot;

/// Borrowed view of the three entity tables that detail records point at
///
/// Every lookup is a linear scan returning the first exact match. Ids are
/// assumed unique but nothing enforces it.
#[derive(Debug, Clone, Copy)]
pub struct Lookups<'a> {
    pub drivers: &'a [Driver],
    pub trucks: &'a [Truck],
    pub trailers: &'a [Trailer],
}

impl<'a> Lookups<'a> {
    pub fn new(drivers: &'a [Driver], trucks: &'a [Truck], trailers: &'a [Trailer]) -> Self {
        Self {
            drivers,
            trucks,
            trailers,
        }
    }

    pub fn from_snapshot(snapshot: &'a Snapshot) -> Self {
        Self::new(&snapshot.drivers, &snapshot.trucks, &snapshot.trailers)
    }

    pub fn truck(&self, id: &TruckId) -> Option<&'a Truck> {
        if id.is_empty() {
            return None;
        }
        self.trucks.iter().find(|t| &t.truck_id == id)
    }

    pub fn driver(&self, id: &DriverId) -> Option<&'a Driver> {
        if id.is_empty() {
            return None;
        }
        self.drivers.iter().find(|d| &d.driver_id == id)
    }

    pub fn trailer(&self, id: &TrailerId) -> Option<&'a Trailer> {
        if id.is_empty() {
            return None;
        }
        self.trailers.iter().find(|t| &t.trailer_id == id)
    }

    /// Trucks whose `assigned_driver` holds this driver's id
    pub fn trucks_assigned_to(&self, id: &DriverId) -> Vec<&'a Truck> {
        self.trucks
            .iter()
            .filter(|t| t.assigned_driver.matches_id(id))
            .collect()
    }

    /// Legacy name link: trucks whose `assigned_driver` holds `full_name`
    ///
    /// Kept apart from [`Lookups::trucks_assigned_to`]. Older rows stored the
    /// driver's full name instead of the id, and the driver report still
    /// resolves its truck this way.
    pub fn trucks_assigned_to_name(&self, full_name: &str) -> Vec<&'a Truck> {
        self.trucks
            .iter()
            .filter(|t| t.assigned_driver.matches_name(full_name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DriverType;

    #[test]
    fn test_lookup_is_exact_and_first_match() {
        let trucks = vec![
            Truck::new("T1", "Volvo", "VNL").with_id("t1"),
            Truck::new("T1-dup", "Mack", "Anthem").with_id("t1"),
            Truck::new("T2", "Kenworth", "T680").with_id("T2"),
        ];
        let lookups = Lookups::new(&[], &trucks, &[]);

        assert_eq!(lookups.truck(&"t1".into()).unwrap().truck_number, "T1");
        assert!(lookups.truck(&"t2".into()).is_none());
        assert!(lookups.truck(&"".into()).is_none());
    }

    #[test]
    fn test_id_and_name_links_are_separate() {
        let driver = Driver::new("Sarah", "Johnson", DriverType::Cd).with_id("d1");
        let trucks = vec![
            Truck::new("T1", "Volvo", "VNL").assigned_to("d1"),
            Truck::new("T2", "Mack", "Anthem").assigned_to("Sarah Johnson"),
            Truck::new("T3", "Mack", "Anthem"),
        ];
        let drivers = [driver.clone()];
        let lookups = Lookups::new(&drivers, &trucks, &[]);

        let by_id = lookups.trucks_assigned_to(&driver.driver_id);
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].truck_number, "T1");

        let by_name = lookups.trucks_assigned_to_name(&driver.full_name());
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].truck_number, "T2");
    }
}
