//! Attach display fields from referenced entities onto records
//!
//! A [`Denormalized`] value serializes as the record's own columns followed
//! by whichever joined keys resolved. Keys whose reference did not resolve
//! are left out of the output entirely (never `null`, never `""`).

use super::lookup::Lookups;
use crate::model::{MaintenanceRecord, OtrRepair, PmRecord, Record, ShopJob, Truck};
use serde::Serialize;

/// Display fields copied from referenced entities
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Joined {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_make_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_number: Option<String>,
}

/// A record together with its joined display fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Denormalized<R> {
    #[serde(flatten)]
    pub record: R,
    #[serde(flatten)]
    pub joined: Joined,
}

/// Records that reference other entities and can carry their display fields
pub trait Denormalize: Record {
    fn joined(&self, lookups: &Lookups<'_>) -> Joined;
}

/// Denormalize a whole table, keeping input order
///
/// Pure: the same records and lookups always give the same output.
pub fn denormalize<R: Denormalize>(records: &[R], lookups: &Lookups<'_>) -> Vec<Denormalized<R>> {
    records
        .iter()
        .map(|record| Denormalized {
            record: record.clone(),
            joined: record.joined(lookups),
        })
        .collect()
}

impl Denormalize for Truck {
    fn joined(&self, lookups: &Lookups<'_>) -> Joined {
        let driver = lookups
            .drivers
            .iter()
            .find(|d| self.assigned_driver.matches_id(&d.driver_id));

        Joined {
            driver_name: driver.map(|d| d.full_name()),
            ..Joined::default()
        }
    }
}

impl Denormalize for MaintenanceRecord {
    fn joined(&self, lookups: &Lookups<'_>) -> Joined {
        let truck = self.truck_id.as_ref().and_then(|id| lookups.truck(id));
        let trailer = self.trailer_id.as_ref().and_then(|id| lookups.trailer(id));

        Joined {
            truck_number: truck.map(|t| t.truck_number.clone()),
            truck_make_model: truck.map(Truck::make_model),
            trailer_number: trailer.map(|t| t.trailer_number.clone()),
            ..Joined::default()
        }
    }
}

impl Denormalize for OtrRepair {
    fn joined(&self, lookups: &Lookups<'_>) -> Joined {
        let truck = self.truck_id.as_ref().and_then(|id| lookups.truck(id));
        let driver = self.driver_id.as_ref().and_then(|id| lookups.driver(id));

        Joined {
            truck_number: truck.map(|t| t.truck_number.clone()),
            truck_make_model: truck.map(Truck::make_model),
            driver_name: driver.map(|d| d.full_name()),
            ..Joined::default()
        }
    }
}

impl Denormalize for PmRecord {
    fn joined(&self, lookups: &Lookups<'_>) -> Joined {
        let truck = self.truck_id.as_ref().and_then(|id| lookups.truck(id));

        Joined {
            truck_number: truck.map(|t| t.truck_number.clone()),
            truck_make_model: truck.map(Truck::make_model),
            ..Joined::default()
        }
    }
}

impl Denormalize for ShopJob {
    fn joined(&self, lookups: &Lookups<'_>) -> Joined {
        let truck = self.truck_id.as_ref().and_then(|id| lookups.truck(id));
        let trailer = self.trailer_id.as_ref().and_then(|id| lookups.trailer(id));

        Joined {
            truck_number: truck.map(|t| t.truck_number.clone()),
            trailer_number: trailer.map(|t| t.trailer_number.clone()),
            ..Joined::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Driver, DriverType, Trailer};

    fn fixtures() -> (Vec<Driver>, Vec<Truck>, Vec<Trailer>) {
        let drivers = vec![Driver::new("John", "Martinez", DriverType::Cd).with_id("d1")];
        let trucks = vec![Truck::new("T8001", "Freightliner", "Cascadia")
            .with_id("t1")
            .assigned_to("d1")];
        let trailers = vec![Trailer::new("TR100", "Reefer").with_id("tr1")];
        (drivers, trucks, trailers)
    }

    #[test]
    fn test_otr_gets_truck_and_driver() {
        let (drivers, trucks, trailers) = fixtures();
        let lookups = Lookups::new(&drivers, &trucks, &trailers);
        let repairs = vec![OtrRepair::new("t1", "d1")];

        let views = denormalize(&repairs, &lookups);
        assert_eq!(views[0].joined.truck_number.as_deref(), Some("T8001"));
        assert_eq!(
            views[0].joined.truck_make_model.as_deref(),
            Some("Freightliner Cascadia")
        );
        assert_eq!(views[0].joined.driver_name.as_deref(), Some("John Martinez"));
    }

    #[test]
    fn test_unmatched_reference_leaves_keys_absent() {
        let (drivers, trucks, trailers) = fixtures();
        let lookups = Lookups::new(&drivers, &trucks, &trailers);
        let records = vec![PmRecord::new("missing", "A Service")];

        let views = denormalize(&records, &lookups);
        let json = serde_json::to_value(&views[0]).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("truck_number"));
        assert!(!object.contains_key("truck_make_model"));
        assert_eq!(object["truck_id"], "missing");
    }

    #[test]
    fn test_idempotent_and_order_preserving() {
        let (drivers, trucks, trailers) = fixtures();
        let lookups = Lookups::new(&drivers, &trucks, &trailers);
        let jobs = vec![
            ShopJob::for_trailer("tr1", "Brake Work").with_id("sj2"),
            ShopJob::for_truck("t1", "Engine Repair").with_id("sj1"),
            ShopJob::for_truck("nope", "Body Work").with_id("sj3"),
        ];

        let first = denormalize(&jobs, &lookups);
        let second = denormalize(&jobs, &lookups);
        assert_eq!(first, second);

        let ids: Vec<_> = first.iter().map(|v| v.record.job_id.as_str()).collect();
        assert_eq!(ids, vec!["sj2", "sj1", "sj3"]);
        assert_eq!(first[0].joined.trailer_number.as_deref(), Some("TR100"));
        assert_eq!(first[0].joined.truck_number, None);
        assert_eq!(first[1].joined.truck_number.as_deref(), Some("T8001"));
        assert_eq!(first[2].joined, Joined::default());
    }

    #[test]
    fn test_truck_gets_driver_name_by_id_only() {
        let (drivers, mut trucks, trailers) = fixtures();
        trucks.push(Truck::new("T8002", "Volvo", "VNL").assigned_to("John Martinez"));
        let lookups = Lookups::new(&drivers, &trucks, &trailers);

        let views = denormalize(&trucks, &lookups);
        assert_eq!(views[0].joined.driver_name.as_deref(), Some("John Martinez"));
        assert_eq!(views[1].joined.driver_name, None);
    }
}
