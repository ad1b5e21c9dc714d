//! fleetgen - deterministic bulk sample data for fleetdb
//!
//! Produces an export document with `count` records of every kind. The same
//! seed always produces the same document; the only clock input is the
//! `now` passed in, used for every `created_at` and the export date.
//!
//! Ids are short prefixed sequences (`d001`, `t001`, `tr001`, `m001`,
//! `otr001`, `pm001`, `sj001`) and every reference points at a generated
//! record:
//!
//! - trucks are assigned a driver by id
//! - trailers are hitched to a truck, or to nothing
//! - maintenance and shop jobs reference a truck or a trailer, never both
//! - OTR repairs reference a truck and a driver; PM records a truck
//!
//! Cost totals are always the sum of their components.

mod vocab;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use fleetdb::model::{
    Driver, DriverRef, DriverType, MaintenanceRecord, OtrRepair, PmRecord, Priority, Record,
    ShopJob, Trailer, Truck,
};
use fleetdb::transfer::ExportDocument;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vocab::*;

/// Default number of records per kind
pub const DEFAULT_COUNT: usize = 400;

/// Default seed
pub const DEFAULT_SEED: u64 = 42;

/// Probability (out of 4) that a maintenance record or shop job is for a trailer
const TRAILER_WORK_NUMERATOR: u32 = 1;
const TRAILER_WORK_DENOMINATOR: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// Records generated per kind
    pub count: usize,
    pub data_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_COUNT,
            data_version: "TMS v1.0 Generated".to_string(),
        }
    }
}

/// Generate a complete export document
pub fn generate(config: &GeneratorConfig, now: DateTime<Utc>) -> ExportDocument {
    let mut gen = Generator {
        rng: ChaCha8Rng::seed_from_u64(config.seed),
        now,
    };
    let n = config.count;

    let drivers: Vec<Driver> = (1..=n).map(|i| gen.driver(i)).collect();
    let driver_ids = ids_of(&drivers);

    let trucks: Vec<Truck> = (1..=n).map(|i| gen.truck(i, &driver_ids)).collect();
    let truck_ids = ids_of(&trucks);

    let trailers: Vec<Trailer> = (1..=n).map(|i| gen.trailer(i, &truck_ids)).collect();
    let trailer_ids = ids_of(&trailers);

    let maintenance = (1..=n)
        .map(|i| gen.maintenance(i, &truck_ids, &trailer_ids))
        .collect();
    let otr_repairs = (1..=n)
        .map(|i| gen.otr_repair(i, &truck_ids, &driver_ids))
        .collect();
    let pm_records = (1..=n).map(|i| gen.pm_record(i, &truck_ids)).collect();
    let shop_jobs = (1..=n)
        .map(|i| gen.shop_job(i, &truck_ids, &trailer_ids))
        .collect();

    ExportDocument {
        export_date: now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        data_version: config.data_version.clone(),
        drivers: Some(drivers),
        trucks: Some(trucks),
        trailers: Some(trailers),
        maintenance: Some(maintenance),
        otr_repairs: Some(otr_repairs),
        pm_records: Some(pm_records),
        shop_jobs: Some(shop_jobs),
    }
}

fn ids_of<R: Record>(records: &[R]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

struct Generator {
    rng: ChaCha8Rng,
    now: DateTime<Utc>,
}

impl Generator {
    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.random_range(0..items.len())]
    }

    fn pick_id(&mut self, ids: &[String]) -> Option<String> {
        if ids.is_empty() {
            return None;
        }
        Some(ids[self.rng.random_range(0..ids.len())].clone())
    }

    /// A date in `[start_year-01-01, end_year-12-31]`
    fn date(&mut self, start_year: i32, end_year: i32) -> Option<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(end_year, 12, 31)?;
        let days = (end - start).num_days();
        Some(start + Duration::days(self.rng.random_range(0..=days)))
    }

    /// Money with two decimals
    fn money(&mut self, low: f64, high: f64) -> f64 {
        (self.rng.random_range(low..high) * 100.0).round() / 100.0
    }

    /// Hours with one decimal
    fn hours(&mut self, low: f64, high: f64) -> f64 {
        (self.rng.random_range(low..high) * 10.0).round() / 10.0
    }

    fn driver(&mut self, i: usize) -> Driver {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let email = format!(
            "{}.{}@company.com",
            first.chars().next().unwrap_or('x').to_ascii_lowercase(),
            last.to_lowercase()
        );

        Driver {
            license_number: format!("CDL{}", self.rng.random_range(100_000..=999_999)),
            hire_date: self.date(2019, 2024),
            phone: format!("555-0{}", self.rng.random_range(100..=999)),
            email,
            address: format!(
                "{} {}, {}",
                self.rng.random_range(1000..=9999),
                self.pick(STREETS),
                self.pick(CITIES)
            ),
            cdl_expiry: self.date(2025, 2027),
            medical_expiry: self.date(2025, 2026),
            status: self.pick(STATUSES).to_string(),
            notes: self.pick(DRIVER_NOTES).to_string(),
            created_at: self.now,
            ..Driver::new(first, last, DriverType::from(self.pick(DRIVER_TYPES).to_string()))
        }
        .with_id(format!("d{:03}", i))
    }

    fn truck(&mut self, i: usize, driver_ids: &[String]) -> Truck {
        let make = self.pick(MAKES);
        let model = self.pick(MODELS);
        let driver = self.pick_id(driver_ids).unwrap_or_default();

        Truck {
            year: self.rng.random_range(2019..=2024).to_string(),
            vin: format!(
                "1{}{}",
                self.pick(VIN_PREFIXES),
                self.rng.random_range(1_000_000..=9_999_999)
            ),
            engine_type: self.pick(ENGINE_TYPES).to_string(),
            mileage: self.rng.random_range(50_000..=400_000),
            assigned_driver: DriverRef::new(driver),
            status: self.pick(STATUSES).to_string(),
            purchase_date: self.date(2019, 2024),
            last_pm_date: self.date(2024, 2024),
            next_pm_due: self.date(2025, 2025),
            notes: self.pick(TRUCK_NOTES).to_string(),
            created_at: self.now,
            ..Truck::new(format!("T8{:03}", i), make, model)
        }
        .with_id(format!("t{:03}", i))
    }

    fn trailer(&mut self, i: usize, truck_ids: &[String]) -> Trailer {
        let trailer_type = self.pick(TRAILER_TYPES);
        // Roughly one in five trailers sits unhitched
        let assigned_truck = if self.rng.random_ratio(1, 5) {
            None
        } else {
            self.pick_id(truck_ids).map(Into::into)
        };

        Trailer {
            year: self.rng.random_range(2019..=2024).to_string(),
            make: self.pick(TRAILER_MAKES).to_string(),
            capacity: self.pick(CAPACITIES).to_string(),
            assigned_truck,
            status: self.pick(STATUSES).to_string(),
            last_inspection: self.date(2024, 2024),
            next_inspection_due: self.date(2025, 2025),
            notes: self.pick(TRAILER_NOTES).to_string(),
            created_at: self.now,
            ..Trailer::new(format!("TR5{:03}", i), trailer_type)
        }
        .with_id(format!("tr{:03}", i))
    }

    fn trailer_work(&mut self) -> bool {
        self.rng
            .random_ratio(TRAILER_WORK_NUMERATOR, TRAILER_WORK_DENOMINATOR)
    }

    fn maintenance(
        &mut self,
        i: usize,
        truck_ids: &[String],
        trailer_ids: &[String],
    ) -> MaintenanceRecord {
        let maintenance_type = self.pick(MAINTENANCE_TYPES);
        let base = if self.trailer_work() {
            MaintenanceRecord::for_trailer(
                self.pick_id(trailer_ids).unwrap_or_default(),
                maintenance_type,
            )
        } else {
            MaintenanceRecord::for_truck(self.pick_id(truck_ids).unwrap_or_default(), maintenance_type)
        };
        let mileage = if base.truck_id.is_some() {
            self.rng.random_range(0..=400_000)
        } else {
            0
        };
        let parts_cost = self.money(50.0, 500.0);
        let labor_cost = self.money(100.0, 300.0);

        MaintenanceRecord {
            date: self.date(2024, 2024),
            mileage,
            description: format!("{} performed", maintenance_type),
            shop_name: self.pick(SHOP_NAMES).to_string(),
            shop_location: self.pick(CITIES).to_string(),
            technician: self.pick(TECHNICIANS).to_string(),
            created_at: self.now,
            ..base
        }
        .with_id(format!("m{:03}", i))
        .with_costs(parts_cost, labor_cost)
    }

    fn otr_repair(&mut self, i: usize, truck_ids: &[String], driver_ids: &[String]) -> OtrRepair {
        let truck = self.pick_id(truck_ids).unwrap_or_default();
        let driver = self.pick_id(driver_ids).unwrap_or_default();
        let location = if self.rng.random_bool(0.5) {
            format!("I-35 MM {}", self.rng.random_range(100..=300))
        } else {
            format!("Truck Stop - {}", self.pick(CITIES))
        };
        let repair_cost = self.money(200.0, 1000.0);
        let tow_cost = self.money(0.0, 500.0);
        let hotel_cost = self.money(0.0, 200.0);

        OtrRepair {
            breakdown_date: self.date(2024, 2024),
            location,
            issue_description: self.pick(OTR_ISSUES).to_string(),
            repair_shop: self.pick(REPAIR_SHOPS).to_string(),
            parts_used: "Assorted parts".to_string(),
            labor_hours: self.hours(1.0, 10.0),
            downtime_hours: self.hours(2.0, 24.0),
            insurance_claim: self.rng.random_bool(0.5),
            status: "Completed".to_string(),
            created_at: self.now,
            ..OtrRepair::new(truck, driver)
        }
        .with_id(format!("otr{:03}", i))
        .with_costs(repair_cost, tow_cost, hotel_cost)
    }

    fn pm_record(&mut self, i: usize, truck_ids: &[String]) -> PmRecord {
        let truck = self.pick_id(truck_ids).unwrap_or_default();
        let pm_type = self.pick(PM_TYPES);
        let parts_cost = self.money(100.0, 700.0);
        let labor_cost = self.money(100.0, 500.0);

        PmRecord {
            date: self.date(2024, 2024),
            mileage: self.rng.random_range(50_000..=400_000),
            next_due_date: self.date(2025, 2025),
            next_due_mileage: self.rng.random_range(100_000..=500_000),
            shop_name: self.pick(SHOP_NAMES).to_string(),
            technician: self.pick(TECHNICIANS).to_string(),
            oil_change: self.rng.random_bool(0.5),
            filter_change: self.rng.random_bool(0.5),
            inspection_items: "Brakes, tires, lights, fluids".to_string(),
            created_at: self.now,
            ..PmRecord::new(truck, pm_type)
        }
        .with_id(format!("pm{:03}", i))
        .with_costs(parts_cost, labor_cost)
    }

    fn shop_job(&mut self, i: usize, truck_ids: &[String], trailer_ids: &[String]) -> ShopJob {
        let job_type = self.pick(SHOP_JOB_TYPES);
        let base = if self.trailer_work() {
            ShopJob::for_trailer(self.pick_id(trailer_ids).unwrap_or_default(), job_type)
        } else {
            ShopJob::for_truck(self.pick_id(truck_ids).unwrap_or_default(), job_type)
        };
        let date_started = self.date(2024, 2024);
        let date_completed =
            date_started.map(|d| d + Duration::days(self.rng.random_range(1..=10)));
        let priority = Priority::from(self.pick(PRIORITIES).to_string());
        let parts_cost = self.money(200.0, 4000.0);
        let labor_cost = self.money(100.0, 2000.0);

        ShopJob {
            date_started,
            date_completed,
            description: format!("{} in bay", job_type),
            technician: self.pick(TECHNICIANS).to_string(),
            parts_used: "Assorted parts".to_string(),
            labor_hours: self.hours(2.0, 40.0),
            status: "Completed".to_string(),
            created_at: self.now,
            ..base
        }
        .with_id(format!("sj{:03}", i))
        .with_priority(priority)
        .with_costs(parts_cost, labor_cost)
    }
}
