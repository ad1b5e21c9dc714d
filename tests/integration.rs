//! Integration tests for fleetdb
//!
//! Tests full flows from form input and store writes through to the CSV
//! files on disk and the reports derived from them.

use fleetdb::forms::{self, FormData};
use fleetdb::model::{
    Driver, DriverType, MaintenanceRecord, OtrRepair, PmRecord, Priority, Record, ShopJob,
    Trailer, Truck,
};
use fleetdb::report::{EntityRef, EntityReport};
use fleetdb::transfer::{self, ExportDocument};
use fleetdb::{Error, Fleet, RecordKind, Store};
use tempfile::TempDir;

/// Helper to create a test fleet
async fn setup_test_fleet() -> (TempDir, Fleet) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let fleet = Fleet::open(tmp.path().join("tms_data"))
        .await
        .expect("Failed to open fleet");
    (tmp, fleet)
}

fn form(pairs: &[(&str, &str)]) -> FormData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Append `record` and check it comes back last, field for field
async fn assert_append_roundtrip<R: Record + PartialEq + std::fmt::Debug>(store: &Store, record: R) {
    store.append(record.clone()).await.expect("append failed");
    let loaded = store.load::<R>().await;
    assert_eq!(loaded.last(), Some(&record), "{}", R::KIND);
}

// =============================================================================
// Record Store Tests
// =============================================================================

#[tokio::test]
async fn test_append_then_load_every_kind() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let store = fleet.store();

    let mut otr = OtrRepair::new("t1", "d1").with_costs(200.0, 50.0, 25.0);
    otr.insurance_claim = true;
    otr.location = "I-35 MM 214, Waco TX".to_string();

    assert_append_roundtrip(store, Driver::new("John", "Martinez", DriverType::Cd)).await;
    assert_append_roundtrip(store, Truck::new("T8001", "Volvo", "VNL 760").assigned_to("d1")).await;
    assert_append_roundtrip(store, Trailer::new("TR5001", "Dry Van").hitched_to("t1")).await;
    assert_append_roundtrip(
        store,
        MaintenanceRecord::for_trailer("tr1", "Inspection").with_costs(100.0, 50.0),
    )
    .await;
    assert_append_roundtrip(store, otr).await;
    assert_append_roundtrip(store, PmRecord::new("t1", "A Service").with_costs(100.0, 50.0)).await;
    assert_append_roundtrip(
        store,
        ShopJob::for_truck("t1", "Engine Work")
            .with_priority(Priority::Low)
            .with_costs(100.0, 50.0),
    )
    .await;
}

#[tokio::test]
async fn test_load_missing_then_initialized() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let store = fleet.store();

    assert!(store.load::<ShopJob>().await.is_empty());
    assert!(!store.table_exists(RecordKind::ShopJob).await);

    store.ensure_initialized(RecordKind::ShopJob).await.unwrap();
    assert!(store.table_exists(RecordKind::ShopJob).await);
    assert!(store.load::<ShopJob>().await.is_empty());
}

#[tokio::test]
async fn test_hand_edited_file_loads_what_it_can() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let path = fleet.store().path_for(RecordKind::Maintenance);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "maintenance_id,truck_id,parts_cost,labor_cost,total_cost,created_at\n\
         m1,t1,100,50,150,2024-03-01T08:00:00\n\
         m2,t1,abc,50,50,2024-03-02T08:00:00\n\
         m3,t1\n\
         m4,t1,1,1,2,not a timestamp\n",
    )
    .unwrap();

    let records = fleet.store().load::<MaintenanceRecord>().await;
    let ids: Vec<_> = records.iter().map(|r| r.maintenance_id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
    assert_eq!(records[1].parts_cost, 0.0);
}

// =============================================================================
// Form Tests
// =============================================================================

#[tokio::test]
async fn test_add_from_form_and_list_denormalized() {
    let (_tmp, fleet) = setup_test_fleet().await;
    fleet.init().await.unwrap();

    let driver_id = fleet
        .add(
            RecordKind::Driver,
            &form(&[
                ("first_name", "Sarah"),
                ("last_name", "Johnson"),
                ("license_number", "CDL445566"),
                ("driver_type", "CD"),
                ("hire_date", "2020-07-01"),
                ("status", "Active"),
            ]),
        )
        .await
        .unwrap();

    let truck_id = fleet
        .add(
            RecordKind::Truck,
            &form(&[
                ("truck_number", "T8042"),
                ("make", "Kenworth"),
                ("model", "T680"),
                ("year", "2022"),
                ("vin", "1XKYDP9X5NJ123456"),
                ("assigned_driver", driver_id.as_str()),
                ("status", "Active"),
            ]),
        )
        .await
        .unwrap();

    fleet
        .add(
            RecordKind::OtrRepair,
            &form(&[
                ("truck_id", truck_id.as_str()),
                ("driver_id", driver_id.as_str()),
                ("breakdown_date", "2024-08-19"),
                ("location", "Truck Stop - Austin, TX"),
                ("issue_description", "Alternator failure"),
                ("repair_shop", "Roadside Pros"),
                ("repair_cost", "450.00"),
                ("tow_cost", "150"),
                ("status", "Open"),
            ]),
        )
        .await
        .unwrap();

    let listed = fleet.list(RecordKind::OtrRepair).await.unwrap();
    let row = &listed.as_array().unwrap()[0];
    assert_eq!(row["truck_number"], "T8042");
    assert_eq!(row["truck_make_model"], "Kenworth T680");
    assert_eq!(row["driver_name"], "Sarah Johnson");
    assert_eq!(row["total_cost"], 600.0);

    let trucks = fleet.list(RecordKind::Truck).await.unwrap();
    assert_eq!(trucks[0]["driver_name"], "Sarah Johnson");
}

#[tokio::test]
async fn test_rejected_form_leaves_store_untouched() {
    let (_tmp, fleet) = setup_test_fleet().await;
    fleet.init().await.unwrap();
    let path = fleet.store().path_for(RecordKind::PmRecord);
    let before = std::fs::read(&path).unwrap();

    let data = forms::parse_pairs([
        "truck_id=t1",
        "pm_type=A Service",
        "date=2024-05-01",
        "shop_name=Main Shop",
        "status=Completed",
        "labor_cost=12x",
    ])
    .unwrap();
    let err = fleet.add(RecordKind::PmRecord, &data).await.unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert!(err.is_recoverable());

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

// =============================================================================
// Report Tests
// =============================================================================

#[tokio::test]
async fn test_end_to_end_dashboard_and_truck_report() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let store = fleet.store();

    store
        .append(Driver::new("John", "Martinez", DriverType::Cd).with_id("d1"))
        .await
        .unwrap();
    store
        .append(Truck::new("T8001", "Freightliner", "Cascadia").with_id("t1").assigned_to("d1"))
        .await
        .unwrap();
    store
        .append(OtrRepair::new("t1", "d1").with_id("o1").with_costs(300.0, 100.0, 0.0))
        .await
        .unwrap();

    let stats = fleet.dashboard().await;
    assert_eq!(stats.total_drivers, 1);
    assert_eq!(stats.cd_drivers, 1);
    assert_eq!(stats.total_otr_cost, 400.0);
    assert_eq!(stats.total_maintenance_cost, 0.0);

    let report = fleet.report(&EntityRef::Truck("t1".into())).await.unwrap();
    match report {
        EntityReport::Truck(truck) => {
            assert_eq!(truck.otr_repairs.len(), 1);
            assert_eq!(truck.totals.otr, 400.0);
            assert_eq!(truck.totals.grand_total, 400.0);
        }
        other => panic!("expected a truck report, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_fleet_dashboard() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let stats = fleet.dashboard().await;
    assert_eq!(stats.total_drivers, 0);
    assert_eq!(stats.open_otr, 0);
    assert_eq!(stats.total_otr_cost, 0.0);
}

#[tokio::test]
async fn test_report_for_missing_driver() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let err = fleet
        .report(&EntityRef::Driver("d404".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { kind: RecordKind::Driver, .. }));
}

#[tokio::test]
async fn test_driver_report_uses_name_link() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let store = fleet.store();

    store
        .append(Driver::new("Lisa", "Chen", DriverType::Lp).with_id("d7"))
        .await
        .unwrap();
    store
        .append(Truck::new("T8007", "Peterbilt", "579").with_id("t7").assigned_to("d7"))
        .await
        .unwrap();

    let report = fleet.report(&EntityRef::Driver("d7".into())).await.unwrap();
    let EntityReport::Driver(driver) = report else {
        panic!("expected a driver report");
    };
    assert!(driver.assigned_truck.is_none());
    assert_eq!(driver.assigned_truck_by_id.unwrap().truck_number, "T8007");
}

#[tokio::test]
async fn test_padded_reference_is_not_joined() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let store = fleet.store();

    store
        .append(Truck::new("T8001", "Volvo", "VNL 760").with_id("t1"))
        .await
        .unwrap();
    let padded = MaintenanceRecord::for_truck("t1 ", "Brake Service")
        .with_id("m1")
        .with_costs(100.0, 50.0);
    assert_append_roundtrip(store, padded).await;

    let loaded = store.load::<MaintenanceRecord>().await;
    assert_eq!(loaded[0].truck_id.as_ref().map(|id| id.as_str()), Some("t1 "));

    let report = fleet.report(&EntityRef::Truck("t1".into())).await.unwrap();
    let EntityReport::Truck(truck) = report else {
        panic!("expected a truck report");
    };
    assert!(truck.maintenance.is_empty());
    assert_eq!(truck.totals.maintenance, 0.0);
}

// =============================================================================
// Export / Import Tests
// =============================================================================

#[tokio::test]
async fn test_import_drivers_only_leaves_other_tables_alone() {
    let (_tmp, fleet) = setup_test_fleet().await;
    let store = fleet.store();
    fleet.init().await.unwrap();

    store
        .append(Truck::new("T8001", "Volvo", "VNL").with_id("t1"))
        .await
        .unwrap();
    store
        .append(ShopJob::for_truck("t1", "Brake Work").with_costs(10.0, 5.0))
        .await
        .unwrap();

    let before: Vec<_> = RecordKind::ALL
        .iter()
        .filter(|k| **k != RecordKind::Driver)
        .map(|k| (*k, std::fs::read(store.path_for(*k)).unwrap()))
        .collect();

    let doc = ExportDocument {
        drivers: Some(vec![
            Driver::new("Ann", "Lee", DriverType::LpOwner).with_id("d1"),
            Driver::new("Bob", "Ray", DriverType::Cd).with_id("d2"),
        ]),
        ..ExportDocument::default()
    };
    let summary = transfer::import(store, doc).await.unwrap();
    assert_eq!(summary.replaced.len(), 1);
    assert_eq!(summary.skipped.len(), 6);

    for (kind, bytes) in before {
        assert_eq!(std::fs::read(store.path_for(kind)).unwrap(), bytes, "{}", kind);
    }
    assert_eq!(store.load::<Driver>().await.len(), 2);
}

#[tokio::test]
async fn test_backup_and_restore() {
    let (tmp, fleet) = setup_test_fleet().await;
    fleet
        .store()
        .append(Trailer::new("TR5001", "Flatbed").with_id("tr1"))
        .await
        .unwrap();

    let backup = fleet.backup(None).await.unwrap();
    assert!(backup.starts_with(fleet.config().backup_dir()));
    let name = backup.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("tms_backup_") && name.ends_with(".json"));

    let restored = Fleet::open(tmp.path().join("restored")).await.unwrap();
    restored.import_file(&backup).await.unwrap();
    assert_eq!(restored.store().snapshot().await, fleet.store().snapshot().await);
}

#[tokio::test]
async fn test_malformed_import_changes_nothing() {
    let (tmp, fleet) = setup_test_fleet().await;
    fleet
        .store()
        .append(Driver::new("John", "Martinez", DriverType::Cd))
        .await
        .unwrap();
    let path = fleet.store().path_for(RecordKind::Driver);
    let before = std::fs::read(&path).unwrap();

    let payload = tmp.path().join("broken.json");
    std::fs::write(&payload, r#"{"drivers": [{"driver_id": "d1", "created_at": "yesterday"}]}"#)
        .unwrap();

    let err = fleet.import_file(&payload).await.unwrap_err();
    assert!(matches!(err, Error::ImportPayload { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}
