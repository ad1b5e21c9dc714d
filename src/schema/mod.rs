//! Schema registry for fleetdb
//!
//! Declares, for each of the seven record kinds, the ordered column list of
//! its CSV table and the expected type of every column:
//! - Column order defines the header row and serialization order
//! - Field types drive form coercion and data generation
//! - Types are not enforced when a table is loaded
//!
//! Tables live at `{data_dir}/{table_name}.csv`.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// One of the seven record kinds kept by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Driver,
    Truck,
    Trailer,
    Maintenance,
    OtrRepair,
    PmRecord,
    ShopJob,
}

impl RecordKind {
    pub const COUNT: usize = 7;

    /// Every kind, in canonical table order
    pub const ALL: [RecordKind; Self::COUNT] = [
        RecordKind::Driver,
        RecordKind::Truck,
        RecordKind::Trailer,
        RecordKind::Maintenance,
        RecordKind::OtrRepair,
        RecordKind::PmRecord,
        RecordKind::ShopJob,
    ];

    /// Position in [`RecordKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Table name, also used as the key in export documents
    pub fn table_name(&self) -> &'static str {
        match self {
            RecordKind::Driver => "drivers",
            RecordKind::Truck => "trucks",
            RecordKind::Trailer => "trailers",
            RecordKind::Maintenance => "maintenance",
            RecordKind::OtrRepair => "otr_repairs",
            RecordKind::PmRecord => "pm_records",
            RecordKind::ShopJob => "shop_jobs",
        }
    }

    /// Backing file name inside the data directory
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.table_name())
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Driver => "Driver",
            RecordKind::Truck => "Truck",
            RecordKind::Trailer => "Trailer",
            RecordKind::Maintenance => "Maintenance record",
            RecordKind::OtrRepair => "OTR repair",
            RecordKind::PmRecord => "PM record",
            RecordKind::ShopJob => "Shop job",
        }
    }

    /// Whether this is one of the four detail tables
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            RecordKind::Maintenance | RecordKind::OtrRepair | RecordKind::PmRecord | RecordKind::ShopJob
        )
    }

    /// Column definitions for this kind
    pub fn schema(&self) -> &'static Schema {
        match self {
            RecordKind::Driver => &DRIVER_SCHEMA,
            RecordKind::Truck => &TRUCK_SCHEMA,
            RecordKind::Trailer => &TRAILER_SCHEMA,
            RecordKind::Maintenance => &MAINTENANCE_SCHEMA,
            RecordKind::OtrRepair => &OTR_SCHEMA,
            RecordKind::PmRecord => &PM_SCHEMA,
            RecordKind::ShopJob => &SHOP_JOB_SCHEMA,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let kind = match normalized.as_str() {
            "drivers" | "driver" => RecordKind::Driver,
            "trucks" | "truck" => RecordKind::Truck,
            "trailers" | "trailer" => RecordKind::Trailer,
            "maintenance" | "maintenance_records" => RecordKind::Maintenance,
            "otr_repairs" | "otr_repair" | "otr" => RecordKind::OtrRepair,
            "pm_records" | "pm_record" | "pm" => RecordKind::PmRecord,
            "shop_jobs" | "shop_job" | "shop" => RecordKind::ShopJob,
            _ => {
                return Err(Error::UnknownRecordKind {
                    name: s.to_string(),
                })
            }
        };
        Ok(kind)
    }
}

/// A field type in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// The record's own identifier
    Id,
    Text,
    Int,
    Float,
    Bool,
    /// `YYYY-MM-DD`
    Date,
    /// RFC 3339 creation timestamp
    Timestamp,
    /// Reference to another record kind, by id
    Ref(RecordKind),
}

impl FieldType {
    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Id | FieldType::Text | FieldType::Ref(_) => "text",
            FieldType::Int => "integer",
            FieldType::Float => "decimal number",
            FieldType::Bool => "boolean",
            FieldType::Date => "date (YYYY-MM-DD)",
            FieldType::Timestamp => "timestamp",
        }
    }
}

/// Where a field's value comes from when a record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be supplied by the caller
    Required,
    /// May be omitted; defaults to empty / zero / false
    Optional,
    /// Filled in by the store (ids, creation timestamps)
    Generated,
    /// Computed from other fields (cost totals)
    Derived,
}

/// Definition of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
    pub presence: Presence,
}

impl FieldDef {
    const fn new(name: &'static str, field_type: FieldType, presence: Presence) -> Self {
        Self {
            name,
            field_type,
            presence,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Whether callers supply this field (as opposed to the store)
    pub fn is_input(&self) -> bool {
        matches!(self.presence, Presence::Required | Presence::Optional)
    }
}

/// Ordered column list for one record kind
#[derive(Debug)]
pub struct Schema {
    pub kind: RecordKind,
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Column names in serialization order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Look up a column by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The header row as written to disk
    pub fn header_line(&self) -> String {
        self.field_names().join(",")
    }

    /// The primary key column (always the first)
    pub fn id_field(&self) -> &'static str {
        self.fields[0].name
    }
}

use FieldType::{Bool, Date, Float, Id, Int, Ref, Text, Timestamp};
use Presence::{Derived, Generated, Optional, Required};

const CREATED_AT: FieldDef = FieldDef::new("created_at", Timestamp, Generated);
const STATUS: FieldDef = FieldDef::new("status", Text, Required);
const NOTES: FieldDef = FieldDef::new("notes", Text, Optional);

static DRIVER_SCHEMA: Schema = Schema {
    kind: RecordKind::Driver,
    fields: &[
        FieldDef::new("driver_id", Id, Generated),
        FieldDef::new("first_name", Text, Required),
        FieldDef::new("last_name", Text, Required),
        FieldDef::new("license_number", Text, Required),
        FieldDef::new("driver_type", Text, Required),
        FieldDef::new("hire_date", Date, Required),
        FieldDef::new("phone", Text, Optional),
        FieldDef::new("email", Text, Optional),
        FieldDef::new("address", Text, Optional),
        FieldDef::new("cdl_expiry", Date, Optional),
        FieldDef::new("medical_expiry", Date, Optional),
        STATUS,
        NOTES,
        CREATED_AT,
    ],
};

static TRUCK_SCHEMA: Schema = Schema {
    kind: RecordKind::Truck,
    fields: &[
        FieldDef::new("truck_id", Id, Generated),
        FieldDef::new("truck_number", Text, Required),
        FieldDef::new("make", Text, Required),
        FieldDef::new("model", Text, Required),
        FieldDef::new("year", Text, Required),
        FieldDef::new("vin", Text, Required),
        FieldDef::new("engine_type", Text, Optional),
        FieldDef::new("mileage", Int, Optional),
        FieldDef::new("assigned_driver", Ref(RecordKind::Driver), Optional),
        STATUS,
        FieldDef::new("purchase_date", Date, Optional),
        FieldDef::new("last_pm_date", Date, Optional),
        FieldDef::new("next_pm_due", Date, Optional),
        NOTES,
        CREATED_AT,
    ],
};

static TRAILER_SCHEMA: Schema = Schema {
    kind: RecordKind::Trailer,
    fields: &[
        FieldDef::new("trailer_id", Id, Generated),
        FieldDef::new("trailer_number", Text, Required),
        FieldDef::new("type", Text, Required),
        FieldDef::new("year", Text, Required),
        FieldDef::new("make", Text, Required),
        FieldDef::new("capacity", Text, Optional),
        FieldDef::new("assigned_truck", Ref(RecordKind::Truck), Optional),
        STATUS,
        FieldDef::new("last_inspection", Date, Optional),
        FieldDef::new("next_inspection_due", Date, Optional),
        NOTES,
        CREATED_AT,
    ],
};

static MAINTENANCE_SCHEMA: Schema = Schema {
    kind: RecordKind::Maintenance,
    fields: &[
        FieldDef::new("maintenance_id", Id, Generated),
        FieldDef::new("truck_id", Ref(RecordKind::Truck), Optional),
        FieldDef::new("trailer_id", Ref(RecordKind::Trailer), Optional),
        FieldDef::new("maintenance_type", Text, Required),
        FieldDef::new("date", Date, Required),
        FieldDef::new("mileage", Int, Optional),
        FieldDef::new("description", Text, Optional),
        FieldDef::new("parts_cost", Float, Optional),
        FieldDef::new("labor_cost", Float, Optional),
        FieldDef::new("total_cost", Float, Derived),
        FieldDef::new("shop_name", Text, Optional),
        FieldDef::new("shop_location", Text, Optional),
        FieldDef::new("technician", Text, Optional),
        STATUS,
        NOTES,
        CREATED_AT,
    ],
};

static OTR_SCHEMA: Schema = Schema {
    kind: RecordKind::OtrRepair,
    fields: &[
        FieldDef::new("otr_id", Id, Generated),
        FieldDef::new("truck_id", Ref(RecordKind::Truck), Required),
        FieldDef::new("driver_id", Ref(RecordKind::Driver), Required),
        FieldDef::new("breakdown_date", Date, Required),
        FieldDef::new("location", Text, Required),
        FieldDef::new("issue_description", Text, Required),
        FieldDef::new("repair_shop", Text, Required),
        FieldDef::new("repair_cost", Float, Optional),
        FieldDef::new("parts_used", Text, Optional),
        FieldDef::new("labor_hours", Float, Optional),
        FieldDef::new("downtime_hours", Float, Optional),
        FieldDef::new("tow_cost", Float, Optional),
        FieldDef::new("hotel_cost", Float, Optional),
        FieldDef::new("total_cost", Float, Derived),
        FieldDef::new("insurance_claim", Bool, Optional),
        STATUS,
        NOTES,
        CREATED_AT,
    ],
};

static PM_SCHEMA: Schema = Schema {
    kind: RecordKind::PmRecord,
    fields: &[
        FieldDef::new("pm_id", Id, Generated),
        FieldDef::new("truck_id", Ref(RecordKind::Truck), Required),
        FieldDef::new("pm_type", Text, Required),
        FieldDef::new("date", Date, Required),
        FieldDef::new("mileage", Int, Optional),
        FieldDef::new("next_due_date", Date, Optional),
        FieldDef::new("next_due_mileage", Int, Optional),
        FieldDef::new("shop_name", Text, Required),
        FieldDef::new("technician", Text, Optional),
        FieldDef::new("oil_change", Bool, Optional),
        FieldDef::new("filter_change", Bool, Optional),
        FieldDef::new("inspection_items", Text, Optional),
        FieldDef::new("parts_cost", Float, Optional),
        FieldDef::new("labor_cost", Float, Optional),
        FieldDef::new("total_cost", Float, Derived),
        STATUS,
        NOTES,
        CREATED_AT,
    ],
};

static SHOP_JOB_SCHEMA: Schema = Schema {
    kind: RecordKind::ShopJob,
    fields: &[
        FieldDef::new("job_id", Id, Generated),
        FieldDef::new("truck_id", Ref(RecordKind::Truck), Optional),
        FieldDef::new("trailer_id", Ref(RecordKind::Trailer), Optional),
        FieldDef::new("job_type", Text, Required),
        FieldDef::new("date_started", Date, Required),
        FieldDef::new("date_completed", Date, Optional),
        FieldDef::new("description", Text, Required),
        FieldDef::new("technician", Text, Required),
        FieldDef::new("parts_used", Text, Optional),
        FieldDef::new("labor_hours", Float, Optional),
        FieldDef::new("parts_cost", Float, Optional),
        FieldDef::new("labor_cost", Float, Optional),
        FieldDef::new("total_cost", Float, Derived),
        STATUS,
        FieldDef::new("priority", Text, Required),
        NOTES,
        CREATED_AT,
    ],
};
