//! Word lists the generator draws from

pub const FIRST_NAMES: &[&str] = &[
    "John", "Sarah", "Michael", "Lisa", "Robert", "Emily", "David", "Jennifer", "James", "Mary",
];

pub const LAST_NAMES: &[&str] = &[
    "Martinez", "Johnson", "Thompson", "Rodriguez", "Wilson", "Smith", "Brown", "Davis", "Miller",
    "Anderson",
];

pub const DRIVER_TYPES: &[&str] = &["CD", "LP", "LP Owner"];

pub const STATUSES: &[&str] = &["Active", "Maintenance", "Available", "Assigned"];

pub const STREETS: &[&str] = &["Main St", "Oak Ave", "Pine St"];

pub const CITIES: &[&str] = &[
    "Dallas, TX",
    "Houston, TX",
    "Austin, TX",
    "San Antonio, TX",
    "Fort Worth, TX",
    "Oklahoma City, OK",
    "Shreveport, LA",
    "Denver, CO",
];

pub const DRIVER_NOTES: &[&str] = &["Experienced driver", "New hire", "Senior driver"];

pub const MAKES: &[&str] = &["Freightliner", "Peterbilt", "Kenworth", "Volvo"];

pub const MODELS: &[&str] = &["Cascadia", "579", "T680", "VNL 760"];

pub const ENGINE_TYPES: &[&str] = &["DD15", "PACCAR MX-13", "PACCAR MX-11", "D13", "DD13"];

pub const VIN_PREFIXES: &[&str] = &["FUJGLDR", "XPBDP9X", "XKYDP9X", "V4NC9EH"];

pub const TRUCK_NOTES: &[&str] = &["High mileage", "Lease unit", "New unit"];

pub const TRAILER_TYPES: &[&str] = &["Dry Van", "Refrigerated", "Flatbed"];

pub const TRAILER_MAKES: &[&str] = &["Great Dane", "Utility", "Fontaine", "Wabash"];

pub const CAPACITIES: &[&str] = &[
    "53' - 110,000 lbs",
    "48' - 80,000 lbs",
    "53' - 105,000 lbs",
];

pub const TRAILER_NOTES: &[&str] = &["Good condition", "New trailer", "In maintenance"];

pub const MAINTENANCE_TYPES: &[&str] = &["Routine Maintenance", "Brake Service", "Inspection"];

pub const SHOP_NAMES: &[&str] = &["Company Shop", "Pete's Service", "Cold Chain"];

pub const OTR_ISSUES: &[&str] = &["Alternator failure", "Tire blowout", "DEF system malfunction"];

pub const REPAIR_SHOPS: &[&str] = &["Roadside Pros", "Interstate Truck Repair", "Big Rig Rescue"];

pub const PM_TYPES: &[&str] = &["A Service", "B Service", "C Service"];

pub const SHOP_JOB_TYPES: &[&str] = &["Engine Work", "Brake Work", "Routine Service"];

pub const PRIORITIES: &[&str] = &["High", "Medium", "Low"];

pub const TECHNICIANS: &[&str] = &[
    "Mike Stevens",
    "Pete Williams",
    "Tom Garcia",
    "Jim Anderson",
    "Ken Miller",
    "Dave Richardson",
    "Carlos Lopez",
];
