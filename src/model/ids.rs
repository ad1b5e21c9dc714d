//! Typed record identifiers
//!
//! Every record kind gets its own id newtype so a truck id can never be
//! passed where a driver id is expected. Ids are opaque text; the store does
//! not enforce uniqueness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Produce a short, practically-unique identifier: the first 8 hex
/// characters of a random (v4) UUID.
///
/// Only 32 of the 128 random bits survive, and new ids are not checked
/// against existing ones, so collisions are possible (birthday bound ~77k
/// records for a 50% chance). Treat ids as a convention, not a key.
pub fn generate_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// A freshly generated id (see [`generate_id`])
            pub fn generate() -> Self {
                Self(generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a [`Driver`](super::Driver)
    DriverId
);
define_id!(
    /// Identifies a [`Truck`](super::Truck)
    TruckId
);
define_id!(
    /// Identifies a [`Trailer`](super::Trailer)
    TrailerId
);
define_id!(MaintenanceId);
define_id!(OtrId);
define_id!(PmId);
define_id!(ShopJobId);

/// A truck's `assigned_driver` column
///
/// Historically this held either a driver id or the driver's full name,
/// depending on which tool wrote the row. The two interpretations are kept
/// apart: [`DriverRef::matches_id`] for id links, [`DriverRef::matches_name`]
/// for the legacy name link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverRef(String);

impl DriverRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// No driver assigned
    pub fn is_unassigned(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Exact id match; an empty reference matches nothing
    pub fn matches_id(&self, id: &DriverId) -> bool {
        !self.is_unassigned() && !id.is_empty() && self.0 == id.as_str()
    }

    /// Exact full-name match; an empty reference matches nothing
    pub fn matches_name(&self, full_name: &str) -> bool {
        !self.is_unassigned() && self.0 == full_name
    }
}

impl From<&DriverId> for DriverRef {
    fn from(id: &DriverId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl From<String> for DriverRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DriverRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for DriverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
