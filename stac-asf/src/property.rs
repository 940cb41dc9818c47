//! Mapping of STAC extension properties onto ASF search fields.
//!
//! The table is a process-wide `static`; lookups never allocate and the
//! resolver can be shared between threads freely.

use std::fmt::{self, Display};

use crate::errors::{ErrorKind, StacAsfError, StacAsfResult};

/// Backend field that holds the satellite orbit direction.
pub const FLIGHT_DIRECTION_FIELD: &str = "flightDirection";

/// The value type a backend field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A scalar string. Repeated equality accumulates, `in` is rejected.
    String,
    /// A list of strings, insertion order preserved.
    StringSet,
    /// A list of integers, insertion order preserved.
    IntSet,
    /// `ASCENDING` or `DESCENDING`, single-valued with conflict detection.
    OrbitState,
}

impl ValueKind {
    /// Whether the `in` operator may target a field of this kind.
    pub fn accepts_membership(&self) -> bool {
        matches!(self, ValueKind::StringSet | ValueKind::IntSet)
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => write!(f, "string"),
            ValueKind::StringSet => write!(f, "string-set"),
            ValueKind::IntSet => write!(f, "int-set"),
            ValueKind::OrbitState => write!(f, "enum-orbit-state"),
        }
    }
}

/// One row of the property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyMapping {
    /// STAC extension property name, e.g. `sar:instrument_mode`.
    pub property: &'static str,
    /// ASF search parameter name, e.g. `beamMode`.
    pub field: &'static str,
    pub kind: ValueKind,
}

static PROPERTY_TABLE: &[PropertyMapping] = &[
    PropertyMapping {
        property: "sar:instrument_mode",
        field: "beamMode",
        kind: ValueKind::StringSet,
    },
    PropertyMapping {
        property: "sar:polarizations",
        field: "polarization",
        kind: ValueKind::StringSet,
    },
    PropertyMapping {
        property: "sar:product_type",
        field: "processingLevel",
        kind: ValueKind::String,
    },
    PropertyMapping {
        property: "platform",
        field: "platform",
        kind: ValueKind::StringSet,
    },
    PropertyMapping {
        property: "sat:orbit_state",
        field: FLIGHT_DIRECTION_FIELD,
        kind: ValueKind::OrbitState,
    },
    PropertyMapping {
        property: "sat:relative_orbit",
        field: "relativeOrbit",
        kind: ValueKind::IntSet,
    },
    PropertyMapping {
        property: "sat:absolute_orbit",
        field: "absoluteOrbit",
        kind: ValueKind::IntSet,
    },
];

/// Stateless lookup over the static property table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyResolver;

impl PropertyResolver {
    /// Looks up the backend mapping of a property, `None` when unsupported.
    pub fn lookup(property: &str) -> Option<&'static PropertyMapping> {
        PROPERTY_TABLE.iter().find(|m| m.property == property)
    }

    /// Looks up the backend mapping of a property.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedProperty` when the property has no mapping.
    pub fn resolve(property: &str) -> StacAsfResult<&'static PropertyMapping> {
        Self::lookup(property).ok_or_else(|| {
            StacAsfError::new(
                &format!(
                    "property '{}' is not supported, expected one of: {}",
                    property,
                    itertools::join(Self::supported_properties(), ", ")
                ),
                ErrorKind::UnsupportedProperty,
            )
        })
    }

    /// Names of every property the table can translate, in table order.
    pub fn supported_properties() -> impl Iterator<Item = &'static str> {
        PROPERTY_TABLE.iter().map(|m| m.property)
    }

    /// All rows of the table.
    pub fn mappings() -> &'static [PropertyMapping] {
        PROPERTY_TABLE
    }
}
