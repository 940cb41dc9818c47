//! Error types for geometry conversion.

use stac_asf::errors::{ErrorKind, StacAsfError};
use thiserror::Error;

use crate::geometry::GeometryKind;

/// Errors that can occur while decoding, encoding or measuring geometries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: GeometryKind,
        found: GeometryKind,
    },

    #[error("Malformed coordinates: {0}")]
    MalformedCoordinates(String),

    #[error("Malformed WKT: {0}")]
    MalformedWkt(String),

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    #[error("No valid coordinates: {0}")]
    NoValidCoordinates(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Ambiguous spatial term: {0}")]
    AmbiguousSpatialTerm(String),
}

impl SpatialError {
    /// The core error kind this error maps onto.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpatialError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            SpatialError::MalformedCoordinates(_) => ErrorKind::MalformedCoordinates,
            SpatialError::MalformedWkt(_) => ErrorKind::MalformedWkt,
            SpatialError::UnsupportedGeometryType(_) => ErrorKind::UnsupportedGeometryType,
            SpatialError::NoValidCoordinates(_) => ErrorKind::NoValidCoordinates,
            SpatialError::EmptyInput(_) => ErrorKind::EmptyInput,
            SpatialError::AmbiguousSpatialTerm(_) => ErrorKind::AmbiguousSpatialTerm,
        }
    }
}

impl From<SpatialError> for StacAsfError {
    fn from(err: SpatialError) -> Self {
        StacAsfError::new(&err.to_string(), err.kind())
    }
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;
