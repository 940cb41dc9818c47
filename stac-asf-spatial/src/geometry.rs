//! Geometry values as they appear in STAC item-search requests.
//!
//! A [`Geometry`] is a tagged value holding either a point, a line string,
//! a polygon or a multi-polygon. Coordinates are longitude/latitude pairs
//! stored as `x`/`y`; any third ordinate (altitude) present on input is
//! dropped during decoding.
//!
//! Geometries decode from and encode to the GeoJSON-style
//! `{"type": ..., "coordinates": ...}` object through [`RawGeometry`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{self, Display};

use crate::error::{SpatialError, SpatialResult};

/// A 2D coordinate (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn to_json(self) -> Value {
        json!([self.x, self.y])
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An ordered sequence of positions. The first ring of a polygon is its
/// outer boundary, the rest are holes.
pub type Ring = Vec<Coordinate>;

/// Geometry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    /// Resolves a GeoJSON type name. Matching is exact, as in GeoJSON.
    pub fn from_name(name: &str) -> Option<GeometryKind> {
        match name {
            "Point" => Some(GeometryKind::Point),
            "LineString" => Some(GeometryKind::LineString),
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The undecoded `{type, coordinates}` object.
///
/// Deserializing a [`Geometry`] goes through this type, so a geometry nested
/// in a larger request body is validated by serde as it is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// A decoded geometry.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use stac_asf_spatial::{Coordinate, Geometry};
///
/// let point = Geometry::from_json(&json!({"type": "Point", "coordinates": [10.0, 20.0, 5.0]})).unwrap();
/// assert_eq!(point.as_point().unwrap(), Coordinate::new(10.0, 20.0));
/// assert!(point.as_polygon().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry", into = "RawGeometry")]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Decodes a `{type, coordinates}` JSON object.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` - the value is `null`
    /// * `UnsupportedGeometryType` - the type tag is not one of the four kinds
    /// * `MalformedCoordinates` - the object or its coordinate arrays have the
    ///   wrong shape, or a position has fewer than two numbers
    pub fn from_json(value: &Value) -> SpatialResult<Geometry> {
        if value.is_null() {
            return Err(SpatialError::EmptyInput("geometry is null".to_string()));
        }
        let raw = RawGeometry::deserialize(value)
            .map_err(|e| SpatialError::MalformedCoordinates(e.to_string()))?;
        Geometry::try_from(raw)
    }

    /// Encodes back into a `{type, coordinates}` JSON object.
    pub fn to_json(&self) -> Value {
        let coordinates = match self {
            Geometry::Point(c) => c.to_json(),
            Geometry::LineString(line) => positions_to_json(line),
            Geometry::Polygon(rings) => rings_to_json(rings),
            Geometry::MultiPolygon(polygons) => {
                Value::Array(polygons.iter().map(|p| rings_to_json(p)).collect())
            }
        };
        json!({ "type": self.kind().as_str(), "coordinates": coordinates })
    }

    pub fn as_point(&self) -> SpatialResult<Coordinate> {
        match self {
            Geometry::Point(c) => Ok(*c),
            other => Err(other.mismatch(GeometryKind::Point)),
        }
    }

    pub fn as_line_string(&self) -> SpatialResult<&[Coordinate]> {
        match self {
            Geometry::LineString(line) => Ok(line),
            other => Err(other.mismatch(GeometryKind::LineString)),
        }
    }

    /// The rings of a polygon, outer boundary first.
    pub fn as_polygon(&self) -> SpatialResult<&[Ring]> {
        match self {
            Geometry::Polygon(rings) => Ok(rings),
            other => Err(other.mismatch(GeometryKind::Polygon)),
        }
    }

    pub fn as_multi_polygon(&self) -> SpatialResult<&[Vec<Ring>]> {
        match self {
            Geometry::MultiPolygon(polygons) => Ok(polygons),
            other => Err(other.mismatch(GeometryKind::MultiPolygon)),
        }
    }

    /// Every position of the geometry, flattened in storage order.
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Coordinate> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(line) => Box::new(line.iter()),
            Geometry::Polygon(rings) => Box::new(rings.iter().flatten()),
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten().flatten()),
        }
    }

    fn mismatch(&self, expected: GeometryKind) -> SpatialError {
        SpatialError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = SpatialError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        let kind = GeometryKind::from_name(&raw.kind)
            .ok_or_else(|| SpatialError::UnsupportedGeometryType(raw.kind.clone()))?;
        let coordinates = &raw.coordinates;
        let geometry = match kind {
            GeometryKind::Point => Geometry::Point(decode_position(coordinates)?),
            GeometryKind::LineString => Geometry::LineString(decode_positions(coordinates)?),
            GeometryKind::Polygon => Geometry::Polygon(decode_rings(coordinates)?),
            GeometryKind::MultiPolygon => Geometry::MultiPolygon(
                as_array(coordinates, "polygons")?
                    .iter()
                    .map(decode_rings)
                    .collect::<SpatialResult<_>>()?,
            ),
        };
        Ok(geometry)
    }
}

impl From<Geometry> for RawGeometry {
    fn from(geometry: Geometry) -> Self {
        let mut encoded = geometry.to_json();
        RawGeometry {
            kind: geometry.kind().as_str().to_string(),
            coordinates: encoded["coordinates"].take(),
        }
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> SpatialResult<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        SpatialError::MalformedCoordinates(format!("expected an array of {}, found {}", what, value))
    })
}

fn decode_position(value: &Value) -> SpatialResult<Coordinate> {
    let ordinates = as_array(value, "numbers")?;
    if ordinates.len() < 2 {
        return Err(SpatialError::MalformedCoordinates(format!(
            "position needs at least 2 numbers, found {}",
            value
        )));
    }
    let ordinate = |v: &Value| {
        v.as_f64().ok_or_else(|| {
            SpatialError::MalformedCoordinates(format!("non-numeric ordinate {} in {}", v, value))
        })
    };
    Ok(Coordinate::new(ordinate(&ordinates[0])?, ordinate(&ordinates[1])?))
}

fn decode_positions(value: &Value) -> SpatialResult<Vec<Coordinate>> {
    as_array(value, "positions")?
        .iter()
        .map(decode_position)
        .collect()
}

fn decode_rings(value: &Value) -> SpatialResult<Vec<Ring>> {
    as_array(value, "rings")?
        .iter()
        .map(decode_positions)
        .collect()
}

fn positions_to_json(positions: &[Coordinate]) -> Value {
    Value::Array(positions.iter().map(|c| c.to_json()).collect())
}

fn rings_to_json(rings: &[Ring]) -> Value {
    Value::Array(rings.iter().map(|r| positions_to_json(r)).collect())
}
