use std::fmt::{self, Display};

use crate::error::{SpatialError, SpatialResult};
use crate::geometry::{Coordinate, Geometry};

/// An axis-aligned longitude/latitude rectangle.
///
/// Serializes as the STAC `[west, south, east, north]` array. No
/// antimeridian handling is done: `west` is always the smallest longitude
/// seen, so a box crossing 180° comes out as the complementary wide box.
///
/// # Examples
///
/// ```rust
/// use stac_asf_spatial::{BoundingBox, Geometry};
///
/// let bbox = BoundingBox::from_slice(&[-10.0, -5.0, 10.0, 5.0]).unwrap();
/// let polygon = bbox.to_polygon();
/// assert_eq!(BoundingBox::from_geometry(&polygon).unwrap(), bbox);
/// ```
#[derive(Clone, Copy, PartialEq, Default, Debug, serde::Deserialize, serde::Serialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Minimum longitude
    pub west: f64,
    /// Minimum latitude
    pub south: f64,
    /// Maximum longitude
    pub east: f64,
    /// Maximum latitude
    pub north: f64,
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox({}, {}, {}, {})",
            self.west, self.south, self.east, self.north
        )
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(value: [f64; 4]) -> Self {
        BoundingBox::new(value[0], value[1], value[2], value[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

impl BoundingBox {
    /// Creates a new bounding box. The values are taken as given.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Smallest box containing every position of the geometry.
    ///
    /// A point yields a degenerate box with `west == east` and
    /// `south == north`.
    ///
    /// # Errors
    ///
    /// Returns `NoValidCoordinates` if the geometry has no positions at all,
    /// e.g. a polygon whose rings are all empty.
    pub fn from_geometry(geometry: &Geometry) -> SpatialResult<Self> {
        if let Geometry::Point(c) = geometry {
            return Ok(Self::new(c.x, c.y, c.x, c.y));
        }
        Self::from_coordinates(geometry.coordinates()).map_err(|_| {
            SpatialError::NoValidCoordinates(format!("{} has no positions", geometry.kind()))
        })
    }

    /// Smallest box containing every coordinate yielded by the iterator.
    pub fn from_coordinates<'a, I>(coordinates: I) -> SpatialResult<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        coordinates
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, c| {
                Some(match acc {
                    None => Self::new(c.x, c.y, c.x, c.y),
                    Some(b) => Self::new(
                        b.west.min(c.x),
                        b.south.min(c.y),
                        b.east.max(c.x),
                        b.north.max(c.y),
                    ),
                })
            })
            .ok_or_else(|| SpatialError::NoValidCoordinates("no positions".to_string()))
    }

    /// Reads a STAC `bbox` array.
    ///
    /// Accepts the 2D form `[w, s, e, n]` and the 3D form
    /// `[w, s, zmin, e, n, zmax]`; the elevation bounds are dropped.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` - the slice is empty
    /// * `MalformedCoordinates` - any other length, or a non-finite value
    pub fn from_slice(values: &[f64]) -> SpatialResult<Self> {
        let bbox = match values {
            [] => return Err(SpatialError::EmptyInput("bbox is empty".to_string())),
            [w, s, e, n] => Self::new(*w, *s, *e, *n),
            [w, s, _, e, n, _] => Self::new(*w, *s, *e, *n),
            _ => {
                return Err(SpatialError::MalformedCoordinates(format!(
                    "bbox needs 4 or 6 numbers, found {}",
                    values.len()
                )))
            }
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SpatialError::MalformedCoordinates(format!(
                "bbox contains a non-finite value: {:?}",
                values
            )));
        }
        Ok(bbox)
    }

    /// `[west, south, east, north]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// The box as a single-ring polygon.
    ///
    /// The ring runs `(w s) (e s) (e n) (w n) (w s)`: counter-clockwise and
    /// closed.
    pub fn to_polygon(&self) -> Geometry {
        Geometry::Polygon(vec![vec![
            Coordinate::new(self.west, self.south),
            Coordinate::new(self.east, self.south),
            Coordinate::new(self.east, self.north),
            Coordinate::new(self.west, self.north),
            Coordinate::new(self.west, self.south),
        ]])
    }
}
