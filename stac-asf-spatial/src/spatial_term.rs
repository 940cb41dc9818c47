use serde_json::Value;

use crate::bounding_box::BoundingBox;
use crate::error::{SpatialError, SpatialResult};
use crate::geometry::Geometry;
use crate::wkt::to_wkt;

/// The spatial part of a STAC item search.
///
/// A request restricts the search area with either `bbox` or `intersects`,
/// never both. Either way the backend receives a single WKT geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SpatialTerm {
    BBox(BoundingBox),
    Intersects(Geometry),
}

impl SpatialTerm {
    /// Builds the term from the raw request members.
    ///
    /// A JSON `null` for `intersects` counts as absent.
    ///
    /// # Errors
    ///
    /// * `AmbiguousSpatialTerm` - both `bbox` and `intersects` are present
    /// * any error of [`BoundingBox::from_slice`] or [`Geometry::from_json`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stac_asf_spatial::SpatialTerm;
    ///
    /// let term = SpatialTerm::from_request(Some(&[0.0, 0.0, 1.0, 1.0]), None).unwrap().unwrap();
    /// assert_eq!(term.to_wkt().unwrap(), "POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))");
    /// assert!(SpatialTerm::from_request(None, None).unwrap().is_none());
    /// ```
    pub fn from_request(
        bbox: Option<&[f64]>,
        intersects: Option<&Value>,
    ) -> SpatialResult<Option<SpatialTerm>> {
        let intersects = intersects.filter(|v| !v.is_null());
        match (bbox, intersects) {
            (Some(_), Some(_)) => Err(SpatialError::AmbiguousSpatialTerm(
                "only one of bbox and intersects may be given".to_string(),
            )),
            (Some(values), None) => Ok(Some(SpatialTerm::BBox(BoundingBox::from_slice(values)?))),
            (None, Some(value)) => Ok(Some(SpatialTerm::Intersects(Geometry::from_json(value)?))),
            (None, None) => Ok(None),
        }
    }

    /// The search area as a geometry.
    pub fn geometry(&self) -> Geometry {
        match self {
            SpatialTerm::BBox(bbox) => bbox.to_polygon(),
            SpatialTerm::Intersects(geometry) => geometry.clone(),
        }
    }

    pub fn bounding_box(&self) -> SpatialResult<BoundingBox> {
        match self {
            SpatialTerm::BBox(bbox) => Ok(*bbox),
            SpatialTerm::Intersects(geometry) => BoundingBox::from_geometry(geometry),
        }
    }

    /// The `intersectsWith` value sent to the backend.
    pub fn to_wkt(&self) -> SpatialResult<String> {
        match self {
            SpatialTerm::BBox(bbox) => to_wkt(&bbox.to_polygon()),
            SpatialTerm::Intersects(geometry) => to_wkt(geometry),
        }
    }
}
