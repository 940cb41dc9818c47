//! # stac_asf_spatial - Geometry conversion for STAC/ASF translation
//!
//! This crate converts the spatial parts of a STAC item search into what the
//! ASF search API understands, and back.
//!
//! ## Features
//!
//! - **Typed geometries**: `{type, coordinates}` objects decoded once into a
//!   tagged [`Geometry`] with typed accessors
//! - **Bounding boxes**: reduction of any geometry to `[w, s, e, n]`, and a
//!   closed rectangle polygon from a box
//! - **WKT writer**: `POINT`, `POLYGON` and `MULTIPOLYGON` with exact
//!   shortest-form numbers
//! - **WKT reader**: depth-tracked group splitting shared by every nesting
//!   level, used on backend responses
//! - **Search terms**: the mutually exclusive `bbox` / `intersects` pair as
//!   one [`SpatialTerm`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use stac_asf_spatial::{bbox_from_wkt, SpatialTerm};
//!
//! # fn main() -> Result<(), stac_asf_spatial::SpatialError> {
//! // request path: intersects geometry to the backend's WKT
//! let intersects = json!({
//!     "type": "Polygon",
//!     "coordinates": [[[0, 0], [2, 0], [2, 1], [0, 0]]]
//! });
//! if let Some(term) = SpatialTerm::from_request(None, Some(&intersects))? {
//!     assert_eq!(term.to_wkt()?, "POLYGON((0 0, 2 0, 2 1, 0 0))");
//! }
//!
//! // response path: footprint WKT to a STAC bbox
//! let bbox = bbox_from_wkt("POLYGON((10 20, 11 20, 11 21, 10 20))")?;
//! assert_eq!(bbox.to_array(), [10.0, 20.0, 11.0, 21.0]);
//! # Ok(())
//! # }
//! ```
//!
//! Errors convert into [`stac_asf::errors::StacAsfError`] with `?`.

pub mod bounding_box;
pub mod error;
pub mod geometry;
pub mod spatial_term;
pub mod wkt;

pub use bounding_box::BoundingBox;
pub use error::{SpatialError, SpatialResult};
pub use geometry::{Coordinate, Geometry, GeometryKind, RawGeometry, Ring};
pub use spatial_term::SpatialTerm;
pub use wkt::{bbox_from_wkt, parse_wkt, split_top_level_groups, to_wkt};
