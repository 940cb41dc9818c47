//! Well-Known Text reading and writing.
//!
//! Only `POINT`, `POLYGON` and `MULTIPOLYGON` are supported, in both
//! directions. The writer emits `", "` between positions and rings and no
//! space between the keyword and the opening parenthesis:
//!
//! ```text
//! POINT(30 10)
//! POLYGON((0 0, 4 0, 4 4, 0 0), (1 1, 2 1, 2 2, 1 1))
//! MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)))
//! ```
//!
//! The reader is tolerant of whitespace and keyword case, and ignores any
//! ordinates beyond the second (`Z`/`M` values). Every nesting level is split
//! with [`split_top_level_groups`], which tracks parenthesis depth.

use std::fmt::Write;

use log::{debug, trace};

use crate::bounding_box::BoundingBox;
use crate::error::{SpatialError, SpatialResult};
use crate::geometry::{Coordinate, Geometry, Ring};

/// WKT keywords recognised but not supported.
const OTHER_WKT_TYPES: &[&str] = &[
    "LINESTRING",
    "MULTIPOINT",
    "MULTILINESTRING",
    "GEOMETRYCOLLECTION",
    "TRIANGLE",
    "TIN",
    "POLYHEDRALSURFACE",
    "CIRCULARSTRING",
    "COMPOUNDCURVE",
    "CURVEPOLYGON",
    "MULTICURVE",
    "MULTISURFACE",
];

/// Writes a geometry as WKT.
///
/// Numbers are written in their shortest round-trip form, so reading the
/// text back yields the same coordinates. Anything this returns `Ok` for is
/// accepted by [`parse_wkt`].
///
/// # Errors
///
/// * `UnsupportedGeometryType` - a line string
/// * `EmptyInput` - a polygon without rings, a ring without positions, or a
///   multi-polygon without polygons
/// * `MalformedCoordinates` - a NaN or infinite ordinate
///
/// # Examples
///
/// ```rust
/// use stac_asf_spatial::{to_wkt, BoundingBox};
///
/// let wkt = to_wkt(&BoundingBox::new(0.0, 0.0, 1.5, 2.0).to_polygon()).unwrap();
/// assert_eq!(wkt, "POLYGON((0 0, 1.5 0, 1.5 2, 0 2, 0 0))");
/// ```
pub fn to_wkt(geometry: &Geometry) -> SpatialResult<String> {
    let result = write_geometry(geometry);
    if let Err(e) = &result {
        debug!("Failed to write {} as WKT: {}", geometry.kind(), e);
    }
    result
}

fn write_geometry(geometry: &Geometry) -> SpatialResult<String> {
    let mut out = String::new();
    match geometry {
        Geometry::Point(c) => {
            out.push_str("POINT(");
            write_position(&mut out, c)?;
            out.push(')');
        }
        Geometry::Polygon(rings) => {
            out.push_str("POLYGON");
            write_polygon(&mut out, rings)?;
        }
        Geometry::MultiPolygon(polygons) => {
            if polygons.is_empty() {
                return Err(SpatialError::EmptyInput(
                    "multi-polygon has no polygons".to_string(),
                ));
            }
            out.push_str("MULTIPOLYGON(");
            for (i, polygon) in polygons.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_polygon(&mut out, polygon)?;
            }
            out.push(')');
        }
        Geometry::LineString(_) => {
            return Err(SpatialError::UnsupportedGeometryType(
                "LineString has no WKT encoding here".to_string(),
            ));
        }
    }
    Ok(out)
}

fn write_position(out: &mut String, c: &Coordinate) -> SpatialResult<()> {
    if !c.x.is_finite() || !c.y.is_finite() {
        return Err(SpatialError::MalformedCoordinates(format!(
            "non-finite position {}",
            c
        )));
    }
    // writing to a String cannot fail
    let _ = write!(out, "{} {}", c.x, c.y);
    Ok(())
}

fn write_polygon(out: &mut String, rings: &[Ring]) -> SpatialResult<()> {
    if rings.is_empty() {
        return Err(SpatialError::EmptyInput("polygon has no rings".to_string()));
    }
    out.push('(');
    for (i, ring) in rings.iter().enumerate() {
        if ring.is_empty() {
            return Err(SpatialError::EmptyInput(format!(
                "ring {} of polygon has no positions",
                i
            )));
        }
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        for (j, c) in ring.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            write_position(out, c)?;
        }
        out.push(')');
    }
    out.push(')');
    Ok(())
}

/// Reads a `POINT`, `POLYGON` or `MULTIPOLYGON` from WKT.
///
/// # Errors
///
/// * `EmptyInput` - the text is blank
/// * `UnsupportedGeometryType` - another WKT geometry type
/// * `MalformedWkt` - anything else that does not parse
///
/// # Examples
///
/// ```rust
/// use stac_asf_spatial::{parse_wkt, Coordinate};
///
/// let geometry = parse_wkt("point (30 10)").unwrap();
/// assert_eq!(geometry.as_point().unwrap(), Coordinate::new(30.0, 10.0));
/// ```
pub fn parse_wkt(text: &str) -> SpatialResult<Geometry> {
    let result = parse_geometry(text);
    match &result {
        Ok(geometry) => trace!("Parsed WKT into {}", geometry.kind()),
        Err(e) => debug!("Failed to parse WKT {:?}: {}", text, e),
    }
    result
}

fn parse_geometry(text: &str) -> SpatialResult<Geometry> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SpatialError::EmptyInput("WKT text is blank".to_string()));
    }

    let keyword_end = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let keyword = text[..keyword_end].to_ascii_uppercase();
    let body = single_group(&text[keyword_end..])?;

    // longer keywords first, so that MULTIPOLYGON never reads as POLYGON
    match keyword.as_str() {
        "MULTIPOLYGON" => parse_multi_polygon(body),
        "POLYGON" => Ok(Geometry::Polygon(parse_rings(body)?)),
        "POINT" => parse_point(body),
        other if OTHER_WKT_TYPES.contains(&other) => {
            Err(SpatialError::UnsupportedGeometryType(other.to_string()))
        }
        _ => Err(SpatialError::MalformedWkt(format!(
            "unknown geometry type in {:?}",
            text
        ))),
    }
}

/// Splits text into its top-level parenthesised groups.
///
/// Each returned slice starts with `(` and ends with the matching `)`.
/// Commas and whitespace between groups are dropped; commas inside a group
/// are left alone, so the same function splits every nesting level of a
/// WKT body.
///
/// # Errors
///
/// Returns `MalformedWkt` for an unmatched `)`, an unclosed `(`, or any
/// other character outside a group.
///
/// # Examples
///
/// ```rust
/// use stac_asf_spatial::split_top_level_groups;
///
/// let groups = split_top_level_groups("(0 0, 1 1), ((2 2), (3 3))").unwrap();
/// assert_eq!(groups, vec!["(0 0, 1 1)", "((2 2), (3 3))"]);
/// ```
pub fn split_top_level_groups(text: &str) -> SpatialResult<Vec<&str>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, ch) in text.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(SpatialError::MalformedWkt(format!(
                        "unmatched ')' at offset {} in {:?}",
                        i, text
                    )));
                }
                depth -= 1;
                if depth == 0 {
                    groups.push(&text[start..=i]);
                }
            }
            ',' if depth == 0 => {}
            c if depth == 0 && !c.is_whitespace() => {
                return Err(SpatialError::MalformedWkt(format!(
                    "unexpected {:?} outside parentheses in {:?}",
                    c, text
                )));
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(SpatialError::MalformedWkt(format!(
            "{} unclosed '(' in {:?}",
            depth, text
        )));
    }
    Ok(groups)
}

/// The contents of the one group the text must consist of.
fn single_group(text: &str) -> SpatialResult<&str> {
    match split_top_level_groups(text)?.as_slice() {
        [group] => Ok(inner(*group)),
        groups => Err(SpatialError::MalformedWkt(format!(
            "expected one parenthesised body, found {} in {:?}",
            groups.len(),
            text.trim()
        ))),
    }
}

fn inner(group: &str) -> &str {
    &group[1..group.len() - 1]
}

fn parse_point(body: &str) -> SpatialResult<Geometry> {
    if body.contains(['(', ',']) {
        return Err(SpatialError::MalformedWkt(format!(
            "POINT takes a single position, found {:?}",
            body
        )));
    }
    Ok(Geometry::Point(parse_position(body)?))
}

fn parse_multi_polygon(body: &str) -> SpatialResult<Geometry> {
    let polygons = split_top_level_groups(body)?;
    if polygons.is_empty() {
        return Err(SpatialError::MalformedWkt(
            "MULTIPOLYGON has no polygons".to_string(),
        ));
    }
    polygons
        .into_iter()
        .map(|polygon| parse_rings(inner(polygon)))
        .collect::<SpatialResult<Vec<_>>>()
        .map(Geometry::MultiPolygon)
}

fn parse_rings(body: &str) -> SpatialResult<Vec<Ring>> {
    let rings = split_top_level_groups(body)?;
    if rings.is_empty() {
        return Err(SpatialError::MalformedWkt(format!(
            "polygon has no rings in {:?}",
            body
        )));
    }
    rings
        .into_iter()
        .map(|ring| parse_ring(inner(ring)))
        .collect()
}

fn parse_ring(body: &str) -> SpatialResult<Ring> {
    if body.contains('(') {
        return Err(SpatialError::MalformedWkt(format!(
            "unexpected nesting inside ring {:?}",
            body
        )));
    }
    body.split(',').map(parse_position).collect()
}

fn parse_position(pair: &str) -> SpatialResult<Coordinate> {
    let numbers = pair
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    SpatialError::MalformedWkt(format!("{:?} is not a number in {:?}", token, pair))
                })
        })
        .collect::<SpatialResult<Vec<f64>>>()?;

    match numbers.as_slice() {
        [x, y, ..] => Ok(Coordinate::new(*x, *y)),
        _ => Err(SpatialError::MalformedWkt(format!(
            "position needs 2 numbers, found {:?}",
            pair.trim()
        ))),
    }
}

/// Bounding box of a WKT geometry.
pub fn bbox_from_wkt(text: &str) -> SpatialResult<BoundingBox> {
    BoundingBox::from_geometry(&parse_wkt(text)?)
}
