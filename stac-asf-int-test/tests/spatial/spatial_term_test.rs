use serde_json::json;
use stac_asf::errors::{ErrorKind, StacAsfError};
use stac_asf_spatial::{parse_wkt, BoundingBox, SpatialError, SpatialTerm};

#[test]
fn test_bbox_term_to_wkt() {
    let term = SpatialTerm::from_request(Some(&[-122.5, 37.5, -122.0, 38.0]), None)
        .unwrap()
        .unwrap();
    let text = term.to_wkt().unwrap();
    assert_eq!(
        text,
        "POLYGON((-122.5 37.5, -122 37.5, -122 38, -122.5 38, -122.5 37.5))"
    );
    assert_eq!(
        BoundingBox::from_geometry(&parse_wkt(&text).unwrap()).unwrap(),
        BoundingBox::new(-122.5, 37.5, -122.0, 38.0)
    );
}

#[test]
fn test_intersects_term_to_wkt() {
    let intersects = json!({
        "type": "Polygon",
        "coordinates": [
            [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
            [[2, 2], [4, 2], [4, 4], [2, 4], [2, 2]]
        ]
    });
    let term = SpatialTerm::from_request(None, Some(&intersects))
        .unwrap()
        .unwrap();
    assert_eq!(
        term.to_wkt().unwrap(),
        "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 4 2, 4 4, 2 4, 2 2))"
    );
    assert_eq!(term.bounding_box().unwrap().to_array(), [0.0, 0.0, 10.0, 10.0]);
}

#[test]
fn test_ambiguous_request() {
    let intersects = json!({"type": "Point", "coordinates": [0, 0]});
    let err = SpatialTerm::from_request(Some(&[0.0, 0.0, 1.0, 1.0]), Some(&intersects))
        .unwrap_err();
    assert!(matches!(err, SpatialError::AmbiguousSpatialTerm(_)));

    let err: StacAsfError = err.into();
    assert_eq!(err.kind(), &ErrorKind::AmbiguousSpatialTerm);
}

#[test]
fn test_unsupported_intersects_type() {
    let intersects = json!({"type": "GeometryCollection", "geometries": []});
    assert!(matches!(
        SpatialTerm::from_request(None, Some(&intersects)),
        Err(SpatialError::UnsupportedGeometryType(_))
    ));
}

#[test]
fn test_empty_intersects_not_written() {
    let intersects = json!({"type": "Polygon", "coordinates": []});
    let term = SpatialTerm::from_request(None, Some(&intersects))
        .unwrap()
        .unwrap();
    let err = term.to_wkt().unwrap_err();
    assert!(matches!(err, SpatialError::EmptyInput(_)));

    let err: StacAsfError = err.into();
    assert_eq!(err.kind(), &ErrorKind::EmptyInput);
}
