use serde_json::json;
use stac_asf_int_test::test_util::random_ring;
use stac_asf_spatial::{BoundingBox, Geometry, SpatialError};

#[test]
fn test_rectangle_identity() {
    let boxes = [
        BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
        BoundingBox::new(0.1, 0.2, 0.3, 0.4),
        BoundingBox::new(-73.99, 40.7, -73.9, 40.8),
        BoundingBox::new(1e-12, -1e-12, 2e-12, 1e-12),
    ];
    for bbox in boxes {
        let polygon = bbox.to_polygon();
        assert_eq!(BoundingBox::from_geometry(&polygon).unwrap(), bbox);
    }
}

#[test]
fn test_bbox_contains_every_position() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let geometry = Geometry::Polygon(vec![random_ring(&mut rng, 12)]);
        let bbox = BoundingBox::from_geometry(&geometry).unwrap();
        for c in geometry.coordinates() {
            assert!(bbox.west <= c.x && c.x <= bbox.east);
            assert!(bbox.south <= c.y && c.y <= bbox.north);
        }
    }
}

#[test]
fn test_bbox_from_json_geometry() {
    let geometry = Geometry::from_json(&json!({
        "type": "MultiPolygon",
        "coordinates": [
            [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
            [[[102.0, 2.0], [103.0, 2.0], [103.0, 3.0], [102.0, 3.0], [102.0, 2.0]]]
        ]
    }))
    .unwrap();
    assert_eq!(
        BoundingBox::from_geometry(&geometry).unwrap().to_array(),
        [100.0, 0.0, 103.0, 3.0]
    );

    let line = Geometry::from_json(&json!({
        "type": "LineString",
        "coordinates": [[-5.0, 10.0], [5.0, -10.0, 250.0]]
    }))
    .unwrap();
    assert_eq!(
        BoundingBox::from_geometry(&line).unwrap().to_array(),
        [-5.0, -10.0, 5.0, 10.0]
    );
}

#[test]
fn test_empty_geometry_has_no_bbox() {
    let empty = Geometry::from_json(&json!({"type": "Polygon", "coordinates": []})).unwrap();
    assert!(matches!(
        BoundingBox::from_geometry(&empty),
        Err(SpatialError::NoValidCoordinates(_))
    ));
}

#[test]
fn test_request_bbox_forms() {
    assert_eq!(
        BoundingBox::from_slice(&[-10.0, -5.0, 10.0, 5.0]).unwrap(),
        BoundingBox::new(-10.0, -5.0, 10.0, 5.0)
    );
    assert_eq!(
        BoundingBox::from_slice(&[-10.0, -5.0, 0.0, 10.0, 5.0, 100.0]).unwrap(),
        BoundingBox::new(-10.0, -5.0, 10.0, 5.0)
    );
    assert!(matches!(
        BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]),
        Err(SpatialError::MalformedCoordinates(_))
    ));
    assert!(matches!(
        BoundingBox::from_slice(&[f64::INFINITY, 2.0, 3.0, 4.0]),
        Err(SpatialError::MalformedCoordinates(_))
    ));
}
