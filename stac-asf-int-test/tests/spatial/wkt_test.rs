use stac_asf::errors::{ErrorKind, StacAsfError};
use stac_asf_int_test::test_util::{
    assert_bbox_close, polygon_with_hole, random_geometry, random_ring,
};
use stac_asf_spatial::{bbox_from_wkt, parse_wkt, to_wkt, BoundingBox, Geometry};

#[test]
fn test_round_trip_keeps_bounding_box() {
    let mut rng = rand::rng();
    for _ in 0..500 {
        let geometry = random_geometry(&mut rng);
        let text = to_wkt(&geometry).unwrap();
        let parsed = parse_wkt(&text).unwrap();

        let expected = BoundingBox::from_geometry(&geometry).unwrap();
        assert_bbox_close(&BoundingBox::from_geometry(&parsed).unwrap(), &expected, 1e-9);
        assert_bbox_close(&bbox_from_wkt(&text).unwrap(), &expected, 1e-9);
        assert_eq!(parsed.kind(), geometry.kind(), "{}", text);
    }
}

#[test]
fn test_polygon_with_hole() {
    let text = to_wkt(&polygon_with_hole()).unwrap();
    assert_eq!(
        text,
        "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 4 2, 4 4, 2 4, 2 2))"
    );
    assert_eq!(text.matches('(').count(), 3);
    assert_eq!(text.matches(')').count(), 3);

    let parsed = parse_wkt(&text).unwrap();
    assert_eq!(parsed.as_polygon().unwrap().len(), 2);
    assert_eq!(parsed, polygon_with_hole());
}

#[test]
fn test_multi_polygon_round_trip() {
    let multi = Geometry::MultiPolygon(vec![
        polygon_with_hole().as_polygon().unwrap().to_vec(),
        BoundingBox::new(20.0, 20.0, 21.5, 22.25)
            .to_polygon()
            .as_polygon()
            .unwrap()
            .to_vec(),
    ]);
    let text = to_wkt(&multi).unwrap();
    assert!(text.starts_with("MULTIPOLYGON((("));
    let parsed = parse_wkt(&text).unwrap();
    assert_eq!(parsed, multi);
    assert_eq!(
        bbox_from_wkt(&text).unwrap(),
        BoundingBox::new(0.0, 0.0, 21.5, 22.25)
    );
}

#[test]
fn test_backend_footprint_text() {
    // formatting as commonly returned by search backends
    let text = "POLYGON ((-118.5 34.1,-117.9 34.1,-117.9 34.6,-118.5 34.6,-118.5 34.1))";
    let bbox = bbox_from_wkt(text).unwrap();
    assert_eq!(bbox.to_array(), [-118.5, 34.1, -117.9, 34.6]);
}

#[test]
fn test_errors_convert_to_core_kinds() {
    let cases = [
        ("", ErrorKind::EmptyInput),
        ("LINESTRING(0 0, 1 1)", ErrorKind::UnsupportedGeometryType),
        ("POLYGON((0 0, 1 1, 0 0)", ErrorKind::MalformedWkt),
        ("POLYGON((0 0, 1 1, 0 0)))", ErrorKind::MalformedWkt),
        ("CIRCLE(0 0, 5)", ErrorKind::MalformedWkt),
    ];
    for (text, kind) in cases {
        let err: StacAsfError = parse_wkt(text).unwrap_err().into();
        assert_eq!(err.kind(), &kind, "{:?}", text);
    }
}

#[test]
fn test_zero_point_ring_stays_empty() {
    let mut rng = rand::rng();
    assert!(random_ring(&mut rng, 0).is_empty());
    let closed = random_ring(&mut rng, 3);
    assert_eq!(closed.len(), 4);
    assert_eq!(closed.first(), closed.last());

    let polygon = Geometry::Polygon(vec![random_ring(&mut rng, 0)]);
    let err: StacAsfError = to_wkt(&polygon).unwrap_err().into();
    assert_eq!(err.kind(), &ErrorKind::EmptyInput);
}
