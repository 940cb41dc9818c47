use rand::Rng;
use serde_json::{json, Value};
use stac_asf::errors::{ErrorKind, StacAsfError, StacAsfResult};
use stac_asf::{CompilerConfig, FilterCompiler};
use stac_asf_spatial::{BoundingBox, Coordinate, Geometry, Ring};

/// Runs a test body against a freshly built context.
///
/// Errors are reported with their full `Debug` form, which includes the
/// cause chain or the backtrace captured where the error was raised.
pub fn run_test<B, T>(before: B, test: T)
where
    B: Fn() -> StacAsfResult<TestContext>,
    T: Fn(TestContext) -> StacAsfResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };
    if let Err(e) = test(ctx) {
        panic!("Test failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    compiler: FilterCompiler,
}

impl TestContext {
    pub fn new(compiler: FilterCompiler) -> Self {
        Self { compiler }
    }

    pub fn compiler(&self) -> &FilterCompiler {
        &self.compiler
    }
}

pub fn create_test_context() -> StacAsfResult<TestContext> {
    Ok(TestContext::new(FilterCompiler::default()))
}

/// A context whose compiler uses tight limits.
pub fn create_limited_test_context(max_depth: usize, max_list_values: usize) -> StacAsfResult<TestContext> {
    let config = CompilerConfig::builder()
        .max_depth(max_depth)
        .max_list_values(max_list_values)
        .build();
    Ok(TestContext::new(FilterCompiler::new(config)))
}

/// Fails unless `result` is an error of the given kind.
pub fn expect_error<T: std::fmt::Debug>(result: StacAsfResult<T>, kind: ErrorKind) -> StacAsfResult<StacAsfError> {
    match result {
        Err(e) if e.kind() == &kind => Ok(e),
        Err(e) => Err(StacAsfError::new_with_cause(
            &format!("expected a {} error", kind),
            ErrorKind::InternalError,
            e,
        )),
        Ok(v) => Err(StacAsfError::new(
            &format!("expected a {} error, got {:?}", kind, v),
            ErrorKind::InternalError,
        )),
    }
}

// raw filter tree builders

pub fn eq(property: &str, value: Value) -> Value {
    json!({"op": "=", "args": [{"property": property}, value]})
}

pub fn in_list(property: &str, values: Value) -> Value {
    json!({"op": "in", "args": [{"property": property}, values]})
}

pub fn and(args: Vec<Value>) -> Value {
    json!({"op": "and", "args": args})
}

pub fn or(args: Vec<Value>) -> Value {
    json!({"op": "or", "args": args})
}

/// A square with a square hole.
pub fn polygon_with_hole() -> Geometry {
    Geometry::Polygon(vec![
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]),
    ])
}

pub fn ring(points: &[(f64, f64)]) -> Ring {
    points.iter().map(|(x, y)| Coordinate::new(*x, *y)).collect()
}

/// A random closed ring of `n + 1` positions within lon/lat bounds.
pub fn random_ring<R: Rng>(rng: &mut R, n: usize) -> Ring {
    let mut ring: Ring = (0..n)
        .map(|_| {
            Coordinate::new(
                rng.random_range(-180.0..180.0),
                rng.random_range(-90.0..90.0),
            )
        })
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

/// A random point, polygon or multi-polygon.
pub fn random_geometry<R: Rng>(rng: &mut R) -> Geometry {
    match rng.random_range(0..3) {
        0 => Geometry::point(rng.random_range(-180.0..180.0), rng.random_range(-90.0..90.0)),
        1 => {
            let holes = rng.random_range(0..3);
            let outer = rng.random_range(3..20);
            Geometry::Polygon((0..=holes).map(|_| random_ring(rng, outer)).collect())
        }
        _ => {
            let parts = rng.random_range(1..5);
            Geometry::MultiPolygon(
                (0..parts)
                    .map(|_| vec![random_ring(rng, 4)])
                    .collect(),
            )
        }
    }
}

pub fn assert_bbox_close(actual: &BoundingBox, expected: &BoundingBox, eps: f64) {
    let pairs = actual.to_array().into_iter().zip(expected.to_array());
    for (a, e) in pairs {
        assert!((a - e).abs() <= eps, "{} differs from {} beyond {}", actual, expected, eps);
    }
}
