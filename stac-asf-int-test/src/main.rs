use log::info;
use rand::Rng;
use serde_json::json;
use stac_asf::errors::StacAsfResult;
use stac_asf_int_test::test_util::{and, create_test_context, eq, in_list, or, random_geometry};
use stac_asf_spatial::{bbox_from_wkt, to_wkt};

const MODES: &[&str] = &["IW", "EW", "SM", "WV"];

fn main() -> StacAsfResult<()> {
    colog::init();
    info!("Starting translation stress run...");
    let ctx = create_test_context()?;
    let mut rng = rand::rng();

    let count = 100000;
    let start = std::time::Instant::now();
    let mut values = 0;
    for _ in 0..count {
        let modes = (0..rng.random_range(1..4))
            .map(|_| eq("sar:instrument_mode", json!(MODES[rng.random_range(0..MODES.len())])))
            .collect();
        let orbits: Vec<i64> = (0..rng.random_range(1..10))
            .map(|_| rng.random_range(1..176))
            .collect();
        let filter = and(vec![
            or(modes),
            in_list("sat:relative_orbit", json!(orbits)),
            eq("sat:orbit_state", json!("ascending")),
        ]);
        let constraints = ctx.compiler().compile_value(&filter)?;
        values += constraints.iter().map(|(_, v)| v.len()).sum::<usize>();
    }
    info!(
        "Compiled {} filters ({} values) in {:?}",
        count,
        values,
        start.elapsed()
    );

    let count = 10000;
    let start = std::time::Instant::now();
    for _ in 0..count {
        let geometry = random_geometry(&mut rng);
        let text = to_wkt(&geometry)?;
        bbox_from_wkt(&text)?;
    }
    info!(
        "Round-tripped {} geometries through WKT in {:?}",
        count,
        start.elapsed()
    );

    Ok(())
}
