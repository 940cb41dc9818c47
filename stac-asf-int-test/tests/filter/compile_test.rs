use serde_json::json;
use stac_asf::filter::{property, ConstraintSet, ConstraintValue, FilterExpr, OrbitState};
use stac_asf_int_test::test_util::{and, create_test_context, eq, in_list, or, run_test};

#[test]
fn test_accumulation_across_fields() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = and(vec![
                eq("sar:instrument_mode", json!("IW")),
                eq("sat:orbit_state", json!("ascending")),
                in_list("sat:relative_orbit", json!([10, 20])),
            ]);
            let constraints = ctx.compiler().compile_value(&filter)?;

            assert_eq!(
                constraints.values("beamMode").unwrap(),
                &[ConstraintValue::from("IW")]
            );
            assert_eq!(constraints.flight_direction(), Some(OrbitState::Ascending));
            assert_eq!(
                constraints.values("relativeOrbit").unwrap(),
                &[ConstraintValue::from(10), ConstraintValue::from(20)]
            );
            assert_eq!(
                constraints.to_query_pairs(),
                vec![
                    ("beamMode", vec!["IW".to_string()]),
                    ("relativeOrbit", vec!["10".to_string(), "20".to_string()]),
                    ("flightDirection", vec!["ASCENDING".to_string()]),
                ]
            );
            Ok(())
        },
    )
}

#[test]
fn test_or_accumulates_same_field() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = or(vec![
                eq("sar:instrument_mode", json!("IW")),
                eq("sar:instrument_mode", json!("EW")),
            ]);
            let constraints = ctx.compiler().compile_value(&filter)?;
            assert_eq!(
                constraints.values("beamMode").unwrap(),
                &[ConstraintValue::from("IW"), ConstraintValue::from("EW")]
            );
            assert_eq!(constraints.len(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_cross_field_or_still_accumulates() {
    run_test(
        || create_test_context(),
        |ctx| {
            // the backend has no disjunction across fields; both constraints apply
            let filter = or(vec![
                eq("sar:instrument_mode", json!("IW")),
                eq("platform", json!("Sentinel-1A")),
            ]);
            let constraints = ctx.compiler().compile_value(&filter)?;
            assert_eq!(
                constraints.values("beamMode").unwrap(),
                &[ConstraintValue::from("IW")]
            );
            assert_eq!(
                constraints.values("platform").unwrap(),
                &[ConstraintValue::from("Sentinel-1A")]
            );
            Ok(())
        },
    )
}

#[test]
fn test_nested_membership_and_duplicates() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = and(vec![
                in_list("sar:polarizations", json!(["VV", "VV+VH"])),
                or(vec![
                    eq("sar:polarizations", json!("VV")),
                    in_list("sat:absolute_orbit", json!([12345, 12346.0])),
                ]),
                eq("sar:product_type", json!("GRD_HD")),
            ]);
            let constraints = ctx.compiler().compile_value(&filter)?;
            assert_eq!(
                constraints.values("polarization").unwrap(),
                &[
                    ConstraintValue::from("VV"),
                    ConstraintValue::from("VV+VH"),
                    ConstraintValue::from("VV"),
                ]
            );
            assert_eq!(
                constraints.values("absoluteOrbit").unwrap(),
                &[ConstraintValue::from(12345), ConstraintValue::from(12346)]
            );
            assert_eq!(
                constraints.values("processingLevel").unwrap(),
                &[ConstraintValue::from("GRD_HD")]
            );
            let fields: Vec<_> = constraints.iter().map(|(field, _)| field).collect();
            assert_eq!(fields, vec!["polarization", "absoluteOrbit", "processingLevel"]);
            Ok(())
        },
    )
}

#[test]
fn test_numeric_coercion() {
    run_test(
        || create_test_context(),
        |ctx| {
            let constraints = ctx
                .compiler()
                .compile_value(&eq("sat:relative_orbit", json!(42.0)))?;
            assert_eq!(
                constraints.values("relativeOrbit").unwrap(),
                &[ConstraintValue::Integer(42)]
            );
            Ok(())
        },
    )
}

#[test]
fn test_orbit_state_reaffirmed() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = and(vec![
                eq("sat:orbit_state", json!("DESCENDING")),
                eq("sat:orbit_state", json!("descending")),
            ]);
            let constraints = ctx.compiler().compile_value(&filter)?;
            assert_eq!(constraints.flight_direction(), Some(OrbitState::Descending));
            Ok(())
        },
    )
}

#[test]
fn test_operator_names_case_insensitive() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = json!({
                "op": "AND",
                "args": [
                    {"op": "EQ", "args": [{"property": "platform"}, "Sentinel-1B"]},
                    {"op": "In", "args": [{"property": "sat:relative_orbit"}, [7]]}
                ]
            });
            let constraints = ctx.compiler().compile_value(&filter)?;
            assert_eq!(constraints.len(), 2);
            Ok(())
        },
    )
}

#[test]
fn test_compile_into_existing_set() {
    run_test(
        || create_test_context(),
        |ctx| {
            let mut constraints = ConstraintSet::new();
            let first = ctx.compiler().parse(&eq("sar:instrument_mode", json!("IW")))?;
            let second = property("sar:instrument_mode").eq("EW");
            ctx.compiler().compile(&first, &mut constraints)?;
            ctx.compiler().compile(&second, &mut constraints)?;
            assert_eq!(
                constraints.values("beamMode").unwrap(),
                &[ConstraintValue::from("IW"), ConstraintValue::from("EW")]
            );
            Ok(())
        },
    )
}

#[test]
fn test_fluent_and_json_agree() {
    run_test(
        || create_test_context(),
        |ctx| {
            let fluent = property("sar:instrument_mode")
                .in_list(["IW", "EW"])
                .and(property("sat:orbit_state").eq("ascending"));
            let parsed = FilterExpr::parse(&fluent.to_json())?;
            assert_eq!(parsed, fluent);

            let mut from_fluent = ConstraintSet::new();
            ctx.compiler().compile(&fluent, &mut from_fluent)?;
            let from_json = ctx.compiler().compile_value(&fluent.to_json())?;
            assert_eq!(from_fluent, from_json);
            Ok(())
        },
    )
}
