use serde_json::json;
use stac_asf::errors::ErrorKind;
use stac_asf::filter::{self, property, ConstraintSet, ConstraintValue, FilterExpr};
use stac_asf_int_test::test_util::{and, create_test_context, eq, expect_error, in_list, run_test};

#[test]
fn test_conflicting_orbit_states() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = and(vec![
                eq("sat:orbit_state", json!("ascending")),
                eq("sat:orbit_state", json!("descending")),
            ]);
            let err = expect_error(
                ctx.compiler().compile_value(&filter),
                ErrorKind::ConflictingConstraint,
            )?;
            assert!(err.message().contains("flightDirection"));
            Ok(())
        },
    )
}

#[test]
fn test_unsupported_operator() {
    run_test(
        || create_test_context(),
        |ctx| {
            let filter = json!({
                "op": "like",
                "args": [{"property": "platform"}, "Sentinel%"]
            });
            expect_error(
                ctx.compiler().compile_value(&filter),
                ErrorKind::UnsupportedOperator,
            )?;

            let nested = and(vec![
                eq("platform", json!("Sentinel-1A")),
                json!({"op": "between", "args": [{"property": "sat:relative_orbit"}, 1, 5]}),
            ]);
            expect_error(
                ctx.compiler().compile_value(&nested),
                ErrorKind::UnsupportedOperator,
            )?;
            Ok(())
        },
    )
}

#[test]
fn test_unsupported_property() {
    run_test(
        || create_test_context(),
        |ctx| {
            let err = expect_error(
                ctx.compiler().compile_value(&eq("unknown:property", json!("x"))),
                ErrorKind::UnsupportedProperty,
            )?;
            assert!(err.message().contains("unknown:property"));
            assert!(err.message().contains("sar:instrument_mode"));
            Ok(())
        },
    )
}

#[test]
fn test_in_requires_list() {
    run_test(
        || create_test_context(),
        |ctx| {
            expect_error(
                ctx.compiler()
                    .compile_value(&in_list("sar:instrument_mode", json!("IW"))),
                ErrorKind::MalformedFilter,
            )?;
            Ok(())
        },
    )
}

#[test]
fn test_in_on_single_valued_fields() {
    run_test(
        || create_test_context(),
        |ctx| {
            expect_error(
                ctx.compiler()
                    .compile_value(&in_list("sat:orbit_state", json!(["ascending"]))),
                ErrorKind::UnsupportedOperator,
            )?;
            expect_error(
                ctx.compiler()
                    .compile_value(&in_list("sar:product_type", json!(["GRD_HD", "SLC"]))),
                ErrorKind::UnsupportedOperator,
            )?;
            Ok(())
        },
    )
}

#[test]
fn test_type_coercion_errors() {
    run_test(
        || create_test_context(),
        |ctx| {
            let compiler = ctx.compiler();
            expect_error(
                compiler.compile_value(&eq("sat:relative_orbit", json!("42"))),
                ErrorKind::TypeCoercionError,
            )?;
            expect_error(
                compiler.compile_value(&eq("sat:relative_orbit", json!(42.5))),
                ErrorKind::TypeCoercionError,
            )?;
            expect_error(
                compiler.compile_value(&eq("sar:instrument_mode", json!(7))),
                ErrorKind::TypeCoercionError,
            )?;
            expect_error(
                compiler.compile_value(&eq("sat:orbit_state", json!(true))),
                ErrorKind::TypeCoercionError,
            )?;
            expect_error(
                compiler.compile_value(&eq("sat:orbit_state", json!("sideways"))),
                ErrorKind::UnsupportedValue,
            )?;
            Ok(())
        },
    )
}

#[test]
fn test_malformed_trees() {
    run_test(
        || create_test_context(),
        |ctx| {
            let cases = vec![
                json!("sar:instrument_mode = IW"),
                json!({"args": []}),
                json!({"op": "and"}),
                json!({"op": "and", "args": []}),
                json!({"op": "=", "args": [{"property": "platform"}]}),
                json!({"op": "=", "args": ["platform", "Sentinel-1A"]}),
                json!({"op": "=", "args": [{"property": "platform"}, {"nested": true}]}),
                json!({"op": "in", "args": [{"property": "platform"}, [["a"]]]}),
            ];
            for case in cases {
                expect_error(ctx.compiler().compile_value(&case), ErrorKind::MalformedFilter)?;
            }
            expect_error(
                FilterExpr::from_json_str("{\"op\": \"=\", "),
                ErrorKind::MalformedFilter,
            )?;
            Ok(())
        },
    )
}

#[test]
fn test_failed_compile_leaves_set_untouched() {
    run_test(
        || create_test_context(),
        |ctx| {
            let mut constraints = ConstraintSet::new();
            let first = ctx.compiler().parse(&eq("sar:instrument_mode", json!("IW")))?;
            ctx.compiler().compile(&first, &mut constraints)?;

            let failing = ctx.compiler().parse(&and(vec![
                eq("sar:instrument_mode", json!("EW")),
                eq("sat:relative_orbit", json!("not a number")),
            ]))?;
            expect_error(
                ctx.compiler().compile(&failing, &mut constraints),
                ErrorKind::TypeCoercionError,
            )?;
            assert_eq!(
                constraints.values("beamMode").unwrap(),
                &[ConstraintValue::from("IW")]
            );
            assert_eq!(constraints.len(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_empty_nodes_rejected() {
    run_test(
        || create_test_context(),
        |ctx| {
            expect_error(
                ctx.compiler()
                    .compile_value(&in_list("sat:relative_orbit", json!([]))),
                ErrorKind::MalformedFilter,
            )?;

            let mut constraints = ConstraintSet::new();
            let built = vec![
                filter::and(vec![]),
                filter::or(vec![]),
                property("sat:relative_orbit").in_list(Vec::<i64>::new()),
            ];
            for expr in built {
                expect_error(
                    ctx.compiler().compile(&expr, &mut constraints),
                    ErrorKind::MalformedFilter,
                )?;
            }
            assert!(constraints.is_empty());
            Ok(())
        },
    )
}
