use log::{debug, trace, warn};
use serde_json::Value;

use crate::config::CompilerConfig;
use crate::errors::{ErrorKind, StacAsfError, StacAsfResult};
use crate::property::{PropertyMapping, PropertyResolver, ValueKind};

use super::{ConstraintSet, ConstraintValue, FilterExpr, Literal, OrbitState};

/// Compiles filter expressions into flat per-field constraints.
///
/// The backend only understands conjunctive equality/membership per field,
/// so every comparison is resolved through the [`PropertyResolver`], coerced
/// to the field's value kind and appended to a shared [`ConstraintSet`].
///
/// `or` accumulates exactly like `and`: repeated values on one field are an
/// implicit OR on the backend. An `or` spanning several fields cannot be
/// expressed that way; it is still compiled by accumulation and a warning is
/// logged.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use stac_asf::filter::{FilterCompiler, OrbitState};
///
/// let compiler = FilterCompiler::default();
/// let constraints = compiler
///     .compile_value(&json!({
///         "op": "and",
///         "args": [
///             {"op": "=", "args": [{"property": "sar:instrument_mode"}, "IW"]},
///             {"op": "=", "args": [{"property": "sat:orbit_state"}, "ascending"]}
///         ]
///     }))
///     .unwrap();
///
/// assert_eq!(constraints.flight_direction(), Some(OrbitState::Ascending));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    config: CompilerConfig,
}

impl FilterCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        FilterCompiler { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Parses a raw filter tree with this compiler's limits.
    pub fn parse(&self, value: &Value) -> StacAsfResult<FilterExpr> {
        FilterExpr::parse_with(value, &self.config)
    }

    /// Compiles `expr` into `constraints`.
    ///
    /// Fails fast on the first error, in which case `constraints` is left
    /// exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// * `UnsupportedProperty` - a property has no backend mapping
    /// * `UnsupportedOperator` - `in` targets a single-valued field
    /// * `TypeCoercionError` - a literal does not fit the field's value kind
    /// * `UnsupportedValue` - an orbit state is neither ascending nor descending
    /// * `ConflictingConstraint` - two different orbit states were requested
    /// * `MalformedFilter` - the expression nests deeper than allowed, has an
    ///   empty `and`/`or`/`in`, or an `in` list longer than allowed
    pub fn compile(&self, expr: &FilterExpr, constraints: &mut ConstraintSet) -> StacAsfResult<()> {
        debug!("Compiling filter {}", expr);
        let mut scratch = constraints.clone();
        if let Err(err) = self.apply(expr, &mut scratch, 1) {
            debug!("Filter compilation failed: {}", err);
            return Err(err);
        }
        *constraints = scratch;
        debug!("Compiled filter into {}", constraints);
        Ok(())
    }

    /// Parses and compiles a raw filter tree into a fresh constraint set.
    pub fn compile_value(&self, value: &Value) -> StacAsfResult<ConstraintSet> {
        let expr = self.parse(value)?;
        let mut constraints = ConstraintSet::new();
        self.compile(&expr, &mut constraints)?;
        Ok(constraints)
    }

    fn apply(&self, expr: &FilterExpr, set: &mut ConstraintSet, depth: usize) -> StacAsfResult<()> {
        if depth > self.config.max_depth() {
            return Err(malformed(&format!(
                "filter nesting exceeds the maximum depth of {}",
                self.config.max_depth()
            )));
        }
        trace!("Applying filter node {}", expr);

        match expr {
            FilterExpr::Comparison {
                property, value, ..
            } => {
                let mapping = PropertyResolver::resolve(property)?;
                if mapping.kind == ValueKind::OrbitState {
                    set.set_flight_direction(orbit_state(mapping, value)?)
                } else {
                    set.push(mapping.field, coerce(mapping, value)?);
                    Ok(())
                }
            }
            FilterExpr::Membership { property, values } => {
                if values.is_empty() {
                    return Err(malformed(&format!("'in' on '{}' needs at least one value", property)));
                }
                if values.len() > self.config.max_list_values() {
                    return Err(malformed(&format!(
                        "'in' list has {} values, the maximum is {}",
                        values.len(),
                        self.config.max_list_values()
                    )));
                }
                let mapping = PropertyResolver::resolve(property)?;
                if !mapping.kind.accepts_membership() {
                    return Err(StacAsfError::new(
                        &format!(
                            "'in' is not supported for '{}' ({} field {})",
                            property, mapping.kind, mapping.field
                        ),
                        ErrorKind::UnsupportedOperator,
                    ));
                }
                for value in values {
                    set.push(mapping.field, coerce(mapping, value)?);
                }
                Ok(())
            }
            FilterExpr::And(children) | FilterExpr::Or(children) if children.is_empty() => {
                Err(malformed("'and'/'or' needs at least one operand"))
            }
            FilterExpr::And(children) => {
                for child in children {
                    self.apply(child, set, depth + 1)?;
                }
                Ok(())
            }
            FilterExpr::Or(children) => {
                let mut fields = Vec::new();
                for child in children {
                    touched_fields(child, &mut fields);
                }
                if fields.len() > 1 {
                    warn!(
                        "'or' across fields [{}] is compiled as a conjunction of per-field lists",
                        fields.join(", ")
                    );
                }
                for child in children {
                    self.apply(child, set, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Collects the distinct backend fields a subtree constrains, in first-seen order.
fn touched_fields(expr: &FilterExpr, fields: &mut Vec<&'static str>) {
    match expr {
        FilterExpr::Comparison { property, .. } | FilterExpr::Membership { property, .. } => {
            if let Some(mapping) = PropertyResolver::lookup(property) {
                if !fields.contains(&mapping.field) {
                    fields.push(mapping.field);
                }
            }
        }
        FilterExpr::And(children) | FilterExpr::Or(children) => {
            for child in children {
                touched_fields(child, fields);
            }
        }
    }
}

fn orbit_state(mapping: &PropertyMapping, literal: &Literal) -> StacAsfResult<OrbitState> {
    match literal {
        Literal::String(s) => OrbitState::parse(s).ok_or_else(|| {
            StacAsfError::new(
                &format!(
                    "'{}' is not a valid value for '{}', expected ascending or descending",
                    s, mapping.property
                ),
                ErrorKind::UnsupportedValue,
            )
        }),
        other => Err(coercion_error(mapping, other)),
    }
}

fn coerce(mapping: &PropertyMapping, literal: &Literal) -> StacAsfResult<ConstraintValue> {
    match (mapping.kind, literal) {
        (ValueKind::String | ValueKind::StringSet, Literal::String(s)) => {
            Ok(ConstraintValue::Text(s.clone()))
        }
        (ValueKind::IntSet, Literal::Integer(i)) => Ok(ConstraintValue::Integer(*i)),
        (ValueKind::IntSet, Literal::Float(f)) if is_integral(*f) => {
            Ok(ConstraintValue::Integer(*f as i64))
        }
        (_, other) => Err(coercion_error(mapping, other)),
    }
}

fn is_integral(value: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which no longer fits
    value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

fn malformed(message: &str) -> StacAsfError {
    StacAsfError::new(message, ErrorKind::MalformedFilter)
}

fn coercion_error(mapping: &PropertyMapping, literal: &Literal) -> StacAsfError {
    StacAsfError::new(
        &format!(
            "value {} ({}) for '{}' cannot be coerced to {}",
            literal,
            literal.type_name(),
            mapping.property,
            mapping.kind
        ),
        ErrorKind::TypeCoercionError,
    )
}
