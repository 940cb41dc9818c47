use std::fmt::{self, Display};

use itertools::Itertools;
use serde_json::{json, Value};

use crate::config::CompilerConfig;
use crate::errors::{ErrorKind, StacAsfError, StacAsfResult};

/// A scalar literal appearing as an operator argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    /// Reads a scalar JSON value; `None` for null, arrays and objects.
    fn from_json(value: &Value) -> Option<Literal> {
        match value {
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Literal::Integer(i)),
                // u64 above i64::MAX ends up here too and fails coercion later
                None => n.as_f64().map(Literal::Float),
            },
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Integer(i) => json!(i),
            Literal::Float(f) => json!(f),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }

    /// Short name of the literal's JSON type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "boolean",
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value as i64)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// Comparison operators that bind a property to one literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equals,
}

/// Operator names accepted in the `op` member of a filter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Equals,
    In,
    And,
    Or,
}

impl Operator {
    fn from_name(name: &str) -> Option<Operator> {
        match name.to_ascii_lowercase().as_str() {
            "=" | "eq" => Some(Operator::Equals),
            "in" => Some(Operator::In),
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            _ => None,
        }
    }
}

/// A validated filter expression.
///
/// Built once from the raw `{"op": ..., "args": [...]}` tree by
/// [`FilterExpr::parse`]; consumers match over this closed set of node kinds
/// instead of re-checking JSON shape.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use stac_asf::filter::FilterExpr;
///
/// let expr = FilterExpr::parse(&json!({
///     "op": "in",
///     "args": [{"property": "sat:relative_orbit"}, [10, 20]]
/// })).unwrap();
/// assert_eq!(expr.to_string(), "(sat:relative_orbit in [10, 20])");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Comparison {
        op: ComparisonOp,
        property: String,
        value: Literal,
    },
    /// `values` is never empty once compiled; an empty list is rejected
    /// rather than read as "no constraint".
    Membership {
        property: String,
        values: Vec<Literal>,
    },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Parses a raw filter tree using the default limits.
    ///
    /// # Errors
    ///
    /// * `MalformedFilter` - the tree does not have the expected shape
    /// * `UnsupportedOperator` - an `op` name is not recognized
    pub fn parse(value: &Value) -> StacAsfResult<FilterExpr> {
        Self::parse_with(value, &CompilerConfig::default())
    }

    /// Parses a raw filter tree, enforcing the limits of `config`.
    pub fn parse_with(value: &Value, config: &CompilerConfig) -> StacAsfResult<FilterExpr> {
        Parser { config }.node(value, 1)
    }

    /// Parses a filter tree from its JSON text.
    pub fn from_json_str(text: &str) -> StacAsfResult<FilterExpr> {
        let value: Value = serde_json::from_str(text)?;
        Self::parse(&value)
    }

    /// Renders the expression back to the `{op, args}` tree.
    pub fn to_json(&self) -> Value {
        match self {
            FilterExpr::Comparison {
                op: ComparisonOp::Equals,
                property,
                value,
            } => json!({"op": "=", "args": [{"property": property}, value.to_json()]}),
            FilterExpr::Membership { property, values } => {
                let values: Vec<Value> = values.iter().map(Literal::to_json).collect();
                json!({"op": "in", "args": [{"property": property}, values]})
            }
            FilterExpr::And(children) => {
                let args: Vec<Value> = children.iter().map(FilterExpr::to_json).collect();
                json!({"op": "and", "args": args})
            }
            FilterExpr::Or(children) => {
                let args: Vec<Value> = children.iter().map(FilterExpr::to_json).collect();
                json!({"op": "or", "args": args})
            }
        }
    }
}

impl Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::Comparison {
                op: ComparisonOp::Equals,
                property,
                value,
            } => write!(f, "({} = {})", property, value),
            FilterExpr::Membership { property, values } => {
                write!(f, "({} in [{}])", property, values.iter().join(", "))
            }
            FilterExpr::And(children) => write!(f, "({})", children.iter().join(" and ")),
            FilterExpr::Or(children) => write!(f, "({})", children.iter().join(" or ")),
        }
    }
}

struct Parser<'a> {
    config: &'a CompilerConfig,
}

impl Parser<'_> {
    fn node(&self, value: &Value, depth: usize) -> StacAsfResult<FilterExpr> {
        if depth > self.config.max_depth() {
            return Err(malformed(&format!(
                "filter nesting exceeds the maximum depth of {}",
                self.config.max_depth()
            )));
        }

        let object = value
            .as_object()
            .ok_or_else(|| malformed(&format!("expected a filter node, found {}", value)))?;
        let op_name = object
            .get("op")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("filter node is missing a string 'op'"))?;
        let args = object
            .get("args")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                malformed(&format!("filter node '{}' is missing an 'args' list", op_name))
            })?;

        let operator = Operator::from_name(op_name).ok_or_else(|| {
            StacAsfError::new(
                &format!("operator '{}' is not supported", op_name),
                ErrorKind::UnsupportedOperator,
            )
        })?;

        match operator {
            Operator::Equals => {
                let (property, operand) = binary_args(op_name, args)?;
                let value = Literal::from_json(operand).ok_or_else(|| {
                    malformed(&format!(
                        "'{}' expects a scalar literal, found {}",
                        op_name, operand
                    ))
                })?;
                Ok(FilterExpr::Comparison {
                    op: ComparisonOp::Equals,
                    property,
                    value,
                })
            }
            Operator::In => {
                let (property, operand) = binary_args(op_name, args)?;
                let items = operand.as_array().ok_or_else(|| {
                    malformed(&format!("'in' expects a list of literals, found {}", operand))
                })?;
                if items.is_empty() {
                    return Err(malformed("'in' needs at least one value"));
                }
                if items.len() > self.config.max_list_values() {
                    return Err(malformed(&format!(
                        "'in' list has {} values, the maximum is {}",
                        items.len(),
                        self.config.max_list_values()
                    )));
                }
                let values = items
                    .iter()
                    .map(|item| {
                        Literal::from_json(item).ok_or_else(|| {
                            malformed(&format!("'in' list holds a non-scalar value {}", item))
                        })
                    })
                    .collect::<StacAsfResult<Vec<_>>>()?;
                Ok(FilterExpr::Membership { property, values })
            }
            Operator::And | Operator::Or => {
                if args.is_empty() {
                    return Err(malformed(&format!(
                        "'{}' needs at least one operand",
                        op_name
                    )));
                }
                let children = args
                    .iter()
                    .map(|child| self.node(child, depth + 1))
                    .collect::<StacAsfResult<Vec<_>>>()?;
                if operator == Operator::And {
                    Ok(FilterExpr::And(children))
                } else {
                    Ok(FilterExpr::Or(children))
                }
            }
        }
    }
}

fn binary_args<'v>(op_name: &str, args: &'v [Value]) -> StacAsfResult<(String, &'v Value)> {
    if args.len() != 2 {
        return Err(malformed(&format!(
            "'{}' expects exactly 2 arguments, found {}",
            op_name,
            args.len()
        )));
    }
    let property = property_ref(&args[0]).ok_or_else(|| {
        malformed(&format!(
            "first argument of '{}' must be a property reference, found {}",
            op_name, args[0]
        ))
    })?;
    Ok((property, &args[1]))
}

fn property_ref(value: &Value) -> Option<String> {
    value
        .as_object()
        .and_then(|o| o.get("property"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn malformed(message: &str) -> StacAsfError {
    StacAsfError::new(message, ErrorKind::MalformedFilter)
}
