use std::fmt::{self, Display};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::errors::{ErrorKind, StacAsfError, StacAsfResult};
use crate::property::FLIGHT_DIRECTION_FIELD;

/// A coerced value bound to a backend field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ConstraintValue {
    Text(String),
    Integer(i64),
}

impl Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintValue::Text(s) => write!(f, "{}", s),
            ConstraintValue::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for ConstraintValue {
    fn from(value: &str) -> Self {
        ConstraintValue::Text(value.to_string())
    }
}

impl From<i64> for ConstraintValue {
    fn from(value: i64) -> Self {
        ConstraintValue::Integer(value)
    }
}

impl From<i32> for ConstraintValue {
    fn from(value: i32) -> Self {
        ConstraintValue::Integer(value as i64)
    }
}

/// Direction of the satellite pass, in its canonical uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum OrbitState {
    Ascending,
    Descending,
}

impl OrbitState {
    /// Case-insensitive match of `ascending` / `descending`. Surrounding
    /// whitespace is not stripped.
    pub fn parse(value: &str) -> Option<OrbitState> {
        if value.eq_ignore_ascii_case("ascending") {
            Some(OrbitState::Ascending)
        } else if value.eq_ignore_ascii_case("descending") {
            Some(OrbitState::Descending)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitState::Ascending => "ASCENDING",
            OrbitState::Descending => "DESCENDING",
        }
    }
}

impl Display for OrbitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-field query constraints accumulated by the filter compiler.
///
/// List-valued fields keep every value in insertion order, duplicates
/// included, and fields are reported in the order they were first touched.
/// `flightDirection` is single-valued: setting it twice to different states
/// is a conflict.
///
/// # Examples
///
/// ```rust
/// use stac_asf::filter::{ConstraintSet, ConstraintValue, OrbitState};
///
/// let mut constraints = ConstraintSet::new();
/// constraints.push("beamMode", "IW".into());
/// constraints.set_flight_direction(OrbitState::Ascending).unwrap();
///
/// assert_eq!(constraints.values("beamMode"), Some(&[ConstraintValue::from("IW")][..]));
/// assert!(constraints.set_flight_direction(OrbitState::Descending).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintSet {
    #[cfg_attr(feature = "serde", serde(flatten))]
    values: IndexMap<&'static str, Vec<ConstraintValue>>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "flightDirection", skip_serializing_if = "Option::is_none")
    )]
    flight_direction: Option<OrbitState>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to a list-valued field.
    pub fn push(&mut self, field: &'static str, value: ConstraintValue) {
        self.values.entry(field).or_default().push(value);
    }

    /// Sets or reaffirms the orbit direction.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingConstraint` if a different direction is already set.
    pub fn set_flight_direction(&mut self, state: OrbitState) -> StacAsfResult<()> {
        match self.flight_direction {
            Some(existing) if existing != state => Err(StacAsfError::new(
                &format!(
                    "{} is already constrained to {}, cannot also be {}",
                    FLIGHT_DIRECTION_FIELD, existing, state
                ),
                ErrorKind::ConflictingConstraint,
            )),
            _ => {
                self.flight_direction = Some(state);
                Ok(())
            }
        }
    }

    /// Values accumulated for a list-valued field.
    pub fn values(&self, field: &str) -> Option<&[ConstraintValue]> {
        self.values.get(field).map(Vec::as_slice)
    }

    pub fn flight_direction(&self) -> Option<OrbitState> {
        self.flight_direction
    }

    /// Number of constrained backend fields.
    pub fn len(&self) -> usize {
        self.values.len() + usize::from(self.flight_direction.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// List-valued fields in first-touched order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[ConstraintValue])> {
        self.values.iter().map(|(field, values)| (*field, values.as_slice()))
    }

    /// Field → value-list pairs for the query-string builder.
    ///
    /// List-valued fields come first in first-touched order, followed by
    /// `flightDirection` when it is set.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, Vec<String>)> {
        let mut pairs: Vec<(&'static str, Vec<String>)> = self
            .iter()
            .map(|(field, values)| (field, values.iter().map(ToString::to_string).collect()))
            .collect();
        if let Some(state) = self.flight_direction {
            pairs.push((FLIGHT_DIRECTION_FIELD, vec![state.as_str().to_string()]));
        }
        pairs
    }
}

impl Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .to_query_pairs()
            .into_iter()
            .map(|(field, values)| format!("{}=[{}]", field, values.join(", ")))
            .join(", ");
        write!(f, "{{{}}}", pairs)
    }
}
