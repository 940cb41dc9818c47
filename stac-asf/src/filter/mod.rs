//! Compilation of STAC filter trees into ASF search constraints.
//!
//! A filter arrives as a CQL2-like JSON tree of `{"op": ..., "args": [...]}`
//! nodes. It is validated once into a [`FilterExpr`] and then compiled by the
//! [`FilterCompiler`] into a [`ConstraintSet`]: backend field → ordered list
//! of values.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use stac_asf::filter::{ConstraintValue, FilterCompiler, OrbitState};
//!
//! let constraints = FilterCompiler::default()
//!     .compile_value(&json!({
//!         "op": "and",
//!         "args": [
//!             {"op": "=", "args": [{"property": "sar:instrument_mode"}, "IW"]},
//!             {"op": "=", "args": [{"property": "sat:orbit_state"}, "ascending"]},
//!             {"op": "in", "args": [{"property": "sat:relative_orbit"}, [10, 20]]}
//!         ]
//!     }))
//!     .unwrap();
//!
//! assert_eq!(constraints.values("beamMode").unwrap(), &[ConstraintValue::from("IW")]);
//! assert_eq!(constraints.flight_direction(), Some(OrbitState::Ascending));
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: `=`, `eq`
//! - **Membership**: `in`
//! - **Logical**: `and`, `or` (`or` accumulates per field like `and`)

mod compiler;
mod constraints;
mod expr;
mod fluent;

pub use compiler::*;
pub use constraints::*;
pub use expr::*;
pub use fluent::*;
