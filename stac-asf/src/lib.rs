//! # stac_asf - STAC item-search to ASF search translation
//!
//! This crate turns the property filter of a STAC API item search into the
//! flat, field-based query constraints of the ASF search API.
//!
//! ## Key Features
//!
//! - **Validated filter AST**: raw CQL2-like `{op, args}` trees are checked once
//!   and turned into a closed set of node kinds
//! - **Filter compilation**: `=`, `in`, `and` and `or` compile into per-field
//!   value lists, with numeric coercion and orbit-state conflict detection
//! - **Static property table**: STAC extension properties mapped to ASF fields
//! - **Typed errors**: every failure carries an [`errors::ErrorKind`]
//!
//! Geometry conversion (WKT, bounding boxes) lives in the companion
//! `stac_asf_spatial` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use stac_asf::filter::FilterCompiler;
//!
//! # fn main() -> Result<(), stac_asf::errors::StacAsfError> {
//! let compiler = FilterCompiler::default();
//! let constraints = compiler.compile_value(&json!({
//!     "op": "or",
//!     "args": [
//!         {"op": "=", "args": [{"property": "sar:instrument_mode"}, "IW"]},
//!         {"op": "=", "args": [{"property": "sar:instrument_mode"}, "EW"]}
//!     ]
//! }))?;
//!
//! for (field, values) in constraints.to_query_pairs() {
//!     println!("{} = {}", field, values.join(","));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Limits applied while parsing and compiling filters
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Filter AST, compiler and constraint set
//! - [`property`] - STAC property to ASF field mapping

pub mod config;
pub mod errors;
pub mod filter;
pub mod property;

pub use config::CompilerConfig;
pub use errors::{ErrorKind, StacAsfError, StacAsfResult};
pub use filter::{ConstraintSet, ConstraintValue, FilterCompiler, FilterExpr, OrbitState};
pub use property::{PropertyMapping, PropertyResolver, ValueKind};
