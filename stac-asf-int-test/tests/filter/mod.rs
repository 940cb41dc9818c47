//! Filter compilation integration tests.
//!
//! These tests drive the compiler from raw JSON filter trees the way a
//! search endpoint would.

mod compile_test;
mod rejection_test;
