//! Shared fixtures for the stac_asf integration tests.

pub mod test_util;
