//! Geometry codec integration tests.

mod bbox_test;
mod spatial_term_test;
mod wkt_test;
