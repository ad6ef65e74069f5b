//! CLI integration tests.

mod common;
mod plan_tests;
mod validate_tests;
