//! Dashboard Test Suite
//!
//! Cross-crate tests for the response & trials dashboard:
//! - Scenario tests that drive the simulated dashboard and check the
//!   derived figures the engine produces from it
//! - Property-based tests for the engine's numeric guarantees

pub mod scenarios;

// Property-based engine tests
pub mod property_tests;

/// Every finite `f64`, both signs, subnormals included
#[cfg(test)]
pub(crate) fn finite_f64() -> impl proptest::strategy::Strategy<Value = f64> {
    use proptest::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}
