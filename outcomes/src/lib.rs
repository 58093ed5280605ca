//! # outcomes
//!
//! Records of executed tests and an aggregate view over a set of them, as
//! consumed by aggregate reporting.

pub mod outcome;
pub mod outcomes;
pub mod result;

// Test modules - add any new *_tests.rs files here
#[cfg(test)]
mod outcome_tests;

#[cfg(test)]
mod outcomes_tests;

// Re-export commonly used types
pub use outcome::{TestOutcome, TestStep, TestTag, UserStory};
pub use outcomes::TestOutcomes;
pub use result::{ParseTestResultError, TestResult};
