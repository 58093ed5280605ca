//! Test result values and their precedence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a single test or test step.
///
/// Variants are declared in increasing order of precedence: when several
/// results are combined, the greatest one wins (see [`TestResult::overall`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestResult {
    /// No result was recorded.
    #[default]
    Undefined,
    /// The test was deliberately ignored.
    Ignored,
    /// The test was skipped because an earlier step failed.
    Skipped,
    /// The test passed.
    Success,
    /// The test is not implemented yet.
    Pending,
    /// An assertion failed.
    Failure,
    /// The test raised an unexpected error.
    Error,
}

/// Error returned when a result name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown test result: '{name}'")]
pub struct ParseTestResultError {
    /// The rejected name, as given.
    pub name: String,
}

impl TestResult {
    /// All variants, in precedence order.
    pub const ALL: [TestResult; 7] = [
        TestResult::Undefined,
        TestResult::Ignored,
        TestResult::Skipped,
        TestResult::Success,
        TestResult::Pending,
        TestResult::Failure,
        TestResult::Error,
    ];

    /// Upper-case name used in persisted reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TestResult::Undefined => "UNDEFINED",
            TestResult::Ignored => "IGNORED",
            TestResult::Skipped => "SKIPPED",
            TestResult::Success => "SUCCESS",
            TestResult::Pending => "PENDING",
            TestResult::Failure => "FAILURE",
            TestResult::Error => "ERROR",
        }
    }

    /// Combine a sequence of results into the one that dominates.
    ///
    /// Returns `Undefined` for an empty sequence.
    pub fn overall<I>(results: I) -> TestResult
    where
        I: IntoIterator<Item = TestResult>,
    {
        results.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestResult {
    type Err = ParseTestResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        TestResult::ALL
            .into_iter()
            .find(|r| r.as_str() == upper)
            .ok_or_else(|| ParseTestResultError { name: s.to_owned() })
    }
}
