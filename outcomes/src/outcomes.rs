//! Aggregate view over a loaded set of test outcomes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::outcome::TestOutcome;
use crate::result::TestResult;

/// An immutable, ordered set of test outcomes with summary queries.
///
/// The wrapped outcomes keep the order they were loaded in. Filtering
/// operations return a new `TestOutcomes` and never touch the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestOutcomes {
    outcomes: Box<[TestOutcome]>,
}

impl TestOutcomes {
    /// Wrap a collection of outcomes.
    #[must_use]
    pub fn of(outcomes: impl Into<Box<[TestOutcome]>>) -> Self {
        Self {
            outcomes: outcomes.into(),
        }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestOutcome> {
        self.outcomes.iter()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes with exactly this result.
    #[must_use]
    pub fn count(&self, result: TestResult) -> usize {
        self.outcomes.iter().filter(|o| o.result == result).count()
    }

    #[must_use]
    pub fn successful_count(&self) -> usize {
        self.count(TestResult::Success)
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(TestResult::Failure)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(TestResult::Error)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.count(TestResult::Pending)
    }

    /// Skipped and ignored tests together.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(TestResult::Skipped) + self.count(TestResult::Ignored)
    }

    /// Sum of all outcome durations, in milliseconds.
    #[must_use]
    pub fn total_duration_ms(&self) -> u64 {
        self.outcomes
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.duration_ms))
    }

    /// Total number of leaf steps across all outcomes.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.outcomes.iter().map(TestOutcome::step_count).sum()
    }

    /// The dominating result of the whole set (`Undefined` when empty).
    #[must_use]
    pub fn overall_result(&self) -> TestResult {
        TestResult::overall(self.outcomes.iter().map(|o| o.result))
    }

    /// Outcomes with the given result, in load order.
    #[must_use]
    pub fn with_result(&self, result: TestResult) -> TestOutcomes {
        self.filtered(|o| o.result == result)
    }

    /// Outcomes carrying a tag with the given name, in load order.
    #[must_use]
    pub fn with_tag(&self, name: &str) -> TestOutcomes {
        self.filtered(|o| o.has_tag(name))
    }

    /// Outcomes grouped by user story name.
    ///
    /// Outcomes without a story are grouped under the empty name. Within a
    /// group the load order is kept.
    #[must_use]
    pub fn by_user_story(&self) -> BTreeMap<String, Vec<&TestOutcome>> {
        let mut groups: BTreeMap<String, Vec<&TestOutcome>> = BTreeMap::new();
        for outcome in self.outcomes() {
            groups
                .entry(outcome.story_name().to_owned())
                .or_default()
                .push(outcome);
        }
        groups
    }

    fn filtered(&self, keep: impl Fn(&TestOutcome) -> bool) -> TestOutcomes {
        TestOutcomes::of(
            self.outcomes
                .iter()
                .filter(|o| keep(o))
                .cloned()
                .collect::<Box<[_]>>(),
        )
    }
}

impl<'a> IntoIterator for &'a TestOutcomes {
    type Item = &'a TestOutcome;
    type IntoIter = std::slice::Iter<'a, TestOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
