//! The record of one executed test.

use serde::{Deserialize, Serialize};

use crate::result::TestResult;

/// The user story (or feature) a test belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A free-form label attached to a test, e.g. `feature: checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestTag {
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: String,
}

/// One step of a test, possibly grouping nested steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    pub description: String,
    pub result: TestResult,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TestStep>,
}

impl TestStep {
    /// Number of leaf steps under (and including) this step.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(TestStep::leaf_count).sum()
        }
    }
}

/// The persisted result of one executed test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Human-readable test title.
    pub title: String,
    /// Name of the test method or scenario.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_story: Option<UserStory>,
    pub result: TestResult,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TestTag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<TestStep>,
}

impl TestOutcome {
    /// Create an outcome with no story, tags or steps.
    #[must_use]
    pub fn new(title: impl Into<String>, name: impl Into<String>, result: TestResult) -> Self {
        Self {
            title: title.into(),
            name: name.into(),
            user_story: None,
            result,
            duration_ms: 0,
            tags: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Whether the test passed.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.result == TestResult::Success
    }

    /// Number of leaf steps executed by this test.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.iter().map(TestStep::leaf_count).sum()
    }

    /// Whether a tag with this name is attached (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Name of the user story, or the empty string when there is none.
    #[must_use]
    pub fn story_name(&self) -> &str {
        self.user_story.as_ref().map_or("", |s| s.name.as_str())
    }
}
