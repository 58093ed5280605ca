//! JSON outcome reader.
//!
//! A report is a single JSON object with camelCase keys:
//!
//! ```json
//! {
//!   "title": "Should log in",
//!   "methodName": "should_log_in",
//!   "userStory": { "id": "accounts.Login", "storyName": "Login" },
//!   "result": "SUCCESS",
//!   "duration": 120,
//!   "tags": [{ "name": "smoke", "type": "tag" }],
//!   "testSteps": [{ "description": "open page", "result": "SUCCESS", "duration": 40 }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use outcomes::{TestOutcome, TestStep, TestTag, UserStory};

use crate::config::OutcomeFormat;
use crate::error::{LoadError, LoadErrorKind};
use crate::format::OutcomeReader;

/// Reads outcomes persisted as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutcomeReader;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutcome {
    title: String,
    method_name: String,
    #[serde(default)]
    user_story: Option<JsonUserStory>,
    result: String,
    #[serde(default)]
    duration: u64,
    #[serde(default)]
    tags: Vec<JsonTag>,
    #[serde(default)]
    test_steps: Vec<JsonStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonUserStory {
    id: String,
    story_name: String,
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonTag {
    name: String,
    #[serde(rename = "type", default)]
    tag_type: String,
}

#[derive(Debug, Deserialize)]
struct JsonStep {
    description: String,
    result: String,
    #[serde(default)]
    duration: u64,
    #[serde(default)]
    children: Vec<JsonStep>,
}

impl JsonStep {
    fn into_step(self) -> Option<TestStep> {
        Some(TestStep {
            description: self.description,
            result: self.result.parse().ok()?,
            duration_ms: self.duration,
            children: self
                .children
                .into_iter()
                .map(JsonStep::into_step)
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

impl JsonOutcome {
    /// `None` if any result name is not recognized.
    fn into_outcome(self) -> Option<TestOutcome> {
        Some(TestOutcome {
            title: self.title,
            name: self.method_name,
            user_story: self.user_story.map(|s| UserStory {
                id: s.id,
                name: s.story_name,
                path: s.path,
            }),
            result: self.result.parse().ok()?,
            duration_ms: self.duration,
            tags: self
                .tags
                .into_iter()
                .map(|t| TestTag {
                    name: t.name,
                    tag_type: t.tag_type,
                })
                .collect(),
            steps: self
                .test_steps
                .into_iter()
                .map(JsonStep::into_step)
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

impl OutcomeReader for JsonOutcomeReader {
    fn format(&self) -> OutcomeFormat {
        OutcomeFormat::Json
    }

    /// Invalid JSON is a `LoadError`; valid JSON that does not describe an
    /// outcome yields `Ok(None)`.
    fn parse_outcome(&self, content: &str, file: &Path) -> Result<Option<TestOutcome>, LoadError> {
        let content = content.trim_start_matches('\u{feff}');

        let value: Value = serde_json::from_str(content).map_err(|e| {
            LoadError::new(
                file,
                LoadErrorKind::JsonParseError,
                format!("JSON parse error: {e}"),
            )
        })?;

        Ok(serde_json::from_value::<JsonOutcome>(value)
            .ok()
            .and_then(JsonOutcome::into_outcome))
    }
}
