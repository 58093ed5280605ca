//! XML outcome reader.
//!
//! A report is an `acceptance-test-run` document:
//!
//! ```xml
//! <acceptance-test-run title="Should log in" name="should_log_in" result="SUCCESS" duration="120">
//!   <user-story id="accounts.Login" name="Login" path="accounts"/>
//!   <tags>
//!     <tag name="smoke" type="tag"/>
//!   </tags>
//!   <test-step result="SUCCESS" duration="40">
//!     <description>open page</description>
//!   </test-step>
//! </acceptance-test-run>
//! ```
//!
//! The document is checked for well-formedness first, so that a corrupt or
//! truncated file is a `LoadError` while a well-formed document of another
//! kind is simply not an outcome.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Deserialize;

use outcomes::{TestOutcome, TestStep, TestTag, UserStory};

use crate::config::OutcomeFormat;
use crate::error::{LoadError, LoadErrorKind};
use crate::format::OutcomeReader;

/// Root element of a persisted test outcome.
pub const OUTCOME_ROOT_ELEMENT: &str = "acceptance-test-run";

/// Reads outcomes persisted as XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlOutcomeReader;

#[derive(Debug, Deserialize)]
struct XmlOutcome {
    #[serde(rename = "@title")]
    title: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@result")]
    result: String,
    #[serde(rename = "@duration", default)]
    duration: u64,
    #[serde(rename = "user-story", default)]
    user_story: Option<XmlUserStory>,
    #[serde(default)]
    tags: Option<XmlTags>,
    #[serde(rename = "test-step", default)]
    steps: Vec<XmlStep>,
}

#[derive(Debug, Deserialize)]
struct XmlUserStory {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@path", default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlTags {
    #[serde(rename = "tag", default)]
    tags: Vec<XmlTag>,
}

#[derive(Debug, Deserialize)]
struct XmlTag {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type", default)]
    tag_type: String,
}

#[derive(Debug, Deserialize)]
struct XmlStep {
    #[serde(rename = "@result")]
    result: String,
    #[serde(rename = "@duration", default)]
    duration: u64,
    #[serde(default)]
    description: String,
    #[serde(rename = "test-step", default)]
    children: Vec<XmlStep>,
}

impl XmlStep {
    fn into_step(self) -> Option<TestStep> {
        Some(TestStep {
            description: self.description.trim().to_owned(),
            result: self.result.parse().ok()?,
            duration_ms: self.duration,
            children: self
                .children
                .into_iter()
                .map(XmlStep::into_step)
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

impl XmlOutcome {
    /// `None` if any result name is not recognized.
    fn into_outcome(self) -> Option<TestOutcome> {
        Some(TestOutcome {
            title: self.title,
            name: self.name,
            user_story: self.user_story.map(|s| UserStory {
                id: s.id,
                name: s.name,
                path: s.path,
            }),
            result: self.result.parse().ok()?,
            duration_ms: self.duration,
            tags: self
                .tags
                .map(|t| t.tags)
                .unwrap_or_default()
                .into_iter()
                .map(|t| TestTag {
                    name: t.name,
                    tag_type: t.tag_type,
                })
                .collect(),
            steps: self
                .steps
                .into_iter()
                .map(XmlStep::into_step)
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

/// Parse every attribute of an element, including entity references in values.
fn check_attributes(start: &BytesStart<'_>) -> Result<(), String> {
    let mut attributes = start.attributes();
    attributes.with_checks(true);
    for attribute in attributes {
        let attribute = attribute.map_err(|e| format!("invalid attribute: {e}"))?;
        attribute
            .unescape_value()
            .map_err(|e| format!("invalid attribute value: {e}"))?;
    }
    Ok(())
}

/// Walk the whole document and return the name of its root element.
///
/// Returns `Ok(None)` for a document with no element at all (only a
/// declaration or comments).
///
/// # Errors
///
/// Returns a description of the problem if the document is not well-formed:
/// a syntax error, malformed or duplicated attributes, unknown entity
/// references, mismatched or unclosed elements, text outside the root
/// element, or more than one root element.
fn root_element_name(content: &str) -> Result<Option<String>, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut depth: usize = 0;
    let mut root: Option<String> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{e} (at byte {})", reader.error_position()))?;

        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                check_attributes(start)?;
                if depth == 0 {
                    if root.is_some() {
                        return Err("document has more than one root element".to_owned());
                    }
                    root = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err("text outside of the root element".to_owned());
            }
            Event::Text(ref text) => {
                text.unescape()
                    .map_err(|e| format!("invalid text content: {e}"))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(format!("unexpected end of document: {depth} unclosed element(s)"));
    }
    Ok(root)
}

impl OutcomeReader for XmlOutcomeReader {
    fn format(&self) -> OutcomeFormat {
        OutcomeFormat::Xml
    }

    /// Malformed XML is a `LoadError`. A well-formed document that is not an
    /// `acceptance-test-run`, or that lacks required attributes, yields `Ok(None)`.
    fn parse_outcome(&self, content: &str, file: &Path) -> Result<Option<TestOutcome>, LoadError> {
        let content = content.trim_start_matches('\u{feff}');

        let root = root_element_name(content).map_err(|message| {
            LoadError::new(
                file,
                LoadErrorKind::XmlParseError,
                format!("XML parse error: {message}"),
            )
        })?;

        if root.as_deref() != Some(OUTCOME_ROOT_ELEMENT) {
            return Ok(None);
        }

        Ok(quick_xml::de::from_str::<XmlOutcome>(content)
            .ok()
            .and_then(XmlOutcome::into_outcome))
    }
}
