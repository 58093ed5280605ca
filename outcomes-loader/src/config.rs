//! Configuration for outcome loading.
//!
//! The report format comes from a key-value configuration source that is
//! handed to the loader explicitly. Filesystem limits live in
//! [`LoaderOptions`] and are independent of the source.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::LoaderError;

/// Property naming the format the outcomes were persisted in.
pub const REPORT_FORMAT_PROPERTY: &str = "thucydides.report.format";

/// Value used when [`REPORT_FORMAT_PROPERTY`] is not set.
pub const DEFAULT_REPORT_FORMAT: &str = "XML";

/// A read-only source of configuration properties.
pub trait EnvironmentVariables {
    /// Look up a property by its dotted name.
    fn property(&self, name: &str) -> Option<String>;

    /// Look up a property, falling back to `default` when it is not set.
    fn property_or(&self, name: &str, default: &str) -> String {
        self.property(name).unwrap_or_else(|| default.to_owned())
    }
}

/// Process environment variables.
///
/// A dotted property such as `thucydides.report.format` is read from the
/// variable `THUCYDIDES_REPORT_FORMAT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    /// Environment variable name for a dotted property name.
    #[must_use]
    pub fn variable_name(property: &str) -> String {
        property.replace(['.', '-'], "_").to_ascii_uppercase()
    }
}

impl EnvironmentVariables for SystemEnvironment {
    fn property(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name)).ok()
    }
}

/// In-memory configuration, keyed by dotted property name.
#[derive(Debug, Clone, Default)]
pub struct MockEnvironment {
    properties: HashMap<String, String>,
}

impl MockEnvironment {
    /// An environment with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning the updated environment.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Set a property in place.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }
}

impl EnvironmentVariables for MockEnvironment {
    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

/// Serialization format of persisted outcome files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeFormat {
    Xml,
    Json,
}

impl OutcomeFormat {
    /// Lower-case file extension, including the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutcomeFormat::Xml => ".xml",
            OutcomeFormat::Json => ".json",
        }
    }

    /// Upper-case format name, as accepted in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeFormat::Xml => "XML",
            OutcomeFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for OutcomeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeFormat {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "XML" => Ok(OutcomeFormat::Xml),
            "JSON" => Ok(OutcomeFormat::Json),
            _ => Err(LoaderError::Configuration {
                value: s.to_owned(),
            }),
        }
    }
}

/// Resolve the active outcome format from configuration.
///
/// # Errors
///
/// Returns `LoaderError::Configuration` if the configured value is not a
/// known format name.
pub fn resolve_format(env: &dyn EnvironmentVariables) -> Result<OutcomeFormat, LoaderError> {
    env.property_or(REPORT_FORMAT_PROPERTY, DEFAULT_REPORT_FORMAT)
        .parse()
}

/// Filesystem options for loading report files.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct LoaderOptions {
    /// Maximum size of a single report file in bytes (default: 10 MB).
    /// Larger files fail the load rather than being read unbounded.
    pub max_file_size: u64,
    /// Whether symbolic links in the report directory are resolved.
    ///
    /// **Defaults to `true`**: a link to a report file is loaded like the
    /// file itself. When `false`, links are skipped.
    pub follow_links: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_file_size: 10_485_760,
            follow_links: true,
        }
    }
}
