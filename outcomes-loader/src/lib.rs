//! # outcomes-loader
//!
//! Loads the test outcomes persisted during a test run, one file per test,
//! so that aggregate reports can be built from them.
//!
//! The persisted format (XML or JSON) is read from configuration once, when
//! the loader is created. Every call to [`TestOutcomeLoader::load_from`]
//! rescans the report directory and parses every matching file again.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use outcomes_loader::{MockEnvironment, REPORT_FORMAT_PROPERTY, TestOutcomeLoader};
//!
//! let env = MockEnvironment::new().with_property(REPORT_FORMAT_PROPERTY, "json");
//! let loader = TestOutcomeLoader::with_environment(&env).unwrap();
//!
//! let outcomes = loader.load_from(Path::new("target/site/reports")).unwrap();
//! println!("Loaded {} outcomes", outcomes.len());
//!
//! let summary = outcomes_loader::test_outcomes_in(Path::new("target/site/reports")).unwrap();
//! println!("Failures: {}", summary.failure_count());
//! ```

mod config;
mod error;
pub mod format;
mod source;

pub use config::{
    DEFAULT_REPORT_FORMAT, EnvironmentVariables, LoaderOptions, MockEnvironment, OutcomeFormat,
    REPORT_FORMAT_PROPERTY, SystemEnvironment, resolve_format,
};
pub use error::{LoadError, LoadErrorKind, LoaderError};
pub use format::{OutcomeReader, reader_for};

use std::path::Path;

use outcomes::{TestOutcome, TestOutcomes};

use source::fs::find_report_files;

/// Loads test outcomes from a report directory.
///
/// The report format is resolved once, at construction; create a new loader
/// to pick up a changed configuration value.
#[derive(Debug, Clone)]
pub struct TestOutcomeLoader {
    format: OutcomeFormat,
    options: LoaderOptions,
}

impl TestOutcomeLoader {
    /// Create a loader configured from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::Configuration` if the configured report format
    /// is not supported.
    pub fn new() -> Result<Self, LoaderError> {
        Self::with_environment(&SystemEnvironment)
    }

    /// Create a loader configured from an explicit configuration source.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::Configuration` if the configured report format
    /// is not supported. No filesystem access happens here.
    pub fn with_environment(env: &dyn EnvironmentVariables) -> Result<Self, LoaderError> {
        let format = resolve_format(env)?;
        tracing::debug!(%format, "Resolved test outcome format");
        Ok(Self {
            format,
            options: LoaderOptions::default(),
        })
    }

    /// Replace the filesystem options.
    #[must_use]
    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// The report format resolved at construction.
    #[must_use]
    pub fn format(&self) -> OutcomeFormat {
        self.format
    }

    /// The filesystem options used by [`TestOutcomeLoader::load_from`].
    #[must_use]
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// The reader for the configured format.
    #[must_use]
    pub fn outcome_reader(&self) -> Box<dyn OutcomeReader> {
        reader_for(self.format)
    }

    /// Load the test outcomes from a report directory.
    ///
    /// Only the direct children of `report_directory` whose name ends with
    /// the format's extension (ignoring case) are read. Files that are
    /// well-formed but are not test outcomes are left out. Outcomes are
    /// returned in file-name order.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::DirectoryNotFound` if the directory does not
    /// exist, is not a directory, or cannot be listed. Returns
    /// `LoaderError::Load` as soon as one matching file cannot be read or
    /// parsed; no partial result is returned.
    pub fn load_from(&self, report_directory: &Path) -> Result<Box<[TestOutcome]>, LoaderError> {
        let reader = self.outcome_reader();
        let report_files =
            find_report_files(report_directory, self.format.extension(), &self.options)?;

        let mut outcomes = Vec::with_capacity(report_files.len());
        for report_file in &report_files {
            if let Some(outcome) = reader.try_load(report_file, self.options.max_file_size)? {
                outcomes.push(outcome);
            } else {
                tracing::debug!(
                    file = %report_file.display(),
                    "Skipping file that is not a test outcome"
                );
            }
        }

        tracing::debug!(
            directory = %report_directory.display(),
            loaded = outcomes.len(),
            "Loaded test outcomes"
        );
        Ok(outcomes.into_boxed_slice())
    }
}

/// Load the outcomes in `report_directory` with a loader configured from the
/// process environment, and wrap them in an aggregate view.
///
/// # Errors
///
/// Propagates any error from [`TestOutcomeLoader::new`] or
/// [`TestOutcomeLoader::load_from`] unchanged.
pub fn test_outcomes_in(report_directory: &Path) -> Result<TestOutcomes, LoaderError> {
    let loader = TestOutcomeLoader::new()?;
    Ok(TestOutcomes::of(loader.load_from(report_directory)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn json_loader() -> TestOutcomeLoader {
        let env = MockEnvironment::new().with_property(REPORT_FORMAT_PROPERTY, "JSON");
        TestOutcomeLoader::with_environment(&env).unwrap()
    }

    #[test]
    fn test_format_resolved_at_construction() {
        let mut env = MockEnvironment::new().with_property(REPORT_FORMAT_PROPERTY, "json");
        let loader = TestOutcomeLoader::with_environment(&env).unwrap();

        env.set_property(REPORT_FORMAT_PROPERTY, "xml");
        assert_eq!(loader.format(), OutcomeFormat::Json);

        let reloaded = TestOutcomeLoader::with_environment(&env).unwrap();
        assert_eq!(reloaded.format(), OutcomeFormat::Xml);
    }

    #[test]
    fn test_outcome_reader_follows_format() {
        assert_eq!(json_loader().outcome_reader().format(), OutcomeFormat::Json);
    }

    #[test]
    fn test_with_options_replaces_options() {
        let mut options = LoaderOptions::default();
        options.max_file_size = 16;
        let loader = json_loader().with_options(options);
        assert_eq!(loader.options().max_file_size, 16);
    }

    #[test]
    fn test_oversized_file_aborts_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.json"),
            r#"{"title": "t", "methodName": "m", "result": "SUCCESS"}"#,
        )
        .unwrap();

        let mut options = LoaderOptions::default();
        options.max_file_size = 16;
        let err = json_loader()
            .with_options(options)
            .load_from(tmp.path())
            .unwrap_err();
        assert!(
            matches!(&err, LoaderError::Load(e) if e.kind == LoadErrorKind::FileTooLarge),
            "got: {err:?}"
        );
    }
}
