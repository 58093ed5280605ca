//! Format-specific outcome readers.
//!
//! Each sub-module turns one report file into a [`TestOutcome`]:
//! - `xml`: `acceptance-test-run` documents
//! - `json`: camelCase JSON objects
//!
//! A reader distinguishes between files that are corrupt (a [`LoadError`])
//! and files that are well-formed but are not test outcomes (`Ok(None)`).

pub mod json;
pub mod xml;

use std::path::Path;

use outcomes::TestOutcome;

use crate::config::OutcomeFormat;
use crate::error::LoadError;
use crate::source::fs::read_file_bounded;

/// Reads a single persisted test outcome.
pub trait OutcomeReader: Send + Sync {
    /// The format this reader understands.
    fn format(&self) -> OutcomeFormat;

    /// Parse report content read from `file`.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the content cannot be parsed in this format at all.
    fn parse_outcome(&self, content: &str, file: &Path) -> Result<Option<TestOutcome>, LoadError>;

    /// Read and parse one report file.
    ///
    /// Empty or whitespace-only files are not outcomes.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the file cannot be read, exceeds
    /// `max_file_size`, or is not parseable in this format.
    fn try_load(&self, file: &Path, max_file_size: u64) -> Result<Option<TestOutcome>, LoadError> {
        let content = read_file_bounded(file, max_file_size)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        self.parse_outcome(&content, file)
    }
}

/// The reader for a given format.
#[must_use]
pub fn reader_for(format: OutcomeFormat) -> Box<dyn OutcomeReader> {
    match format {
        OutcomeFormat::Xml => Box::new(xml::XmlOutcomeReader),
        OutcomeFormat::Json => Box::new(json::JsonOutcomeReader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_for_matches_format() {
        assert_eq!(reader_for(OutcomeFormat::Xml).format(), OutcomeFormat::Xml);
        assert_eq!(reader_for(OutcomeFormat::Json).format(), OutcomeFormat::Json);
    }
}
