//! Report file sources.
//!
//! Only the filesystem source exists: report files are the direct children
//! of a single report directory.

pub mod fs;
