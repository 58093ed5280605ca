//! Filesystem report source.
//!
//! Lists report files in a directory and reads them for the deserializers.
//! - Only direct children of the report directory are considered
//! - Only regular files are returned; symlinks are resolved unless `follow_links` is unset
//! - Extension matching is case-insensitive
//! - Bounded streaming reads prevent TOCTOU and memory `DoS`

use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LoaderOptions;
use crate::error::{LoadError, LoadErrorKind, LoaderError};

fn directory_not_found(directory: &Path, reason: String) -> LoaderError {
    LoaderError::DirectoryNotFound {
        path: directory.to_path_buf(),
        reason,
    }
}

/// Check whether a file name ends with `extension`, ignoring case.
fn matches_extension(file_name: &str, extension: &str) -> bool {
    file_name.to_lowercase().ends_with(extension)
}

/// List the report files in `directory` whose name ends with `extension`.
///
/// Files are returned sorted by file name so that loads are deterministic
/// across platforms.
///
/// # Errors
///
/// Returns `LoaderError::DirectoryNotFound` if `directory` does not exist,
/// is not a directory, or cannot be listed. Returns `LoaderError::Load` if a
/// matching entry cannot be resolved, such as a dangling symlink.
pub fn find_report_files(
    directory: &Path,
    extension: &str,
    options: &LoaderOptions,
) -> Result<Vec<PathBuf>, LoaderError> {
    let metadata =
        std::fs::metadata(directory).map_err(|e| directory_not_found(directory, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(directory_not_found(
            directory,
            "Not a directory".to_owned(),
        ));
    }

    let mut files = Vec::new();
    for entry_result in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(options.follow_links)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(entry) => entry,
            // An entry that cannot be resolved (e.g. a dangling symlink) fails
            // only if it would have been a report file.
            Err(walk_err) if walk_err.depth() > 0 && walk_err.path().is_some() => {
                let path = walk_err.path().map_or_else(PathBuf::new, Path::to_path_buf);
                let is_report = path
                    .file_name()
                    .is_some_and(|name| matches_extension(&name.to_string_lossy(), extension));
                if !is_report {
                    continue;
                }
                return Err(LoadError::new(
                    path,
                    LoadErrorKind::IoError,
                    format!("Failed to resolve report file: {walk_err}"),
                )
                .into());
            }
            Err(walk_err) => {
                return Err(directory_not_found(
                    directory,
                    format!("Directory listing error: {walk_err}"),
                ));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if matches_extension(&entry.file_name().to_string_lossy(), extension) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(
        directory = %directory.display(),
        extension,
        matched = files.len(),
        "Scanned report directory"
    );
    Ok(files)
}

/// Read a report file using a bounded streaming read, enforcing `max_file_size`.
///
/// The file handle is dropped before this function returns, on every path.
///
/// # Errors
///
/// Returns a `LoadError` if:
/// - The file cannot be opened or read
/// - The file exceeds `max_file_size`
/// - The content is not valid UTF-8
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| {
        LoadError::new(path, LoadErrorKind::IoError, format!("Failed to open file: {e}"))
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            LoadError::new(path, LoadErrorKind::IoError, format!("Failed to read file: {e}"))
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(LoadError::new(
            path,
            LoadErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        LoadError::new(
            path,
            LoadErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}
