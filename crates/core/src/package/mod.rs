//! Course Package Tools
//!
//! Filesystem tools used by the course structure organizer agent: laying out
//! the module/week/session folder tree, writing content files into it, and
//! archiving the finished course as a zip for distribution.

mod archive;
mod organizer;
mod writer;

pub use archive::{ArchiveSummary, DEFAULT_ARCHIVE_NAME, ZipCreator};
pub use organizer::{CourseLayout, FileOrganizer, OVERVIEW_DIR};
pub use writer::{ALLOWED_FILE_TYPES, ContentWriter, WrittenFile};

use std::path::{Path, PathBuf};

/// Errors raised by the package tools.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Source path {} does not exist", .0.display())]
    MissingSource(PathBuf),
    #[error("Source path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("Error: File path {} contains unsafe components", .0.display())]
    UnsafePath(PathBuf),
    #[error("Error {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing zip file {}: {source}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("Error walking {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl PackageError {
    fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> Self + 'a {
        move |source| PackageError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Strips everything but alphanumerics, spaces, `-` and `_`, then trims
/// trailing whitespace.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Sanitizes `raw` for use as a folder name, with spaces turned into `_`.
///
/// Returns `None` when nothing usable is left.
pub fn folder_name(raw: &str) -> Option<String> {
    let sanitized = sanitize_name(raw);
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized.replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Intro to Rust!  "), "Intro to Rust");
        assert_eq!(sanitize_name("a/b\\c"), "abc");
        assert_eq!(sanitize_name("../.."), "");
        assert_eq!(sanitize_name("Café-101_x"), "Café-101_x");
    }

    #[test]
    fn test_folder_name() {
        assert_eq!(
            folder_name("Data Structures 101").as_deref(),
            Some("Data_Structures_101")
        );
        assert_eq!(folder_name("?!"), None);
    }

    #[test]
    fn test_error_messages() {
        let err = PackageError::Validation("Topic must be a non-empty string".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: Topic must be a non-empty string"
        );

        let err = PackageError::MissingSource(PathBuf::from("output/none"));
        assert_eq!(err.to_string(), "Source path output/none does not exist");
    }

    #[test]
    fn test_io_error_keeps_action_and_path() {
        let path = PathBuf::from("output/course");
        let make = PackageError::io("creating directory", &path);
        let err = make(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));

        assert_eq!(err.to_string(), "Error creating directory output/course: denied");
        match err {
            PackageError::Io { action, path, .. } => {
                assert_eq!(action, "creating directory");
                assert_eq!(path, PathBuf::from("output/course"));
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
