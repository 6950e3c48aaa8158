use super::PackageError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// File types the writer accepts; anything else is written as Markdown.
pub const ALLOWED_FILE_TYPES: [&str; 6] = ["md", "txt", "html", "json", "yaml", "yml"];

const DEFAULT_FILE_TYPE: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub characters: usize,
}

/// Writes curriculum content files, creating parent folders as needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentWriter;

impl ContentWriter {
    /// Writes `content` to `file_path`.
    ///
    /// The extension comes from `file_type` when the path has none. Paths
    /// containing `..` are rejected before anything touches the disk.
    pub fn write(
        &self,
        file_path: &str,
        content: &str,
        file_type: Option<&str>,
    ) -> Result<WrittenFile, PackageError> {
        if file_path.trim().is_empty() {
            return Err(PackageError::Validation(
                "File path must be a non-empty string".to_string(),
            ));
        }

        let mut path = PathBuf::from(file_path);
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(PackageError::UnsafePath(path));
        }

        if path.extension().is_none() {
            let extension = file_type
                .filter(|t| ALLOWED_FILE_TYPES.contains(t))
                .unwrap_or(DEFAULT_FILE_TYPE);
            path.set_extension(extension);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(PackageError::io("creating directory", parent))?;
        }
        fs::write(&path, content).map_err(PackageError::io("writing file", &path))?;

        let characters = content.chars().count();
        info!(path = %path.display(), characters, "Wrote curriculum content");
        Ok(WrittenFile { path, characters })
    }

    /// Convenience for callers that already hold a `Path`.
    pub fn write_to(
        &self,
        path: &Path,
        content: &str,
        file_type: Option<&str>,
    ) -> Result<WrittenFile, PackageError> {
        self.write(&path.to_string_lossy(), content, file_type)
    }
}
