use super::{PackageError, sanitize_name};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Archive name used when the requested one sanitizes to nothing.
pub const DEFAULT_ARCHIVE_NAME: &str = "curriculum_package";

/// Result of archiving a course folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Number of regular files stored; directories are not counted.
    pub files: usize,
}

/// Packs a folder into `<output_root>/<name>.zip`.
#[derive(Debug, Clone)]
pub struct ZipCreator {
    output_root: PathBuf,
}

impl ZipCreator {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Archives `source` with Deflate compression.
    ///
    /// Entry names are relative to the parent of `source`, so the archive
    /// unpacks into a single top-level folder. Directories are stored too,
    /// which keeps empty classwork and homework folders in the package.
    pub fn create(&self, source: &Path, zip_name: &str) -> Result<ArchiveSummary, PackageError> {
        if source.as_os_str().is_empty() {
            return Err(PackageError::Validation(
                "Source path must be a non-empty string".to_string(),
            ));
        }
        if zip_name.trim().is_empty() {
            return Err(PackageError::Validation(
                "Zip name must be a non-empty string".to_string(),
            ));
        }
        if !source.exists() {
            return Err(PackageError::MissingSource(source.to_path_buf()));
        }
        if !source.is_dir() {
            return Err(PackageError::NotADirectory(source.to_path_buf()));
        }

        let mut name = sanitize_name(zip_name);
        if name.is_empty() {
            name = DEFAULT_ARCHIVE_NAME.to_string();
        }
        let zip_path = self.output_root.join(format!("{}.zip", name));

        fs::create_dir_all(&self.output_root)
            .map_err(PackageError::io("creating output directory", &self.output_root))?;
        let file =
            File::create(&zip_path).map_err(PackageError::io("creating zip file", &zip_path))?;
        let archive_identity = fs::canonicalize(&zip_path).ok();

        let zip_err = |source| PackageError::Zip {
            path: zip_path.clone(),
            source,
        };
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let base = source.parent().unwrap_or(source);
        let mut files = 0;

        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.map_err(|e| PackageError::Walk {
                path: source.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            let entry_name = archive_name(path.strip_prefix(base).unwrap_or(path));
            if entry_name.is_empty() {
                continue;
            }

            if entry.file_type().is_dir() {
                zip.add_directory(entry_name, options).map_err(zip_err)?;
            } else if entry.file_type().is_file() {
                if archive_identity.is_some() && fs::canonicalize(path).ok() == archive_identity {
                    continue;
                }
                zip.start_file(entry_name, options).map_err(zip_err)?;
                let mut input =
                    File::open(path).map_err(PackageError::io("adding file to zip", path))?;
                io::copy(&mut input, &mut zip).map_err(PackageError::io("adding file to zip", path))?;
                files += 1;
            }
        }

        zip.finish().map_err(zip_err)?;

        if files == 0 {
            warn!(source = %source.display(), "No files found in source directory");
        } else {
            info!(path = %zip_path.display(), files, "Created zip file");
        }
        Ok(ArchiveSummary {
            path: zip_path,
            files,
        })
    }
}

/// Joins path components with `/` as zip entry names require, dropping
/// `.` so a source given as `.` does not prefix every entry.
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::FileOrganizer;
    use serde_json::json;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn entry_names(path: &Path) -> Vec<String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_zip_contains_top_level_folder_and_files() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output");
        let layout = FileOrganizer::new(&output)
            .organize("Rust", &json!({"Basics": {"1": {"1": {}}}}))
            .unwrap();
        fs::write(layout.root.join("Course_Overview_and_Guide/guide.md"), "# Guide").unwrap();

        let summary = ZipCreator::new(&output)
            .create(&layout.root, "rust course")
            .unwrap();

        assert_eq!(summary.path, output.join("rust course.zip"));
        assert_eq!(summary.files, 1);
        let names = entry_names(&summary.path);
        assert!(names.contains(&"Rust/Course_Overview_and_Guide/guide.md".to_string()));
        assert!(
            names
                .iter()
                .any(|n| n.starts_with("Rust/Module_Basics/Week_1/Session_1/Homework"))
        );

        let mut archive = ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        let mut guide = String::new();
        archive
            .by_name("Rust/Course_Overview_and_Guide/guide.md")
            .unwrap()
            .read_to_string(&mut guide)
            .unwrap();
        assert_eq!(guide, "# Guide");
    }

    #[test]
    fn test_empty_tree_reports_zero_files() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("empty");
        fs::create_dir(&source).unwrap();

        let summary = ZipCreator::new(dir.path().join("out"))
            .create(&source, "***")
            .unwrap();

        assert_eq!(summary.files, 0);
        assert!(summary.path.ends_with("curriculum_package.zip"));
    }

    #[test]
    fn test_archive_is_not_added_to_itself() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "notes").unwrap();

        let summary = ZipCreator::new(dir.path()).create(dir.path(), "self").unwrap();

        assert_eq!(summary.files, 1);
        assert!(!entry_names(&summary.path).iter().any(|n| n.ends_with("self.zip")));
    }

    #[test]
    fn test_missing_and_non_directory_sources() {
        let dir = tempdir().unwrap();
        let creator = ZipCreator::new(dir.path());

        let err = creator.create(&dir.path().join("nope"), "x").unwrap_err();
        assert!(matches!(err, PackageError::MissingSource(_)));

        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = creator.create(&file, "x").unwrap_err();
        assert!(matches!(err, PackageError::NotADirectory(_)));

        let err = creator.create(Path::new(""), "x").unwrap_err();
        assert!(matches!(err, PackageError::Validation(_)));
        let err = creator.create(dir.path(), " ").unwrap_err();
        assert!(matches!(err, PackageError::Validation(_)));
    }

    #[test]
    fn test_entry_names_drop_current_dir() {
        assert_eq!(archive_name(Path::new("./notes.txt")), "notes.txt");
        assert_eq!(archive_name(Path::new(".")), "");
        assert_eq!(
            archive_name(Path::new("Rust/Module_1/./Week_1")),
            "Rust/Module_1/Week_1"
        );
    }
}
