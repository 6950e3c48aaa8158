use super::{PackageError, folder_name};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Folder holding the course-wide guide, created for every course.
pub const OVERVIEW_DIR: &str = "Course_Overview_and_Guide";

const FALLBACK_TOPIC: &str = "Curriculum";

/// Summary of the folder tree created for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLayout {
    pub root: PathBuf,
    pub modules: usize,
    pub weeks: usize,
    pub sessions: usize,
}

/// Creates the `Topic/Module/Week/Session/{Classwork,Homework}` tree.
#[derive(Debug, Clone)]
pub struct FileOrganizer {
    output_root: PathBuf,
}

impl FileOrganizer {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Returns the folder a course on `topic` is organized into.
    pub fn course_root(&self, topic: &str) -> PathBuf {
        self.output_root
            .join(folder_name(topic).unwrap_or_else(|| FALLBACK_TOPIC.to_string()))
    }

    /// Materializes `structure` under the course root.
    ///
    /// `structure` maps module names to objects of weeks, which map to
    /// objects of sessions. A module or week whose value is not an object
    /// gets its own folder and nothing beneath it.
    pub fn organize(&self, topic: &str, structure: &Value) -> Result<CourseLayout, PackageError> {
        if topic.trim().is_empty() {
            return Err(PackageError::Validation(
                "Topic must be a non-empty string".to_string(),
            ));
        }
        let modules = structure
            .as_object()
            .filter(|modules| !modules.is_empty())
            .ok_or_else(|| {
                PackageError::Validation(
                    "Content structure must be a non-empty object".to_string(),
                )
            })?;

        let root = self.course_root(topic);
        create_dir(&root)?;
        create_dir(&root.join(OVERVIEW_DIR))?;

        let mut layout = CourseLayout {
            root,
            modules: 0,
            weeks: 0,
            sessions: 0,
        };

        for (module_index, (module_name, module_data)) in modules.iter().enumerate() {
            let module_dir = layout
                .root
                .join(format!("Module_{}", name_or_index(module_name, module_index)));
            create_dir(&module_dir)?;
            layout.modules += 1;

            let Some(weeks) = module_data.as_object() else {
                debug!(module = %module_name, "Module has no week structure");
                continue;
            };

            for (week_index, (week, week_data)) in weeks.iter().enumerate() {
                let week_dir = module_dir.join(format!("Week_{}", name_or_index(week, week_index)));
                create_dir(&week_dir)?;
                layout.weeks += 1;

                let Some(sessions) = week_data.as_object() else {
                    continue;
                };

                for (session_index, session) in sessions.keys().enumerate() {
                    let session_dir = week_dir
                        .join(format!("Session_{}", name_or_index(session, session_index)));
                    create_dir(&session_dir.join("Classwork"))?;
                    create_dir(&session_dir.join("Homework"))?;
                    layout.sessions += 1;
                }
            }
        }

        info!(
            root = %layout.root.display(),
            modules = layout.modules,
            weeks = layout.weeks,
            sessions = layout.sessions,
            "Created curriculum folder structure"
        );
        Ok(layout)
    }
}

fn name_or_index(raw: &str, index: usize) -> String {
    folder_name(raw).unwrap_or_else(|| (index + 1).to_string())
}

fn create_dir(path: &Path) -> Result<(), PackageError> {
    fs::create_dir_all(path).map_err(PackageError::io("creating directory", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_organize_creates_full_tree() {
        let dir = tempdir().unwrap();
        let organizer = FileOrganizer::new(dir.path());
        let structure = json!({
            "Foundations": {
                "1": { "1": {}, "2": {} },
                "2": { "1": {} }
            },
            "Advanced Topics": {
                "3": { "1": "Lecture notes" }
            }
        });

        let layout = organizer.organize("Intro to Rust", &structure).unwrap();

        let root = dir.path().join("Intro_to_Rust");
        assert_eq!(layout.root, root);
        assert_eq!((layout.modules, layout.weeks, layout.sessions), (2, 3, 4));
        assert!(root.join(OVERVIEW_DIR).is_dir());
        assert!(root.join("Module_Foundations/Week_1/Session_2/Classwork").is_dir());
        assert!(root.join("Module_Foundations/Week_2/Session_1/Homework").is_dir());
        assert!(
            root.join("Module_Advanced_Topics/Week_3/Session_1/Classwork")
                .is_dir()
        );
    }

    #[test]
    fn test_non_object_levels_stop_descent() {
        let dir = tempdir().unwrap();
        let organizer = FileOrganizer::new(dir.path());
        let structure = json!({
            "Overview": "just a description",
            "Practice": { "1": ["not", "sessions"] }
        });

        let layout = organizer.organize("Topic", &structure).unwrap();

        assert_eq!((layout.modules, layout.weeks, layout.sessions), (2, 1, 0));
        let root = dir.path().join("Topic");
        assert!(root.join("Module_Overview").is_dir());
        assert_eq!(fs::read_dir(root.join("Module_Overview")).unwrap().count(), 0);
        assert!(root.join("Module_Practice/Week_1").is_dir());
    }

    #[test]
    fn test_unusable_names_fall_back() {
        let dir = tempdir().unwrap();
        let organizer = FileOrganizer::new(dir.path());
        let structure = json!({ "Basics": {}, "../..": { "..": { "/": {} } } });

        organizer.organize("!!!", &structure).unwrap();

        let root = dir.path().join("Curriculum");
        assert!(root.join("Module_Basics").is_dir());
        assert!(root.join("Module_2/Week_1/Session_1/Homework").is_dir());
    }

    #[test]
    fn test_validation_errors() {
        let dir = tempdir().unwrap();
        let organizer = FileOrganizer::new(dir.path());

        let err = organizer.organize("  ", &json!({"M": {}})).unwrap_err();
        assert!(matches!(err, PackageError::Validation(_)));

        let err = organizer.organize("Topic", &json!({})).unwrap_err();
        assert!(err.to_string().contains("non-empty object"));

        let err = organizer.organize("Topic", &json!(["M"])).unwrap_err();
        assert!(matches!(err, PackageError::Validation(_)));
    }
}
