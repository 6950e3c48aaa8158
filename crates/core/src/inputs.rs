//! Course Parameters
//!
//! The parameters a curriculum is generated from, validated the same way
//! regardless of whether they come from a prompt, CLI flags or a saved file.

use crate::research::{ResearchInput, ResearchParams, ResearchQueryFields};
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum length, in characters, of the topic and audience descriptions.
pub const MAX_DESCRIPTION_CHARS: usize = 200;
/// Upper bound on the number of sessions in a course.
pub const MAX_SESSIONS: u32 = 100;
/// File the validated inputs are saved to, inside the output directory.
pub const INPUTS_FILE: &str = "curriculum_inputs.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("{0} is too long (max {max} characters)", max = MAX_DESCRIPTION_CHARS)]
    TooLong(&'static str),
    #[error("Please enter a valid number for sessions, got '{0}'")]
    InvalidSessions(String),
    #[error("Number of sessions must be between 1 and {max}, got {0}", max = MAX_SESSIONS)]
    SessionsOutOfRange(u32),
    #[error("Project based must be 'yes' or 'no', got '{0}'")]
    InvalidProjectBased(String),
}

/// Unvalidated course parameters, exactly as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct RawCourseInputs {
    pub topic: String,
    pub duration: String,
    pub sessions: String,
    pub session_duration: String,
    pub project_based: String,
    pub audience_level: String,
}

/// Validated course parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInputs {
    pub topic: String,
    /// Overall course length, e.g. "8 weeks".
    pub duration: String,
    pub sessions: u32,
    /// Length of each session, e.g. "90 minutes".
    pub session_duration: String,
    pub project_based: bool,
    /// Who the course is for, e.g. "Computer Engineers".
    pub audience_level: String,
}

impl TryFrom<RawCourseInputs> for CourseInputs {
    type Error = InputError;

    fn try_from(raw: RawCourseInputs) -> Result<Self, Self::Error> {
        let topic = description("Topic", &raw.topic)?;
        let duration = required("Duration", &raw.duration)?;

        let sessions_text = raw.sessions.trim();
        let sessions = sessions_text
            .parse::<u32>()
            .map_err(|_| InputError::InvalidSessions(sessions_text.to_string()))?;
        if sessions == 0 || sessions > MAX_SESSIONS {
            return Err(InputError::SessionsOutOfRange(sessions));
        }

        let session_duration = required("Session duration", &raw.session_duration)?;

        let project_based = match raw.project_based.trim().to_lowercase().as_str() {
            "yes" => true,
            "no" => false,
            _ => return Err(InputError::InvalidProjectBased(raw.project_based)),
        };

        let audience_level = description("Audience level", &raw.audience_level)?;

        Ok(Self {
            topic,
            duration,
            sessions,
            session_duration,
            project_based,
            audience_level,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::Empty(field));
    }
    Ok(value.to_string())
}

fn description(field: &'static str, value: &str) -> Result<String, InputError> {
    let value = required(field, value)?;
    if value.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(InputError::TooLong(field));
    }
    Ok(value)
}

impl CourseInputs {
    /// The inputs in the shape the agent crew consumes them: every value is
    /// a string.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "topic": self.topic,
            "duration": self.duration,
            "sessions": self.sessions.to_string(),
            "session_duration": self.session_duration,
            "project_based": if self.project_based { "yes" } else { "no" },
            "audience_level": self.audience_level,
        })
    }

    /// Saves the inputs to [`INPUTS_FILE`] under `output_dir`.
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
        let path = output_dir.join(INPUTS_FILE);
        let contents = serde_json::to_string_pretty(&self.to_json())?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// The research request the subject-matter researcher starts from.
    pub fn research_input(&self) -> (ResearchInput, ResearchParams) {
        let fields = ResearchQueryFields {
            query: self.topic.clone(),
            target_audience: Some(self.audience_level.clone()),
            ..ResearchQueryFields::default()
        };
        (fields.into(), ResearchParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::{ResearchMode, ResearchRequest};
    use tempfile::tempdir;

    fn raw() -> RawCourseInputs {
        RawCourseInputs {
            topic: " Data Structures ".to_string(),
            duration: "8 weeks".to_string(),
            sessions: "16".to_string(),
            session_duration: "90 minutes".to_string(),
            project_based: "Yes".to_string(),
            audience_level: "Computer Engineers".to_string(),
        }
    }

    #[test]
    fn test_valid_inputs_are_trimmed_and_typed() {
        let inputs = CourseInputs::try_from(raw()).unwrap();
        assert_eq!(inputs.topic, "Data Structures");
        assert_eq!(inputs.sessions, 16);
        assert!(inputs.project_based);
    }

    #[test]
    fn test_each_rule_is_enforced() {
        let cases: Vec<(RawCourseInputs, InputError)> = vec![
            (
                RawCourseInputs { topic: "  ".to_string(), ..raw() },
                InputError::Empty("Topic"),
            ),
            (
                RawCourseInputs { topic: "x".repeat(201), ..raw() },
                InputError::TooLong("Topic"),
            ),
            (
                RawCourseInputs { duration: String::new(), ..raw() },
                InputError::Empty("Duration"),
            ),
            (
                RawCourseInputs { sessions: "ten".to_string(), ..raw() },
                InputError::InvalidSessions("ten".to_string()),
            ),
            (
                RawCourseInputs { sessions: "0".to_string(), ..raw() },
                InputError::SessionsOutOfRange(0),
            ),
            (
                RawCourseInputs { sessions: "101".to_string(), ..raw() },
                InputError::SessionsOutOfRange(101),
            ),
            (
                RawCourseInputs { session_duration: " ".to_string(), ..raw() },
                InputError::Empty("Session duration"),
            ),
            (
                RawCourseInputs { project_based: "maybe".to_string(), ..raw() },
                InputError::InvalidProjectBased("maybe".to_string()),
            ),
            (
                RawCourseInputs { audience_level: "a".repeat(201), ..raw() },
                InputError::TooLong("Audience level"),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(CourseInputs::try_from(input).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let inputs = CourseInputs::try_from(RawCourseInputs {
            topic: "t".repeat(200),
            sessions: "100".to_string(),
            ..raw()
        })
        .unwrap();
        assert_eq!(inputs.sessions, 100);
    }

    #[test]
    fn test_save_writes_string_valued_json() {
        let dir = tempdir().unwrap();
        let inputs = CourseInputs::try_from(raw()).unwrap();

        let path = inputs.save(&dir.path().join("output")).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["sessions"], "16");
        assert_eq!(saved["project_based"], "yes");
        assert_eq!(saved["audience_level"], "Computer Engineers");
        assert!(path.ends_with(INPUTS_FILE));
    }

    #[test]
    fn test_research_input_targets_audience() {
        let inputs = CourseInputs::try_from(raw()).unwrap();
        let (input, params) = inputs.research_input();

        let request = ResearchRequest::normalize(input, &params).unwrap();

        assert_eq!(request.query, "Data Structures");
        assert_eq!(request.research_mode, ResearchMode::Deep);
        assert_eq!(request.target_audience.as_deref(), Some("Computer Engineers"));
    }

    #[test]
    fn test_error_messages_name_limits() {
        assert_eq!(
            InputError::TooLong("Topic").to_string(),
            "Topic is too long (max 200 characters)"
        );
        assert_eq!(
            InputError::SessionsOutOfRange(0).to_string(),
            "Number of sessions must be between 1 and 100, got 0"
        );
    }
}
