/// Failures raised while turning a research request into a report.
///
/// Only [`ResearchError::InvalidInput`] ever reaches the caller of
/// [`DeepResearchTool::run`](super::DeepResearchTool::run); the other two
/// variants are caught at the pipeline boundary and rendered as diagnostic
/// text by [`describe_failure`](super::describe_failure).
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// The request could not be normalized into a canonical query.
    #[error("Invalid research input: {0}")]
    InvalidInput(String),
    /// The research executor reported an error.
    #[error(transparent)]
    Execution(anyhow::Error),
    /// The executor returned a report that cannot be rendered.
    #[error("Malformed research report: {0}")]
    Formatting(String),
}

/// Returned when a research mode string is not one of the known modes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown research mode '{0}'")]
pub struct UnknownModeError(pub String);
