//! Research requests and their normalization into a canonical query.

use super::error::{ResearchError, UnknownModeError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Number of sources analyzed when the caller does not say otherwise.
pub const DEFAULT_MAX_SOURCES: u32 = 20;

/// How thorough a research run should be.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ResearchMode {
    /// Fast research for basic information.
    Quick,
    /// Comprehensive research across multiple sources.
    #[default]
    Deep,
    /// Scholarly research with rigorous methodology.
    Academic,
}

impl ResearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchMode::Quick => "quick",
            ResearchMode::Deep => "deep",
            ResearchMode::Academic => "academic",
        }
    }

    /// Nominal duration of a research run in this mode, in seconds.
    pub fn expected_seconds(&self) -> u64 {
        match self {
            ResearchMode::Quick => 5,
            ResearchMode::Deep => 15,
            ResearchMode::Academic => 30,
        }
    }
}

impl fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResearchMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(ResearchMode::Quick),
            "deep" => Ok(ResearchMode::Deep),
            "academic" => Ok(ResearchMode::Academic),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

/// Sidecar parameters that accompany a plain-text query.
///
/// The mode is kept as raw text because callers (agents, CLI flags) may
/// supply values outside the known set; normalization coerces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchParams {
    pub research_mode: String,
    pub max_sources: u32,
    pub include_citations: bool,
    pub target_audience: Option<String>,
}

impl Default for ResearchParams {
    fn default() -> Self {
        Self {
            research_mode: ResearchMode::default().to_string(),
            max_sources: DEFAULT_MAX_SOURCES,
            include_citations: true,
            target_audience: None,
        }
    }
}

impl ResearchParams {
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.research_mode = mode.into();
        self
    }

    pub fn with_max_sources(mut self, max_sources: u32) -> Self {
        self.max_sources = max_sources;
        self
    }

    pub fn with_citations(mut self, include_citations: bool) -> Self {
        self.include_citations = include_citations;
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }
}

/// The structured form of a research query.
///
/// Every field other than `query` is optional; absent fields take the
/// documented defaults, never the sidecar parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResearchQueryFields {
    /// The research question or topic.
    pub query: String,
    /// Research mode: 'quick', 'deep', or 'academic'.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_mode: Option<String>,
    /// Maximum number of sources to analyze.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sources: Option<u32>,
    /// Include citations in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_citations: Option<bool>,
    /// Target audience for the research.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
}

/// A research query as it arrives from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchInput {
    /// A free-form topic; the sidecar parameters fill in the rest.
    Text(String),
    /// A self-contained request; the sidecar parameters are ignored.
    Structured(ResearchQueryFields),
}

impl From<&str> for ResearchInput {
    fn from(query: &str) -> Self {
        ResearchInput::Text(query.to_string())
    }
}

impl From<String> for ResearchInput {
    fn from(query: String) -> Self {
        ResearchInput::Text(query)
    }
}

impl From<ResearchQueryFields> for ResearchInput {
    fn from(fields: ResearchQueryFields) -> Self {
        ResearchInput::Structured(fields)
    }
}

impl TryFrom<Value> for ResearchInput {
    type Error = ResearchError;

    /// Accepts a JSON string or object; every other JSON shape is rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(query) => Ok(ResearchInput::Text(query)),
            Value::Object(_) => serde_json::from_value(value)
                .map(ResearchInput::Structured)
                .map_err(|e| {
                    ResearchError::InvalidInput(format!("malformed structured query: {}", e))
                }),
            other => Err(ResearchError::InvalidInput(format!(
                "Research query must be a string or an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The canonical, fully defaulted form of a research request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchRequest {
    pub query: String,
    pub research_mode: ResearchMode,
    pub max_sources: u32,
    pub include_citations: bool,
    pub target_audience: Option<String>,
}

impl ResearchRequest {
    /// Creates a request for `query` with every other field defaulted.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            research_mode: ResearchMode::default(),
            max_sources: DEFAULT_MAX_SOURCES,
            include_citations: true,
            target_audience: None,
        }
    }

    /// Normalizes a caller-supplied input into a canonical request.
    ///
    /// An unknown research mode is not an error: it is rewritten to
    /// [`ResearchMode::Deep`] and a warning is logged. An empty query or a
    /// zero source budget is rejected with [`ResearchError::InvalidInput`].
    pub fn normalize(input: ResearchInput, params: &ResearchParams) -> Result<Self, ResearchError> {
        let (query, mode, max_sources, include_citations, target_audience) = match input {
            ResearchInput::Text(query) => (
                query,
                params.research_mode.clone(),
                params.max_sources,
                params.include_citations,
                params.target_audience.clone(),
            ),
            // A structured query is self-contained: absent fields take the
            // defaults and the sidecar parameters are ignored.
            ResearchInput::Structured(fields) => {
                let defaults = ResearchParams::default();
                (
                    fields.query,
                    fields.research_mode.unwrap_or(defaults.research_mode),
                    fields.max_sources.unwrap_or(defaults.max_sources),
                    fields.include_citations.unwrap_or(defaults.include_citations),
                    fields.target_audience,
                )
            }
        };

        if query.trim().is_empty() {
            return Err(ResearchError::InvalidInput(
                "Research query must not be empty".to_string(),
            ));
        }
        if max_sources == 0 {
            return Err(ResearchError::InvalidInput(
                "max_sources must be a positive integer".to_string(),
            ));
        }

        let research_mode = mode.parse::<ResearchMode>().unwrap_or_else(|_| {
            warn!(research_mode = %mode, "Invalid research mode, defaulting to 'deep'");
            ResearchMode::Deep
        });

        Ok(Self {
            query,
            research_mode,
            max_sources,
            include_citations,
            target_audience,
        })
    }
}
