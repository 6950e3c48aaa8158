//! The deep research tool: normalize, look up, execute, format, cache.

use super::cache::{ReportCache, cache_key};
use super::diagnostics::describe_failure;
use super::error::ResearchError;
use super::executor::{ResearchExecutor, SimulatedResearchExecutor};
use super::request::{ResearchInput, ResearchParams, ResearchRequest};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Construction-time settings for [`DeepResearchTool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchConfig {
    pub cache_enabled: bool,
    /// Declared budget for a single research run. Not enforced.
    pub research_timeout: Duration,
    /// Declared retry budget. Not enforced.
    pub max_retries: u32,
    /// Location of the research service's compose file, when one is deployed.
    pub docker_compose_path: Option<PathBuf>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            research_timeout: Duration::from_secs(1800),
            max_retries: 3,
            docker_compose_path: None,
        }
    }
}

/// What a research call produced.
///
/// Both variants carry the text handed back to agents; the variant itself
/// lets callers tell success from failure without parsing the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchOutcome {
    /// A formatted Markdown report.
    Report { text: String, cached: bool },
    /// A classified diagnostic explaining why research failed.
    Failed { diagnostic: String },
}

impl ResearchOutcome {
    pub fn text(&self) -> &str {
        match self {
            ResearchOutcome::Report { text, .. } => text,
            ResearchOutcome::Failed { diagnostic } => diagnostic,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ResearchOutcome::Report { text, .. } => text,
            ResearchOutcome::Failed { diagnostic } => diagnostic,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResearchOutcome::Report { .. })
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, ResearchOutcome::Report { cached: true, .. })
    }
}

impl fmt::Display for ResearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Wraps a [`ResearchExecutor`] with request normalization, report
/// formatting, per-instance caching and error classification.
pub struct DeepResearchTool {
    executor: Box<dyn ResearchExecutor>,
    cache: ReportCache,
    config: ResearchConfig,
}

impl DeepResearchTool {
    /// Creates a tool around `executor`.
    ///
    /// A configured compose file that does not exist is reported but does
    /// not prevent construction.
    pub fn new(config: ResearchConfig, executor: Box<dyn ResearchExecutor>) -> Self {
        if let Some(path) = &config.docker_compose_path {
            if !path.exists() {
                warn!(path = %path.display(), "Docker compose file not found");
                warn!("Make sure the research service is properly set up");
            }
        }
        debug!(
            cache_enabled = config.cache_enabled,
            timeout_secs = config.research_timeout.as_secs(),
            max_retries = config.max_retries,
            "Deep research tool configured"
        );

        Self {
            executor,
            cache: ReportCache::new(config.cache_enabled),
            config,
        }
    }

    /// Creates a tool backed by [`SimulatedResearchExecutor`].
    pub fn simulated(config: ResearchConfig) -> Self {
        Self::new(config, Box::new(SimulatedResearchExecutor))
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Runs research for a caller-supplied query.
    ///
    /// Malformed input is returned as an error. Every later failure is
    /// folded into [`ResearchOutcome::Failed`].
    pub fn run(
        &mut self,
        input: impl Into<ResearchInput>,
        params: &ResearchParams,
    ) -> Result<ResearchOutcome, ResearchError> {
        let request = ResearchRequest::normalize(input.into(), params)?;
        Ok(self.research(&request))
    }

    /// Async entry point. Delegates to [`DeepResearchTool::run`] without
    /// yielding.
    pub async fn run_async(
        &mut self,
        input: impl Into<ResearchInput>,
        params: &ResearchParams,
    ) -> Result<ResearchOutcome, ResearchError> {
        self.run(input, params)
    }

    /// Runs research for an already normalized request.
    pub fn research(&mut self, request: &ResearchRequest) -> ResearchOutcome {
        let key = cache_key(request);
        if let Some(cached) = self.cache.lookup(&key) {
            info!("Returning cached research result");
            return ResearchOutcome::Report {
                text: cached.to_string(),
                cached: true,
            };
        }

        info!(
            query = %request.query,
            mode = %request.research_mode,
            timeout_secs = self.config.research_timeout.as_secs(),
            "Starting deep research"
        );
        match self.execute_and_format(request) {
            Ok(text) => {
                if self.cache.is_enabled() {
                    self.cache.store(key.clone(), text.clone());
                    debug!(cache_key = %key, "Cached research result");
                }
                ResearchOutcome::Report {
                    text,
                    cached: false,
                }
            }
            Err(e) => {
                let error_text = e.to_string();
                error!(error = %error_text, "Deep research failed");
                ResearchOutcome::Failed {
                    diagnostic: describe_failure(&error_text),
                }
            }
        }
    }

    fn execute_and_format(&self, request: &ResearchRequest) -> Result<String, ResearchError> {
        let report = self
            .executor
            .execute(request)
            .map_err(ResearchError::Execution)?;
        report.validate()?;
        Ok(report.to_markdown())
    }
}
