//! The boundary to whatever actually performs research.

use super::report::{ResearchReport, Source};
use super::request::ResearchRequest;
use anyhow::Result;
use tracing::info;

/// Defines the contract for any service that can research a topic.
///
/// The pipeline only depends on this interface, so a genuine multi-source
/// retrieval backend can replace the simulated one without touching caching
/// or formatting.
#[cfg_attr(test, mockall::automock)]
pub trait ResearchExecutor: Send + Sync {
    /// Researches the request and returns a structured report.
    fn execute(&self, request: &ResearchRequest) -> Result<ResearchReport>;
}

/// A `ResearchExecutor` that synthesizes a static report.
///
/// Used until a real research backend is wired in, and for development
/// without API costs. The report echoes the query and names the requested
/// mode; everything else is fixed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedResearchExecutor;

impl ResearchExecutor for SimulatedResearchExecutor {
    fn execute(&self, request: &ResearchRequest) -> Result<ResearchReport> {
        info!(mode = %request.research_mode, "Executing research");

        let report = ResearchReport {
            summary: format!("Comprehensive research analysis of: {}", request.query),
            key_findings: vec![
                format!("Key finding 1 related to {}", request.query),
                "Key finding 2 with supporting evidence".to_string(),
                "Key finding 3 with practical implications".to_string(),
            ],
            sources: vec![
                Source::new("Academic Source 1", "https://example.com/source1", "academic")
                    .with_relevance(0.95),
                Source::new("Industry Report", "https://example.com/source2", "industry")
                    .with_relevance(0.88),
            ],
            methodology: format!(
                "Multi-source analysis using {} methodology",
                request.research_mode
            ),
            confidence_score: 0.85,
            raw_output: Some(format!("Raw research output for: {}", request.query)),
        };

        info!(
            seconds = request.research_mode.expected_seconds(),
            "Research completed"
        );
        Ok(report)
    }
}
