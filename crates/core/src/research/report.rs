//! Structured research results and their Markdown rendering.
//!
//! Downstream consumers locate content in the rendered report by header
//! text, so the headers and their order must not change.

use super::error::ResearchError;
use serde::{Deserialize, Serialize};

/// A single cited source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl Source {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source_type: source_type.into(),
            relevance_score: None,
        }
    }

    pub fn with_relevance(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }
}

/// The structured outcome of a research run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub sources: Vec<Source>,
    pub methodology: String,
    /// Confidence in the findings, between 0 and 1.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl ResearchReport {
    /// Checks that the report can be rendered.
    pub fn validate(&self) -> Result<(), ResearchError> {
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(ResearchError::Formatting(format!(
                "confidence score {} is outside [0, 1]",
                self.confidence_score
            )));
        }
        if let Some(position) = self
            .sources
            .iter()
            .position(|s| s.title.trim().is_empty() || s.url.trim().is_empty())
        {
            return Err(ResearchError::Formatting(format!(
                "source {} is missing a title or URL",
                position + 1
            )));
        }
        Ok(())
    }

    /// Renders the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = Vec::new();

        output.push("# Research Report\n".to_string());
        output.push(format!("## Executive Summary\n{}\n", self.summary));

        output.push("## Key Findings\n".to_string());
        for (i, finding) in self.key_findings.iter().enumerate() {
            output.push(format!("{}. {}", i + 1, finding));
        }
        output.push(String::new());

        output.push(format!("## Methodology\n{}\n", self.methodology));

        if !self.sources.is_empty() {
            output.push("## Sources\n".to_string());
            for source in &self.sources {
                let relevance = source
                    .relevance_score
                    .map_or_else(|| "N/A".to_string(), |score| format!("{:?}", score));
                output.push(format!("- **{}**", source.title));
                output.push(format!("  - URL: {}", source.url));
                output.push(format!("  - Type: {}", source.source_type));
                output.push(format!("  - Relevance: {}", relevance));
            }
            output.push(String::new());
        }

        output.push(format!(
            "## Confidence Score\n{:.2}%\n",
            self.confidence_score * 100.0
        ));

        if let Some(raw) = self.raw_output.as_deref().filter(|raw| !raw.is_empty()) {
            output.push("## Raw Research Output\n".to_string());
            output.push(format!("```\n{}\n```\n", raw));
        }

        output.join("\n")
    }
}
