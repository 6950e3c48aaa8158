//! Deep Research Tool
//!
//! This module wraps an external deep research capability behind a uniform
//! interface for the subject-matter researcher agent. Requests are
//! normalized into a canonical query, served from a per-instance cache when
//! possible, otherwise executed and rendered as a Markdown report. Failures
//! after normalization come back as readable troubleshooting text rather
//! than errors.

mod cache;
mod diagnostics;
mod error;
mod executor;
mod pipeline;
mod report;
mod request;

pub use cache::{ReportCache, cache_key};
pub use diagnostics::{describe_failure, troubleshooting_for};
pub use error::{ResearchError, UnknownModeError};
pub use executor::{ResearchExecutor, SimulatedResearchExecutor};
pub use pipeline::{DeepResearchTool, ResearchConfig, ResearchOutcome};
pub use report::{ResearchReport, Source};
pub use request::{
    DEFAULT_MAX_SOURCES, ResearchInput, ResearchMode, ResearchParams, ResearchQueryFields,
    ResearchRequest,
};
