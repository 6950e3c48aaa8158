//! Command handlers behind the CLI.
//!
//! Each handler returns the text to print so the binary stays a thin
//! dispatcher.

use crate::cli::{InputsArgs, ResearchArgs};
use crate::config::Config;
use anyhow::{Context, Result};
use curriculum_core::inputs::{CourseInputs, RawCourseInputs};
use curriculum_core::package::{ContentWriter, FileOrganizer, OVERVIEW_DIR, ZipCreator};
use curriculum_core::research::{DeepResearchTool, ResearchInput, ResearchOutcome, ResearchParams};
use curriculum_core::tools::CurriculumToolService;
use rmcp::{ServiceExt, transport::stdio};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Runs one research request through a fresh pipeline.
pub fn research(config: &Config, args: ResearchArgs) -> Result<ResearchOutcome> {
    let input = if args.json {
        let value: serde_json::Value =
            serde_json::from_str(&args.query).context("QUERY is not valid JSON")?;
        ResearchInput::try_from(value)?
    } else {
        ResearchInput::Text(args.query)
    };
    let mut params = ResearchParams::default()
        .with_mode(args.mode)
        .with_max_sources(args.max_sources)
        .with_citations(!args.no_citations);
    params.target_audience = args.audience;

    let mut tool = DeepResearchTool::simulated(config.research.clone());
    Ok(tool.run(input, &params)?)
}

/// Validates and saves course inputs, optionally seeding the course
/// overview with a research report.
pub fn inputs(config: &Config, args: InputsArgs) -> Result<String> {
    let inputs = CourseInputs::try_from(RawCourseInputs {
        topic: args.topic,
        duration: args.duration,
        sessions: args.sessions,
        session_duration: args.session_duration,
        project_based: args.project_based,
        audience_level: args.audience,
    })?;
    let saved = inputs.save(&config.output_dir)?;
    let mut message = format!("Saved course inputs to {}", saved.display());

    if args.with_research {
        let (input, params) = inputs.research_input();
        let outcome = DeepResearchTool::simulated(config.research.clone()).run(input, &params)?;
        if !outcome.is_success() {
            warn!("Research for course overview failed");
            return Ok(format!("{}\n{}", message, outcome.text()));
        }
        let overview = FileOrganizer::new(&config.output_dir)
            .course_root(&inputs.topic)
            .join(OVERVIEW_DIR)
            .join("research_report.md");
        let written = ContentWriter.write_to(&overview, outcome.text(), Some("md"))?;
        message.push_str(&format!(
            "\nSaved research report to {}",
            written.path.display()
        ));
    }
    Ok(message)
}

pub fn organize(config: &Config, topic: &str, structure: &Path) -> Result<String> {
    let raw = fs::read_to_string(structure)
        .with_context(|| format!("Failed to read {}", structure.display()))?;
    let structure: serde_json::Value =
        serde_json::from_str(&raw).context("Course structure is not valid JSON")?;
    let layout = FileOrganizer::new(&config.output_dir).organize(topic, &structure)?;
    Ok(format!(
        "Successfully created curriculum folder structure for '{}' at {}",
        topic,
        layout.root.display()
    ))
}

pub fn zip(config: &Config, source: &Path, name: &str) -> Result<String> {
    let summary = ZipCreator::new(&config.output_dir).create(source, name)?;
    if summary.files == 0 {
        return Ok(format!(
            "Warning: No files found in source directory {}",
            source.display()
        ));
    }
    Ok(format!(
        "Successfully created zip file with {} files: {}",
        summary.files,
        summary.path.display()
    ))
}

pub fn write(path: &str, content_file: &Path, file_type: Option<&str>) -> Result<String> {
    let content = fs::read_to_string(content_file)
        .with_context(|| format!("Failed to read {}", content_file.display()))?;
    let written = ContentWriter.write(path, &content, file_type)?;
    Ok(format!(
        "Successfully wrote {} characters to {}",
        written.characters,
        written.path.display()
    ))
}

/// Builds the MCP tool service the agent crew talks to.
pub fn tool_service(config: &Config) -> CurriculumToolService {
    let research = if config.deep_research_available() {
        info!("Deep research tool enabled");
        Some(DeepResearchTool::simulated(config.research.clone()))
    } else {
        warn!("Deep research tool not available - missing API keys");
        warn!("Required: OPENAI_API_KEY or ANTHROPIC_API_KEY");
        None
    };
    CurriculumToolService::new(research, &config.output_dir)
}

/// Serves the curriculum tools over stdio until the client disconnects.
pub async fn serve(config: &Config) -> Result<()> {
    let service = tool_service(config)
        .serve(stdio())
        .await
        .context("Failed to start MCP server on stdio")?;
    info!("Curriculum tools are being served over stdio");
    let reason = service.waiting().await?;
    info!(?reason, "MCP session ended");
    Ok(())
}
