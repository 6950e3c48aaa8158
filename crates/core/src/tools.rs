//! Curriculum Tool Service
//!
//! This module exposes the deep research pipeline and the course package
//! tools to agents over the Model Context Protocol (MCP). Each tool answers
//! with plain text, which is what the agent crew feeds back into its task
//! context.

use crate::package::{ContentWriter, FileOrganizer, PackageError, ZipCreator};
use crate::research::{DeepResearchTool, ResearchInput, ResearchParams};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

// --- Data Structures for Tools ---

/// Arguments for the `deep_research` tool.
///
/// `research_query` is either a topic string, which the other arguments
/// qualify, or a self-contained object with `query` and optional overrides.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct DeepResearchArgs {
    /// The research topic, or a structured query object.
    #[schemars(description = "The research topic as text, or an object with 'query' and optional overrides")]
    pub research_query: serde_json::Value,
    #[schemars(description = "Research mode: 'quick', 'deep', or 'academic'")]
    pub research_mode: Option<String>,
    #[schemars(description = "Maximum number of sources to analyze")]
    pub max_sources: Option<u32>,
    #[schemars(description = "Whether to include citations")]
    pub include_citations: Option<bool>,
    #[schemars(description = "Target audience for the research")]
    pub target_audience: Option<String>,
}

impl DeepResearchArgs {
    fn params(&self) -> ResearchParams {
        let mut params = ResearchParams::default();
        if let Some(mode) = &self.research_mode {
            params.research_mode = mode.clone();
        }
        if let Some(max_sources) = self.max_sources {
            params.max_sources = max_sources;
        }
        if let Some(include_citations) = self.include_citations {
            params.include_citations = include_citations;
        }
        params.target_audience = self.target_audience.clone();
        params
    }
}

/// Arguments for the `organize_curriculum` tool.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct OrganizeCurriculumArgs {
    /// The main topic of the curriculum.
    pub topic: String,
    /// Modules mapped to weeks mapped to sessions.
    #[schemars(description = "Object of modules, each an object of weeks, each an object of sessions")]
    pub content_structure: serde_json::Value,
}

/// Arguments for the `create_zip` tool.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateZipArgs {
    /// Path to the folder to be zipped.
    pub source_path: String,
    /// Name for the output zip file, without the .zip extension.
    pub zip_name: String,
}

/// Arguments for the `write_content` tool.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct WriteContentArgs {
    /// Path where the file should be created.
    pub file_path: String,
    /// Content to write to the file.
    pub content: String,
    #[schemars(description = "File extension: md, txt, html, json, yaml or yml")]
    pub file_type: Option<String>,
}

// --- Service and Handler Implementation ---

/// The MCP service offering curriculum tools to the agent crew.
pub struct CurriculumToolService {
    /// Shared research pipeline; `None` when no LLM provider is configured.
    research: Option<Arc<Mutex<DeepResearchTool>>>,
    organizer: FileOrganizer,
    zipper: ZipCreator,
    writer: ContentWriter,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for CurriculumToolService {
    /// Returns server information and capabilities, advertising tool support.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tool_router]
impl CurriculumToolService {
    /// Creates the service. Course folders and archives go under
    /// `output_root`.
    pub fn new(research: Option<DeepResearchTool>, output_root: impl Into<PathBuf>) -> Self {
        let output_root = output_root.into();
        Self {
            research: research.map(|tool| Arc::new(Mutex::new(tool))),
            organizer: FileOrganizer::new(output_root.clone()),
            zipper: ZipCreator::new(output_root),
            writer: ContentWriter,
            tool_router: Self::tool_router(),
        }
    }

    pub fn research_available(&self) -> bool {
        self.research.is_some()
    }

    /// Runs deep research and returns the Markdown report.
    ///
    /// Research failures come back as successful tool output carrying
    /// troubleshooting text; only a malformed query is a tool error.
    #[tool(
        description = "Conduct comprehensive deep research on a topic. Modes: 'quick' (basic information), 'deep' (multiple sources), 'academic' (scholarly, rigorous methodology). Returns a Markdown research report."
    )]
    pub async fn deep_research(&self, args: Parameters<DeepResearchArgs>) -> Result<String, String> {
        info!(args = ?args.0, "Executing tool 'deep_research'");
        let Some(research) = &self.research else {
            return Err(
                "Deep research is not available: set OPENAI_API_KEY or ANTHROPIC_API_KEY"
                    .to_string(),
            );
        };

        let params = args.0.params();
        let input = ResearchInput::try_from(args.0.research_query).map_err(|e| e.to_string())?;
        let mut tool = research.lock().await;
        tool.run_async(input, &params)
            .await
            .map(|outcome| outcome.into_text())
            .map_err(|e| e.to_string())
    }

    /// Creates the module/week/session folder tree for a course.
    #[tool(
        description = "Organize curriculum files into the folder structure Topic/Module/Week/Session with Classwork and Homework folders."
    )]
    pub async fn organize_curriculum(
        &self,
        args: Parameters<OrganizeCurriculumArgs>,
    ) -> Result<String, String> {
        info!(topic = %args.0.topic, "Executing tool 'organize_curriculum'");
        self.organizer
            .organize(&args.0.topic, &args.0.content_structure)
            .map(|layout| {
                format!(
                    "Successfully created curriculum folder structure for '{}' at {}",
                    args.0.topic,
                    layout.root.display()
                )
            })
            .map_err(|e| e.to_string())
    }

    /// Packs a course folder into a zip archive.
    #[tool(description = "Create a zip file from a curriculum folder for easy distribution.")]
    pub async fn create_zip(&self, args: Parameters<CreateZipArgs>) -> Result<String, String> {
        info!(source = %args.0.source_path, "Executing tool 'create_zip'");
        let source = Path::new(&args.0.source_path);
        match self.zipper.create(source, &args.0.zip_name) {
            Ok(summary) if summary.files == 0 => Ok(format!(
                "Warning: No files found in source directory {}",
                source.display()
            )),
            Ok(summary) => Ok(format!(
                "Successfully created zip file with {} files: {}",
                summary.files,
                summary.path.display()
            )),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Writes one content file into the course tree.
    #[tool(
        description = "Write curriculum content to a file in the organized folder structure, creating folders as needed."
    )]
    pub async fn write_content(&self, args: Parameters<WriteContentArgs>) -> Result<String, String> {
        info!(path = %args.0.file_path, "Executing tool 'write_content'");
        let WriteContentArgs {
            file_path,
            content,
            file_type,
        } = args.0;
        self.writer
            .write(&file_path, &content, file_type.as_deref())
            .map(|written| {
                format!(
                    "Successfully wrote {} characters to {}",
                    written.characters,
                    written.path.display()
                )
            })
            .map_err(|e: PackageError| e.to_string())
    }
}
