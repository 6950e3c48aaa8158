//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "creator", version, about = "Curriculum creator tooling: deep research, course inputs and packaging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run deep research on a topic and print the report.
    Research(ResearchArgs),
    /// Validate course parameters and save them to the output directory.
    Inputs(InputsArgs),
    /// Create the course folder structure from a JSON description.
    Organize {
        /// The main topic of the curriculum.
        #[arg(long)]
        topic: String,
        /// JSON file mapping modules to weeks to sessions.
        #[arg(long)]
        structure: PathBuf,
    },
    /// Zip a course folder into the output directory.
    Zip {
        /// Folder to archive.
        #[arg(long)]
        source: PathBuf,
        /// Archive name without the .zip extension.
        #[arg(long)]
        name: String,
    },
    /// Write a content file into the course tree.
    Write {
        /// Destination path; an extension is added if missing.
        #[arg(long)]
        path: String,
        /// File whose contents are written.
        #[arg(long)]
        content_file: PathBuf,
        /// md, txt, html, json, yaml or yml.
        #[arg(long)]
        file_type: Option<String>,
    },
    /// Serve the curriculum tools over MCP on stdio.
    Serve,
}

#[derive(Args, Debug)]
pub struct ResearchArgs {
    /// The research topic, or a JSON query when --json is given.
    pub query: String,
    /// Treat QUERY as JSON (a string or an object with 'query').
    #[arg(long)]
    pub json: bool,
    /// quick, deep or academic.
    #[arg(long, default_value = "deep")]
    pub mode: String,
    #[arg(long, default_value_t = curriculum_core::research::DEFAULT_MAX_SOURCES)]
    pub max_sources: u32,
    /// Leave citations out of the research.
    #[arg(long)]
    pub no_citations: bool,
    #[arg(long)]
    pub audience: Option<String>,
}

#[derive(Args, Debug)]
pub struct InputsArgs {
    #[arg(long)]
    pub topic: String,
    /// Course length, e.g. "8 weeks".
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub sessions: String,
    /// Length of each session, e.g. "90 minutes".
    #[arg(long)]
    pub session_duration: String,
    /// yes or no.
    #[arg(long)]
    pub project_based: String,
    /// e.g. "Computer Engineers" or "Non-tech".
    #[arg(long)]
    pub audience: String,
    /// Also research the topic and save the report in the course overview.
    #[arg(long)]
    pub with_research: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_research_defaults() {
        let cli = Cli::try_parse_from(["creator", "research", "Rust"]).unwrap();
        match cli.command {
            Command::Research(args) => {
                assert_eq!(args.query, "Rust");
                assert_eq!(args.mode, "deep");
                assert_eq!(args.max_sources, 20);
                assert!(!args.no_citations && !args.json);
                assert_eq!(args.audience, None);
            }
            other => panic!("Expected research command, got {:?}", other),
        }
    }

    #[test]
    fn test_zip_requires_name() {
        assert!(Cli::try_parse_from(["creator", "zip", "--source", "output/Rust"]).is_err());
    }
}
