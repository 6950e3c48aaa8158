//! Curriculum Creator Core
//!
//! Building blocks for the curriculum creator crew: the deep research
//! pipeline used by the subject-matter researcher, the course package tools
//! used by the course structure organizer, validated course inputs, and the
//! MCP service that offers these tools to agents.

pub mod inputs;
pub mod package;
pub mod research;
pub mod tools;
