//! Curriculum Creator Service Library
//!
//! Configuration, command-line definitions and command handlers for the
//! `creator` binary, which is a thin wrapper around this library.

pub mod cli;
pub mod commands;
pub mod config;
