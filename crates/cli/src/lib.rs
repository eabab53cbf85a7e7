//! nacosctl - Nacos configuration management from the command line.
//!
//! The binary stays thin: argument parsing, settings persistence, and
//! rendering live here; everything protocol-shaped is in `nacos-client`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod settings;
