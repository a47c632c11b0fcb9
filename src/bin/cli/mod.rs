//! CLI Module Organization
//!
//! - args: CLI argument structures and value enums
//! - commands: command execution logic
//! - config_builder: layering of defaults, config file and flags

pub mod args;
pub mod commands;
pub mod config_builder;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
