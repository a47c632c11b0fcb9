//! CLI Command Implementations
//!
//! - compare: matrix over text files, plus single-pair scoring
//! - config: configuration management and metric listing

pub mod compare;
pub mod config;

pub use compare::{compare_command, score_command};
pub use config::{list_metrics, print_default_config, validate_config};
