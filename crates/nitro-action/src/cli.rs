//! Command-line surface for the step binary.
//!
//! Step configuration itself arrives through the pipeline host's `INPUT_*`
//! environment convention; the flags here are operational knobs for local
//! runs and debugging.

use crate::trace::{LogFormat, LogLevel};
use clap::Parser;
use std::path::PathBuf;

/// Provision the Nitro CLI and publish a GraphQL Fusion schema.
#[derive(Debug, Parser)]
#[command(name = "nitro-action", version, about)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "NITRO_ACTION_LOG")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, env = "NITRO_ACTION_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Override the tool cache directory
    #[arg(long, env = "NITRO_ACTION_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Parse process arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
