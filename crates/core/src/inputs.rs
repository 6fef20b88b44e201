//! Step configuration read from the pipeline host.
//!
//! The host exposes each declared input as an `INPUT_<NAME>` environment
//! variable (name upper-cased, spaces replaced with underscores, hyphens
//! preserved). Everything is read once into a typed struct at entry;
//! required fields are validated immediately and optional fields get their
//! documented defaults.

use crate::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Default publish target host.
pub const DEFAULT_CLOUD_URL: &str = "api.chillicream.com";

/// Default tool version selector.
pub const DEFAULT_VERSION: &str = "latest";

/// Environment variable name for a declared input.
#[must_use]
pub fn env_name(input: &str) -> String {
    format!("INPUT_{}", input.replace(' ', "_").to_uppercase())
}

/// Read a single input, trimmed; empty values count as unset.
#[must_use]
pub fn get_input(name: &str) -> Option<String> {
    std::env::var(env_name(name))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(name: &str) -> Result<String> {
    get_input(name).ok_or_else(|| Error::missing_configuration(name))
}

/// All step inputs, populated once per run.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// Publish tag (required).
    pub tag: String,
    /// Deployment stage (required).
    pub stage: String,
    /// Target API identifier (required).
    pub api_id: String,
    /// Credential; only ever passed to the tool via its environment.
    pub api_key: String,
    /// Tool version selector, possibly the `latest` sentinel.
    pub nitro_version: String,
    /// Publish target host.
    pub cloud_url: String,
    /// Directory the publish invocation runs from.
    pub working_directory: PathBuf,
    /// Single schema file path, used only when the multi-file input is empty.
    pub source_schema_file: Option<String>,
    /// Newline-delimited schema file list; takes strict precedence.
    pub source_schema_files: Option<String>,
}

impl ActionInputs {
    /// Read and validate all inputs from the host environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] naming the first absent
    /// required input. Nothing is spawned before this validation runs.
    pub fn from_env() -> Result<Self> {
        let inputs = Self {
            tag: require("tag")?,
            stage: require("stage")?,
            api_id: require("api-id")?,
            api_key: require("api-key")?,
            nitro_version: get_input("nitro-version")
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            cloud_url: get_input("cloud-url").unwrap_or_else(|| DEFAULT_CLOUD_URL.to_string()),
            working_directory: get_input("working-directory")
                .map_or_else(|| PathBuf::from("."), PathBuf::from),
            source_schema_file: get_input("source-schema-file"),
            source_schema_files: get_input("source-schema-files"),
        };

        debug!(
            tag = %inputs.tag,
            stage = %inputs.stage,
            api_id = %inputs.api_id,
            nitro_version = %inputs.nitro_version,
            cloud_url = %inputs.cloud_url,
            working_directory = %inputs.working_directory.display(),
            "Resolved step inputs"
        );

        Ok(inputs)
    }
}
