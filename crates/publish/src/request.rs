//! Publish request construction and argument policy.

use nitro_action_core::{ActionInputs, Error, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a single `fusion publish` invocation needs, constructed once
/// from step configuration and not mutated afterward.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub tag: String,
    pub stage: String,
    pub api_id: String,
    /// Credential; injected into the child environment, never into argv.
    pub api_key: String,
    pub cloud_url: String,
    /// Directory the child runs from. Validated at construction; ambient
    /// process state is never mutated.
    pub working_directory: PathBuf,
    /// Schema file paths in invocation order.
    pub schema_files: Vec<String>,
}

impl PublishRequest {
    /// Build a request from validated step inputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkingDirectoryChangeFailed`] when the configured
    /// working directory does not exist or is not a directory. This runs
    /// before anything is spawned.
    pub fn from_inputs(inputs: &ActionInputs) -> Result<Self> {
        let working_directory = inputs.working_directory.clone();
        if !working_directory.is_dir() {
            return Err(Error::working_directory(
                working_directory,
                "not an existing directory",
            ));
        }
        if working_directory != PathBuf::from(".") {
            info!(dir = %working_directory.display(), "Publishing from working directory");
        }

        let schema_files = select_schema_files(
            inputs.source_schema_files.as_deref(),
            inputs.source_schema_file.as_deref(),
        );

        Ok(Self {
            tag: inputs.tag.clone(),
            stage: inputs.stage.clone(),
            api_id: inputs.api_id.clone(),
            api_key: inputs.api_key.clone(),
            cloud_url: inputs.cloud_url.clone(),
            working_directory,
            schema_files,
        })
    }

    /// The full argument list for the tool, in fixed order. The credential
    /// is deliberately absent.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "fusion".to_string(),
            "publish".to_string(),
            "--tag".to_string(),
            self.tag.clone(),
            "--stage".to_string(),
            self.stage.clone(),
            "--api-id".to_string(),
            self.api_id.clone(),
            "--cloud-url".to_string(),
            self.cloud_url.clone(),
        ];
        for file in &self.schema_files {
            args.push("--source-schema-file".to_string());
            args.push(file.clone());
        }
        args
    }
}

/// Input-selection policy for schema files.
///
/// The newline-delimited multi-file input takes strict precedence when it
/// contains any non-blank entry; otherwise the single-file input contributes
/// at most one path. The two are never merged.
fn select_schema_files(multi: Option<&str>, single: Option<&str>) -> Vec<String> {
    if let Some(multi) = multi {
        let files: Vec<String> = multi
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if !files.is_empty() {
            info!(count = files.len(), "Adding schema files");
            return files;
        }
    }

    if let Some(single) = single {
        info!(file = %single, "Adding single schema file");
        return vec![single.to_string()];
    }

    debug!("No schema file inputs set");
    Vec::new()
}
