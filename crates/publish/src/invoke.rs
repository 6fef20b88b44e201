//! Tool invocation and result interpretation.

use crate::request::PublishRequest;
use nitro_action_core::{Error, Result, SearchPath};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::{debug, info};

/// Outcome of a successful publish invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub success: bool,
    /// Extracted from the tool's output when present.
    pub schema_id: Option<String>,
}

#[allow(clippy::expect_used)]
static SCHEMA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Schema ID: ([A-Za-z0-9-]+)").expect("valid literal pattern"));

fn binary_name() -> &'static str {
    if cfg!(windows) { "nitro.exe" } else { "nitro" }
}

/// Run `nitro fusion publish` for the request, single attempt.
///
/// The credential travels only through the child's environment
/// (`NITRO_API_KEY` merged over the inherited ambient environment), and the
/// working directory is scoped to the child rather than this process. The
/// child's captured output is what gets scanned for the schema ID.
///
/// # Errors
///
/// A non-zero exit maps to [`Error::PublishFailed`] carrying the exit code;
/// a launch failure maps to [`Error::PublishLaunchFailed`]. Both are
/// publish-phase failures the orchestrator reports through the `success`
/// output.
pub async fn invoke(request: &PublishRequest, search_path: &SearchPath) -> Result<PublishResult> {
    let args = request.args();
    let program = search_path
        .lookup(binary_name())
        .unwrap_or_else(|| PathBuf::from(binary_name()));

    info!("Publishing GraphQL schema");
    // Command echo mirrors what runs; the credential is not part of argv.
    debug!(command = %format!("nitro {}", args.join(" ")), "Invoking tool");

    let output = Command::new(&program)
        .args(&args)
        .current_dir(&request.working_directory)
        .env("PATH", search_path.joined())
        .env("NITRO_API_KEY", &request.api_key)
        .output()
        .await
        .map_err(|e| {
            Error::publish_launch(format!("failed to launch {}: {}", program.display(), e))
        })?;

    let captured = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if !output.status.success() {
        return Err(Error::publish_failed(output.status.code().unwrap_or(-1)));
    }

    let schema_id = extract_schema_id(&captured);
    info!(schema_id = ?schema_id, "Schema published successfully");
    Ok(PublishResult {
        success: true,
        schema_id,
    })
}

/// Scan captured tool output for a `Schema ID: <token>` line.
#[must_use]
pub fn extract_schema_id(output: &str) -> Option<String> {
    SCHEMA_ID
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
}
