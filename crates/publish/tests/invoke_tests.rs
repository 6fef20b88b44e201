//! Publish invocation against a stand-in tool binary.

#![cfg(unix)]

use nitro_action_core::{ActionInputs, Error, SearchPath};
use nitro_action_publish::{PublishRequest, invoke};
use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Drop a fake `nitro` script into a directory and return a search path
/// that resolves it.
fn fake_nitro(dir: &Path, script: &str) -> SearchPath {
    let binary = dir.join("nitro");
    std::fs::write(&binary, script).unwrap();
    let mut perms = std::fs::metadata(&binary).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&binary, perms).unwrap();

    let mut search_path = SearchPath::with_base(OsString::new());
    search_path.prepend(dir.to_path_buf());
    search_path
}

fn request() -> PublishRequest {
    PublishRequest::from_inputs(&ActionInputs {
        tag: "v1.0.0".to_string(),
        stage: "production".to_string(),
        api_id: "api-42".to_string(),
        api_key: "s3cret".to_string(),
        nitro_version: "latest".to_string(),
        cloud_url: "api.chillicream.com".to_string(),
        working_directory: PathBuf::from("."),
        source_schema_file: None,
        source_schema_files: None,
    })
    .unwrap()
}

#[tokio::test]
async fn success_with_schema_id_in_captured_output() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = fake_nitro(dir.path(), "#!/bin/sh\necho \"Schema ID: abc-123\"\n");

    let result = invoke(&request(), &search_path).await.unwrap();
    assert!(result.success);
    assert_eq!(result.schema_id.as_deref(), Some("abc-123"));
}

#[tokio::test]
async fn success_without_schema_id() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = fake_nitro(dir.path(), "#!/bin/sh\necho \"published\"\n");

    let result = invoke(&request(), &search_path).await.unwrap();
    assert!(result.success);
    assert!(result.schema_id.is_none());
}

#[tokio::test]
async fn schema_id_on_stderr_is_still_found() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = fake_nitro(dir.path(), "#!/bin/sh\necho \"Schema ID: err-9\" >&2\n");

    let result = invoke(&request(), &search_path).await.unwrap();
    assert_eq!(result.schema_id.as_deref(), Some("err-9"));
}

#[tokio::test]
async fn nonzero_exit_maps_to_publish_failed() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = fake_nitro(dir.path(), "#!/bin/sh\nexit 7\n");

    let error = invoke(&request(), &search_path).await.unwrap_err();
    match error {
        Error::PublishFailed { exit_code } => assert_eq!(exit_code, 7),
        other => panic!("Expected PublishFailed, got {other}"),
    }
}

#[tokio::test]
async fn missing_binary_is_a_publish_phase_failure() {
    // No tool anywhere on the search path: the spawn itself fails, and that
    // must surface as a publish-phase error, not a generic I/O error.
    let search_path = SearchPath::with_base(OsString::new());

    let error = invoke(&request(), &search_path).await.unwrap_err();
    assert!(matches!(error, Error::PublishLaunchFailed { .. }));
}

#[tokio::test]
async fn credential_reaches_child_environment_only() {
    let dir = tempfile::tempdir().unwrap();
    // The script fails unless the key arrived via the environment, and
    // fails if the key ever shows up among its arguments.
    let script = "#!/bin/sh\n\
                  [ \"$NITRO_API_KEY\" = \"s3cret\" ] || exit 40\n\
                  for arg in \"$@\"; do [ \"$arg\" = \"s3cret\" ] && exit 41; done\n\
                  exit 0\n";
    let search_path = fake_nitro(dir.path(), script);

    let result = invoke(&request(), &search_path).await.unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn child_runs_in_configured_working_directory() {
    let tool_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();

    // The fake exits non-zero unless it was started from the requested
    // directory.
    let script = format!(
        "#!/bin/sh\n[ \"$(pwd -P)\" = \"{}\" ] || exit 50\nexit 0\n",
        work_dir.path().canonicalize().unwrap().display()
    );
    let search_path = fake_nitro(tool_dir.path(), &script);

    let mut request = request();
    request.working_directory = work_dir.path().to_path_buf();

    let result = invoke(&request, &search_path).await.unwrap();
    assert!(result.success);
}
