//! Step outputs and failure reporting through the pipeline host.
//!
//! The host consumes outputs via the file named by `GITHUB_OUTPUT`, PATH
//! additions for later steps via `GITHUB_PATH`, and failure annotations via
//! workflow commands on stdout. When the corresponding variable is unset
//! (local runs), writers degrade to a debug log instead of failing.

use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tracing::debug;

fn append_line(env_var: &str, line: &str) -> Result<()> {
    let Ok(path) = std::env::var(env_var) else {
        debug!(%env_var, %line, "Host file not declared; skipping");
        return Ok(());
    };

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::io(e, format!("open {env_var} file")))?;
    writeln!(file, "{line}").map_err(|e| Error::io(e, format!("append to {env_var} file")))?;
    Ok(())
}

/// Publish a named step output.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    debug!(%name, %value, "Setting step output");
    append_line("GITHUB_OUTPUT", &format!("{name}={value}"))
}

/// Make a directory visible on the search path of later pipeline steps.
pub fn add_path(dir: &Path) -> Result<()> {
    debug!(dir = %dir.display(), "Adding directory to pipeline PATH");
    append_line("GITHUB_PATH", &dir.display().to_string())
}

/// Mark the step failed with a human-readable message.
///
/// Emits the host's `::error::` annotation; the caller is responsible for
/// exiting non-zero.
pub fn set_failed(message: &str) {
    // Workflow command output is the one place stdout is the contract.
    #[allow(clippy::print_stdout)]
    {
        println!("::error::{}", escape_data(message));
    }
}

/// Escape a workflow command data value per the host's encoding rules.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_back(file: &tempfile::NamedTempFile) -> String {
        let mut contents = String::new();
        std::fs::File::open(file.path())
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        contents
    }

    #[test]
    fn test_set_output_appends_name_value_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        temp_env::with_var("GITHUB_OUTPUT", Some(file.path()), || {
            set_output("success", "true").unwrap();
            set_output("schema-id", "abc-123").unwrap();
        });
        assert_eq!(read_back(&file), "success=true\nschema-id=abc-123\n");
    }

    #[test]
    fn test_set_output_noop_without_host_file() {
        temp_env::with_var("GITHUB_OUTPUT", None::<&str>, || {
            set_output("success", "true").unwrap();
        });
    }

    #[test]
    fn test_add_path_appends_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        temp_env::with_var("GITHUB_PATH", Some(file.path()), || {
            add_path(Path::new("/opt/tools/nitro")).unwrap();
        });
        assert_eq!(read_back(&file), "/opt/tools/nitro\n");
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("a%b"), "a%25b");
        assert_eq!(escape_data("line1\nline2"), "line1%0Aline2");
        assert_eq!(escape_data("cr\rlf\n"), "cr%0Dlf%0A");
    }
}
