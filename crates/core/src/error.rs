//! Error types shared across the nitro-action workspace.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the workspace error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nitro-action operations.
///
/// Every variant is fatal for the current run. Nothing is retried
/// internally; re-runs are the surrounding pipeline's concern.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The host operating system is not one the tool vendor publishes for.
    #[error("Unsupported platform: {value}")]
    #[diagnostic(code(nitro_action::platform::unsupported_os))]
    UnsupportedPlatform {
        /// The raw OS identifier that failed to resolve
        value: String,
    },

    /// The host CPU architecture is not one the tool vendor publishes for.
    #[error("Unsupported architecture: {value}")]
    #[diagnostic(code(nitro_action::platform::unsupported_arch))]
    UnsupportedArchitecture {
        /// The raw architecture identifier that failed to resolve
        value: String,
    },

    /// Resolving the "latest" selector to a concrete release tag failed.
    #[error("Failed to resolve tool version: {message}")]
    #[diagnostic(code(nitro_action::provision::version_resolution))]
    VersionResolutionFailed {
        /// What went wrong during the metadata fetch or parse
        message: String,
    },

    /// Downloading or extracting the tool archive failed.
    #[error("Failed to acquire tool: {message}")]
    #[diagnostic(code(nitro_action::provision::acquisition))]
    ToolAcquisitionFailed {
        /// What went wrong during download or extraction
        message: String,
    },

    /// Marking the tool binary executable failed.
    #[error("Failed to mark {} executable: {source}", path.display())]
    #[diagnostic(code(nitro_action::provision::permissions))]
    PermissionSetupFailed {
        /// The binary path whose permissions could not be set
        path: Box<Path>,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The freshly installed tool did not launch or exited non-zero.
    #[error("Tool self-check failed: {message}")]
    #[diagnostic(code(nitro_action::provision::self_check))]
    SelfCheckFailed {
        /// Launch error or exit status description
        message: String,
    },

    /// A required input was not supplied by the pipeline host.
    #[error("Missing required input: {name}")]
    #[diagnostic(
        code(nitro_action::config::missing_input),
        help("Set the `{name}` input in the step configuration")
    )]
    MissingConfiguration {
        /// The input name as declared in the step configuration
        name: String,
    },

    /// The configured working directory cannot be used.
    #[error("Cannot use working directory {}: {message}", path.display())]
    #[diagnostic(code(nitro_action::publish::working_directory))]
    WorkingDirectoryChangeFailed {
        /// The directory that was requested
        path: Box<Path>,
        /// Why it is unusable
        message: String,
    },

    /// The publish invocation could not be launched at all.
    #[error("Failed to launch publish invocation: {message}")]
    #[diagnostic(code(nitro_action::publish::launch))]
    PublishLaunchFailed {
        /// Spawn error description
        message: String,
    },

    /// The publish invocation exited non-zero.
    #[error("Publish failed with exit code {exit_code}")]
    #[diagnostic(code(nitro_action::publish::failed))]
    PublishFailed {
        /// The tool's exit code (-1 when terminated by a signal)
        exit_code: i32,
    },

    /// I/O error with operation context.
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(nitro_action::io))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Description of the operation that failed
        operation: String,
    },
}

impl Error {
    /// Create an unsupported-platform error carrying the raw value.
    #[must_use]
    pub fn unsupported_platform(value: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            value: value.into(),
        }
    }

    /// Create an unsupported-architecture error carrying the raw value.
    #[must_use]
    pub fn unsupported_architecture(value: impl Into<String>) -> Self {
        Self::UnsupportedArchitecture {
            value: value.into(),
        }
    }

    /// Create a version-resolution error.
    #[must_use]
    pub fn version_resolution(message: impl Into<String>) -> Self {
        Self::VersionResolutionFailed {
            message: message.into(),
        }
    }

    /// Create a tool-acquisition error.
    #[must_use]
    pub fn tool_acquisition(message: impl Into<String>) -> Self {
        Self::ToolAcquisitionFailed {
            message: message.into(),
        }
    }

    /// Create a permission-setup error for a binary path.
    #[must_use]
    pub fn permission_setup(path: PathBuf, source: std::io::Error) -> Self {
        Self::PermissionSetupFailed {
            path: path.into_boxed_path(),
            source,
        }
    }

    /// Create a self-check error.
    #[must_use]
    pub fn self_check(message: impl Into<String>) -> Self {
        Self::SelfCheckFailed {
            message: message.into(),
        }
    }

    /// Create a missing-configuration error naming the absent input.
    #[must_use]
    pub fn missing_configuration(name: impl Into<String>) -> Self {
        Self::MissingConfiguration { name: name.into() }
    }

    /// Create a working-directory error.
    #[must_use]
    pub fn working_directory(path: PathBuf, message: impl Into<String>) -> Self {
        Self::WorkingDirectoryChangeFailed {
            path: path.into_boxed_path(),
            message: message.into(),
        }
    }

    /// Create a publish-launch error.
    #[must_use]
    pub fn publish_launch(message: impl Into<String>) -> Self {
        Self::PublishLaunchFailed {
            message: message.into(),
        }
    }

    /// Create a publish-failed error from a process exit code.
    #[must_use]
    pub fn publish_failed(exit_code: i32) -> Self {
        Self::PublishFailed { exit_code }
    }

    /// Create an I/O error with operation context.
    #[must_use]
    pub fn io(source: std::io::Error, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            operation: operation.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            operation: "i/o".to_string(),
        }
    }
}
