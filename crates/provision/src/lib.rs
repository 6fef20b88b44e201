//! Nitro CLI provisioning for the publish step.
//!
//! Given a version selector this crate ensures a working tool binary is
//! present locally: cache lookup keyed by `(tool, version)`, lazy resolution
//! of the `latest` sentinel against the vendor's release metadata, archive
//! download and extraction, permission setup, and a `--version` self-check.

pub mod cache;
pub mod extract;
pub mod installer;
pub mod release;

pub use cache::ToolCache;
pub use installer::{LATEST_SELECTOR, NitroInstaller, TOOL_NAME};
pub use release::ReleaseClient;
