//! Core types and pipeline-host plumbing for the nitro-action workspace.
//!
//! This crate carries everything the other members share:
//!
//! - [`Error`]/[`Result`]: the workspace error taxonomy
//! - [`platform`]: host OS/arch resolution in the tool vendor's naming
//! - [`inputs`]: typed step configuration read from the host's `INPUT_*`
//!   environment convention
//! - [`outputs`]: step outputs, PATH additions, and failure annotations
//! - [`SearchPath`]: scoped search-path context for spawned processes

pub mod error;
pub mod inputs;
pub mod outputs;
pub mod platform;
pub mod search_path;

pub use error::{Error, Result};
pub use inputs::ActionInputs;
pub use platform::{Arch, Os, Platform};
pub use search_path::SearchPath;
