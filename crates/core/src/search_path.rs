//! Scoped search-path context for spawned processes.
//!
//! Instead of mutating the process-global `PATH`, provisioning records its
//! additions in this value and every spawn injects the joined result into
//! the child's environment. Prepends are stack-like: the most recent
//! insertion wins lookup.

use std::ffi::OsString;
use std::path::PathBuf;
use tracing::warn;

/// An ordered view of the executable search path for child processes.
#[derive(Debug, Clone)]
pub struct SearchPath {
    /// Prepended entries, in insertion order.
    entries: Vec<PathBuf>,
    /// The ambient value the context was seeded from.
    base: OsString,
}

impl SearchPath {
    /// Seed from the ambient `PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_base(std::env::var_os("PATH").unwrap_or_default())
    }

    /// Seed from an explicit base value.
    #[must_use]
    pub fn with_base(base: OsString) -> Self {
        Self {
            entries: Vec::new(),
            base,
        }
    }

    /// Prepend a directory. Later insertions take priority over earlier ones.
    pub fn prepend(&mut self, dir: PathBuf) {
        self.entries.push(dir);
    }

    /// The joined value to inject as the child's `PATH`.
    #[must_use]
    pub fn joined(&self) -> OsString {
        let paths = self
            .entries
            .iter()
            .rev()
            .cloned()
            .chain(std::env::split_paths(&self.base));
        match std::env::join_paths(paths) {
            Ok(joined) => joined,
            Err(e) => {
                warn!(error = %e, "Search-path entry contains a separator; falling back to ambient PATH");
                self.base.clone()
            }
        }
    }

    /// Locate an executable by file name, prepended entries first.
    #[must_use]
    pub fn lookup(&self, binary_name: &str) -> Option<PathBuf> {
        self.entries
            .iter()
            .rev()
            .cloned()
            .chain(std::env::split_paths(&self.base))
            .map(|dir| dir.join(binary_name))
            .find(|candidate| candidate.is_file())
    }
}
