//! Installer orchestration: make a working Nitro binary available locally.

use crate::cache::ToolCache;
use crate::extract;
use crate::release::ReleaseClient;
use nitro_action_core::{Error, Os, Platform, Result, SearchPath};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Cache key for the tool.
pub const TOOL_NAME: &str = "nitro";

/// Version selector sentinel resolved against release metadata.
pub const LATEST_SELECTOR: &str = "latest";

/// Provisions the Nitro CLI: cache lookup, download, extraction, permission
/// setup, and a launch self-check.
pub struct NitroInstaller {
    client: ReleaseClient,
    cache: ToolCache,
    platform: Platform,
}

impl NitroInstaller {
    /// Create an installer for the current host against the vendor endpoints.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: ReleaseClient::new(),
            cache: ToolCache::with_default_root(),
            platform: Platform::current()?,
        })
    }

    /// Create an installer from explicit parts (used by tests).
    #[must_use]
    pub fn with_parts(client: ReleaseClient, cache: ToolCache, platform: Platform) -> Self {
        Self {
            client,
            cache,
            platform,
        }
    }

    /// Ensure a working tool installation and return its directory.
    ///
    /// Idempotent per run. The cache lookup is keyed by the *requested*
    /// selector, so `latest` always re-resolves against release metadata
    /// even when the matching concrete version is already cached under its
    /// real tag. The returned directory is prepended to `search_path` so
    /// subsequent spawns can find the binary.
    pub async fn ensure_installed(
        &self,
        selector: &str,
        search_path: &mut SearchPath,
    ) -> Result<PathBuf> {
        info!(%selector, "Installing Nitro CLI");

        let tool_dir = match self.cache.find(TOOL_NAME, selector) {
            Some(dir) => dir,
            None => self.acquire(selector).await?,
        };

        search_path.prepend(tool_dir.clone());

        let binary_path = tool_dir.join(self.platform.binary_name());
        if self.platform.os != Os::Win {
            mark_executable(&binary_path)?;
        }

        self.self_check(search_path).await?;

        info!(dir = %tool_dir.display(), "Nitro CLI installed");
        Ok(tool_dir)
    }

    /// Cache-miss path: resolve, download, extract, and publish to the cache.
    async fn acquire(&self, selector: &str) -> Result<PathBuf> {
        let resolved = if selector == LATEST_SELECTOR {
            self.client.latest_tag().await?
        } else {
            selector.to_string()
        };

        info!(url = %self.client.download_url(&resolved, &self.platform), "Downloading release archive");
        let data = self.client.download(&resolved, &self.platform).await?;

        let staged = self.cache.staging_dir(TOOL_NAME, &resolved);
        extract::extract_zip(&data, &staged)?;
        self.cache.store(&staged, TOOL_NAME, &resolved)
    }

    /// Confirm the installed binary launches before the publish step runs.
    async fn self_check(&self, search_path: &SearchPath) -> Result<()> {
        let binary_name = self.platform.binary_name();
        let program = search_path
            .lookup(binary_name)
            .unwrap_or_else(|| PathBuf::from(binary_name));

        let output = Command::new(&program)
            .arg("--version")
            .env("PATH", search_path.joined())
            .output()
            .await
            .map_err(|e| {
                Error::self_check(format!("failed to launch {}: {}", program.display(), e))
            })?;

        if !output.status.success() {
            return Err(Error::self_check(format!(
                "`{} --version` exited with code {}",
                binary_name,
                output.status.code().unwrap_or(-1)
            )));
        }

        debug!(
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "Tool self-check passed"
        );
        Ok(())
    }
}

/// Mark the tool binary executable. No-op on Windows hosts.
fn mark_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .map_err(|e| Error::permission_setup(path.to_path_buf(), e))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
            .map_err(|e| Error::permission_setup(path.to_path_buf(), e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
