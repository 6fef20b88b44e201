//! Client for the tool vendor's release endpoints.
//!
//! Two operations: resolve the `latest` sentinel to a concrete release tag
//! via the release-listing endpoint, and download a platform-specific
//! archive from the templated asset URL. Both are single attempts; any
//! failure is fatal for the run.

use nitro_action_core::{Error, Platform, Result};
use serde::Deserialize;
use tracing::debug;

/// Release-listing endpoint base for the vendor repository.
pub const DEFAULT_API_BASE: &str = "https://api.github.com/repos/ChilliCream/graphql-platform";

/// Release-asset download base for the vendor repository.
pub const DEFAULT_DOWNLOAD_BASE: &str =
    "https://github.com/ChilliCream/graphql-platform/releases/download";

/// Release metadata from the listing endpoint.
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// HTTP client for release metadata and asset downloads.
pub struct ReleaseClient {
    client: reqwest::Client,
    api_base: String,
    download_base: String,
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseClient {
    /// Create a client against the vendor's production endpoints.
    ///
    /// # Panics
    ///
    /// `reqwest::Client::builder().build()` only fails on TLS backend
    /// initialization, which cannot happen with default settings; the panic
    /// indicates a fundamental environment issue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_API_BASE, DEFAULT_DOWNLOAD_BASE)
    }

    /// Create a client against explicit endpoints (used by tests).
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_urls(api_base: impl Into<String>, download_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("nitro-action")
                .build()
                .expect("Failed to create HTTP client - TLS backend initialization failed"),
            api_base: api_base.into(),
            download_base: download_base.into(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);

        // Attach a token when the pipeline provides one; avoids rate limits.
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            request = request.header("Authorization", format!("Bearer {}", token));
        } else if let Ok(token) = std::env::var("GH_TOKEN") {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }

    /// Resolve the `latest` sentinel to a concrete release tag.
    ///
    /// Exactly one metadata fetch; network and parse failures propagate as
    /// [`Error::VersionResolutionFailed`].
    pub async fn latest_tag(&self) -> Result<String> {
        let url = format!("{}/releases/latest", self.api_base);
        debug!(%url, "Fetching latest release metadata");

        let response = self.get(&url).send().await.map_err(|e| {
            Error::version_resolution(format!("failed to fetch release metadata: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(Error::version_resolution(format!(
                "release metadata request returned HTTP {}",
                response.status()
            )));
        }

        let release: Release = response.json().await.map_err(|e| {
            Error::version_resolution(format!("failed to parse release metadata: {}", e))
        })?;

        debug!(tag = %release.tag_name, "Resolved latest release");
        Ok(release.tag_name)
    }

    /// Deterministic download URL for a version and platform.
    #[must_use]
    pub fn download_url(&self, version: &str, platform: &Platform) -> String {
        format!(
            "{}/{}/{}",
            self.download_base,
            version,
            platform.asset_name()
        )
    }

    /// Download the release archive for a version and platform.
    pub async fn download(&self, version: &str, platform: &Platform) -> Result<Vec<u8>> {
        let url = self.download_url(version, platform);
        debug!(%url, "Downloading release asset");

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::tool_acquisition(format!("failed to download archive: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::tool_acquisition(format!(
                "archive download returned HTTP {} for {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| Error::tool_acquisition(format!("failed to read archive body: {}", e)))
    }
}
