use std::convert::Infallible;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::release::{GitHubAsset, GitHubRelease, installer_extension, select_installer_asset};
use crate::version::is_newer_version;

const RELEASES_URL: &str = "https://api.github.com/repos/alicekit/alicekit/releases/latest";
const USER_AGENT: &str = "alicekit";

/// Version compiled into this binary, compared against release tags.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Byte-level progress of one installer download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub percent: u8,
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Update request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Update endpoint returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Latest release has no downloadable assets")]
    NoReleaseAssets,

    #[error("No installer asset ending in '{extension}' in the latest release")]
    AssetNotFound { extension: &'static str },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

/// Checks the release endpoint and optionally replaces the running app.
///
/// Every call fetches the descriptor fresh; nothing is cached between calls.
/// The two check methods never fail: any transport or parse problem is logged
/// and reported as "no update", because an advisory check must not interrupt
/// normal operation.
pub struct UpdateChecker {
    client: reqwest::Client,
    releases_url: String,
    current_version: String,
}

impl UpdateChecker {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            releases_url: RELEASES_URL.to_string(),
            current_version: CURRENT_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_release_endpoint(mut self, url: impl Into<String>) -> Self {
        self.releases_url = url.into();
        self
    }

    #[must_use]
    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    /// Whether the release endpoint advertises a version newer than this
    /// build. Fails soft to `false`.
    pub async fn has_newer_version(&self) -> bool {
        match self.fetch_latest_release().await {
            Ok(release) => is_newer_version(&release.tag_name, &self.current_version),
            Err(error) => {
                warn!("Update check failed, assuming no update: {error}");
                false
            }
        }
    }

    /// Latest advertised version, without its `v` prefix. Fails soft to the
    /// current version.
    pub async fn latest_version(&self) -> String {
        match self.fetch_latest_release().await {
            Ok(release) => release
                .tag_name
                .strip_prefix('v')
                .unwrap_or(&release.tag_name)
                .to_string(),
            Err(error) => {
                warn!("Latest version lookup failed: {error}");
                self.current_version.clone()
            }
        }
    }

    /// Download the platform installer asset, launch it detached, and exit
    /// the current process.
    ///
    /// On success this never returns: the installer owns the rest of the
    /// update and the calling process ends unconditionally, whether or not
    /// the installer goes on to succeed. A failed download may leave a
    /// partial file in the temp directory.
    ///
    /// # Errors
    /// Returns `NoReleaseAssets` when the release carries no assets,
    /// `AssetNotFound` when no asset matches the platform installer
    /// extension, and `Network`/`HttpStatus`/`Io` for transport and
    /// filesystem failures.
    pub async fn download_and_launch_installer(
        &self,
        progress: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Result<Infallible, UpdateError> {
        let release = self.fetch_latest_release().await?;
        let asset = pick_installer_asset(&release, installer_extension())?;

        let installer_path = self.download_asset(asset, progress.as_ref()).await?;

        info!("Launching installer: {}", installer_path.display());
        open::that_detached(&installer_path)
            .map_err(|source| UpdateError::io("failed to launch installer", source))?;

        info!("Handing off to installer, exiting");
        std::process::exit(0);
    }

    async fn fetch_latest_release(&self) -> Result<GitHubRelease, UpdateError> {
        let response = self
            .client
            .get(&self.releases_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(UpdateError::Network)?;

        if !response.status().is_success() {
            return Err(UpdateError::HttpStatus(response.status()));
        }

        response.json().await.map_err(UpdateError::Network)
    }

    async fn download_asset(
        &self,
        asset: &GitHubAsset,
        progress: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<PathBuf, UpdateError> {
        use futures_util::StreamExt;

        info!("Downloading update from {}", asset.browser_download_url);

        let response = self
            .client
            .get(&asset.browser_download_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(UpdateError::Network)?;

        if !response.status().is_success() {
            return Err(UpdateError::HttpStatus(response.status()));
        }

        // Absent or zero Content-Length suppresses progress, not the download.
        let total = response.content_length().unwrap_or(0);
        let dest = std::env::temp_dir().join(sanitized_file_name(&asset.name));

        let mut file = tokio::fs::File::create(&dest)
            .await
            .map_err(|source| UpdateError::io("failed to create installer file", source))?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(UpdateError::Network)?;
            file.write_all(&chunk)
                .await
                .map_err(|source| UpdateError::io("failed to write installer data", source))?;
            downloaded += chunk.len() as u64;
            emit_progress(progress, downloaded, total).await;
        }

        file.flush()
            .await
            .map_err(|source| UpdateError::io("failed to flush installer file", source))?;

        info!("Download complete: {downloaded} bytes");
        Ok(dest)
    }
}

/// An empty asset list and a list with no matching installer are distinct
/// failures: the former means the release is unusable outright, the latter
/// that it carries nothing for this platform.
fn pick_installer_asset<'a>(
    release: &'a GitHubRelease,
    extension: &'static str,
) -> Result<&'a GitHubAsset, UpdateError> {
    if release.assets.is_empty() {
        return Err(UpdateError::NoReleaseAssets);
    }
    select_installer_asset(&release.assets, extension)
        .ok_or(UpdateError::AssetNotFound { extension })
}

/// Installer files land in the temp directory under the asset's own name;
/// anything path-like in that name is reduced to its final component.
fn sanitized_file_name(asset_name: &str) -> &str {
    Path::new(asset_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && !name.contains(".."))
        .unwrap_or("installer-download")
}

async fn emit_progress(
    sink: Option<&mpsc::Sender<DownloadProgress>>,
    downloaded: u64,
    total: u64,
) {
    if total == 0 {
        return;
    }
    let Some(sink) = sink else {
        return;
    };
    let percent = u8::try_from((downloaded * 100 / total).min(100)).unwrap_or(100);
    let _ = sink.send(DownloadProgress { percent }).await;
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::{
        DownloadProgress, UpdateChecker, UpdateError, emit_progress, pick_installer_asset,
        sanitized_file_name,
    };
    use crate::release::{GitHubAsset, GitHubRelease};

    // Nothing listens on the loopback discard port, so requests fail fast
    // without touching the network.
    const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9/releases/latest";

    fn unreachable_checker() -> UpdateChecker {
        UpdateChecker::new(reqwest::Client::new())
            .with_release_endpoint(UNREACHABLE_ENDPOINT)
            .with_current_version("1.0.0")
    }

    #[tokio::test]
    async fn has_newer_version_fails_soft_on_unreachable_endpoint() {
        assert!(!unreachable_checker().has_newer_version().await);
    }

    #[tokio::test]
    async fn latest_version_falls_back_to_current_on_unreachable_endpoint() {
        assert_eq!(unreachable_checker().latest_version().await, "1.0.0");
    }

    #[tokio::test]
    async fn progress_over_four_equal_chunks_is_monotonic_and_ends_at_100() {
        let (sender, mut receiver) = mpsc::channel(8);
        let total = 1000;

        let mut downloaded = 0;
        for _ in 0..4 {
            downloaded += 250;
            emit_progress(Some(&sender), downloaded, total).await;
        }
        drop(sender);

        let mut emitted = Vec::new();
        while let Some(DownloadProgress { percent }) = receiver.recv().await {
            emitted.push(percent);
        }

        assert_eq!(emitted, vec![25, 50, 75, 100]);
        assert!(emitted.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[tokio::test]
    async fn progress_is_suppressed_when_total_is_unknown() {
        let (sender, mut receiver) = mpsc::channel(8);

        emit_progress(Some(&sender), 250, 0).await;
        drop(sender);

        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn missing_sink_is_a_no_op() {
        emit_progress(None, 250, 1000).await;
    }

    #[tokio::test]
    async fn percent_is_floored_not_rounded() {
        let (sender, mut receiver) = mpsc::channel(1);

        emit_progress(Some(&sender), 999, 1000).await;

        assert_eq!(receiver.recv().await, Some(DownloadProgress { percent: 99 }));
    }

    fn release_with_assets(names: &[&str]) -> GitHubRelease {
        GitHubRelease {
            tag_name: "v2.0.0".to_string(),
            assets: names
                .iter()
                .map(|name| GitHubAsset {
                    name: (*name).to_string(),
                    browser_download_url: format!("https://example.invalid/{name}"),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_asset_list_fails_with_no_release_assets() {
        let release = release_with_assets(&[]);
        let result = pick_installer_asset(&release, ".exe");
        assert!(matches!(result, Err(UpdateError::NoReleaseAssets)));
    }

    #[test]
    fn assets_without_installer_fail_with_asset_not_found() {
        let release = release_with_assets(&["readme.txt", "checksums.txt"]);
        let result = pick_installer_asset(&release, ".exe");
        assert!(matches!(
            result,
            Err(UpdateError::AssetNotFound { extension: ".exe" })
        ));
    }

    #[test]
    fn first_matching_installer_asset_is_picked() {
        let release = release_with_assets(&["readme.txt", "app-setup.exe", "other.exe"]);
        let asset = pick_installer_asset(&release, ".exe").expect("installer should be found");
        assert_eq!(asset.name, "app-setup.exe");
    }

    #[test]
    fn sanitized_file_name_keeps_plain_names() {
        assert_eq!(sanitized_file_name("alicekit-setup.exe"), "alicekit-setup.exe");
    }

    #[test]
    fn sanitized_file_name_strips_path_components() {
        assert_eq!(sanitized_file_name("evil/../../setup.exe"), "setup.exe");
        assert_eq!(sanitized_file_name(".."), "installer-download");
        assert_eq!(sanitized_file_name(""), "installer-download");
    }
}
