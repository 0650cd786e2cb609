use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

/// File extension the platform installer asset is expected to carry.
#[must_use]
pub fn installer_extension() -> &'static str {
    if cfg!(target_os = "windows") {
        ".exe"
    } else if cfg!(target_os = "macos") {
        ".dmg"
    } else {
        ".AppImage"
    }
}

/// Pick the first asset whose name ends with the given installer extension.
#[must_use]
pub fn select_installer_asset<'a>(
    assets: &'a [GitHubAsset],
    extension: &str,
) -> Option<&'a GitHubAsset> {
    assets.iter().find(|asset| asset.name.ends_with(extension))
}
