//! Release checking and self-update.
//!
//! Queries a GitHub-style latest-release endpoint, compares dotted-numeric
//! versions, and streams the platform installer asset to the temp directory
//! before handing execution off to it. Version checks are advisory and fail
//! soft; the download path surfaces hard errors.

mod checker;
mod release;
mod version;

pub use checker::{CURRENT_VERSION, DownloadProgress, UpdateChecker, UpdateError};
pub use release::{GitHubAsset, GitHubRelease, installer_extension, select_installer_asset};
pub use version::{compare_versions, is_newer_version};
