use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine cache directory")]
    CacheDirUnavailable,
}

pub struct AppPaths {
    pub cache_dir: PathBuf,
}

impl AppPaths {
    /// Build application paths for the current platform.
    ///
    /// # Errors
    /// Returns an error when the base cache directory cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        #[cfg(target_os = "macos")]
        {
            let home = dirs::home_dir().ok_or(AppPathsError::HomeDirUnavailable)?;
            Ok(Self {
                cache_dir: home.join("Library/Caches/alicekit"),
            })
        }

        #[cfg(not(target_os = "macos"))]
        {
            Ok(Self {
                cache_dir: dirs::cache_dir()
                    .ok_or(AppPathsError::CacheDirUnavailable)?
                    .join("alicekit"),
            })
        }
    }

    /// Create the directories this struct points at, if missing.
    ///
    /// # Errors
    /// Returns an error when a directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.cache_dir)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.cache_dir.join("alicekit.log")
    }
}
