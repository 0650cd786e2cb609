use std::path::PathBuf;

/// Environment variable that overrides the alice-tools directory.
pub const TOOLS_DIR_ENV: &str = "ALICE_TOOLS_PATH";

const TOOLS_SUBDIR: &str = "alice-tools";

/// Resolve the directory the alice-tools executables live in.
///
/// The `ALICE_TOOLS_PATH` environment variable wins; otherwise the tools are
/// expected in an `alice-tools/` directory next to the running executable.
#[must_use]
pub fn tools_dir() -> PathBuf {
    resolve_tools_dir(
        std::env::var_os(TOOLS_DIR_ENV).map(PathBuf::from),
        std::env::current_exe().ok(),
    )
}

#[must_use]
pub fn resolve_tools_dir(env_override: Option<PathBuf>, current_exe: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_override {
        return dir;
    }

    current_exe
        .and_then(|exe| exe.parent().map(|dir| dir.join(TOOLS_SUBDIR)))
        .unwrap_or_else(|| PathBuf::from(TOOLS_SUBDIR))
}
