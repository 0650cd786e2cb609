mod paths;
mod tools_dir;

pub use paths::{AppPaths, AppPathsError};
pub use tools_dir::{TOOLS_DIR_ENV, resolve_tools_dir, tools_dir};
