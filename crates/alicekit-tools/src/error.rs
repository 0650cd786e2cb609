use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool executable not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Tool exited with code {code}: {stderr}")]
    ExecutionFailed { code: i32, stderr: String },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ToolError;

    #[test]
    fn not_found_display_includes_path() {
        let error = ToolError::NotFound {
            path: PathBuf::from("/opt/alice-tools/alice-ar"),
        };
        assert_eq!(
            error.to_string(),
            "Tool executable not found: /opt/alice-tools/alice-ar"
        );
    }

    #[test]
    fn execution_failed_display_includes_stderr() {
        let error = ToolError::ExecutionFailed {
            code: 2,
            stderr: "unknown archive format\n".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Tool exited with code 2: unknown archive format\n"
        );
    }
}
