use std::path::PathBuf;
use std::process::Stdio;

use log::{debug, error, info, trace};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::args::split_arguments;
use crate::error::ToolError;

/// Captured output of one completed tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub exit_code: i32,
}

/// Runs alice-tools executables out of a resolved tools directory.
///
/// Each `run` call is one process lifecycle with its own buffers; concurrent
/// calls share nothing and may interleave freely. There is no retry and no
/// timeout, so a hung tool blocks its caller indefinitely.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    tools_dir: PathBuf,
}

impl ToolRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools_dir: alicekit_platform::tools_dir(),
        }
    }

    #[must_use]
    pub fn with_tools_dir(tools_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
        }
    }

    #[must_use]
    pub fn tool_path(&self, tool_name: &str) -> PathBuf {
        self.tools_dir
            .join(format!("{tool_name}{}", std::env::consts::EXE_SUFFIX))
    }

    /// Run a tool with a shell-style argument string and capture its output.
    ///
    /// # Errors
    /// Returns `ToolError::NotFound` when the resolved executable does not
    /// exist (checked before any spawn), `ToolError::ExecutionFailed` with the
    /// captured stderr when the tool exits non-zero, and `ToolError::Io` when
    /// the process cannot be spawned or its streams cannot be read.
    pub async fn run(&self, tool_name: &str, arguments: &str) -> Result<ToolOutput, ToolError> {
        let tool_path = self.tool_path(tool_name);

        if !tool_path.exists() {
            error!("Tool executable missing: {}", tool_path.display());
            return Err(ToolError::NotFound { path: tool_path });
        }

        info!("Executing tool: {tool_name} {arguments}");

        let mut child = Command::new(&tool_path)
            .args(split_arguments(arguments))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::io("failed to spawn tool process", source))?;

        // Drain both pipes concurrently; waiting on one stream before reading
        // the other deadlocks once the unread pipe's OS buffer fills.
        let stdout_task = tokio::spawn(collect_lines(child.stdout.take()));
        let stderr_task = tokio::spawn(collect_lines(child.stderr.take()));

        let status = child
            .wait()
            .await
            .map_err(|source| ToolError::io("failed to wait for tool process", source))?;
        let stdout = join_capture(stdout_task, "stdout").await?;
        let stderr = join_capture(stderr_task, "stderr").await?;

        let exit_code = status.code().unwrap_or(-1);
        debug!("{tool_name} exited with code {exit_code}");
        trace!("{tool_name} stdout: {stdout}");
        if !stderr.is_empty() {
            trace!("{tool_name} stderr: {stderr}");
        }

        if status.success() {
            debug!("{tool_name} succeeded, output: {} bytes", stdout.len());
            Ok(ToolOutput { stdout, exit_code })
        } else {
            error!("{tool_name} failed: code={exit_code}, stderr='{stderr}'");
            Err(ToolError::ExecutionFailed {
                code: exit_code,
                stderr,
            })
        }
    }
}

impl Default for ToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

async fn join_capture(
    task: tokio::task::JoinHandle<std::io::Result<String>>,
    stream: &'static str,
) -> Result<String, ToolError> {
    match task.await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(source)) => Err(ToolError::Io {
            context: "failed to read tool output stream",
            source: std::io::Error::new(source.kind(), format!("{stream}: {source}")),
        }),
        Err(join_error) => Err(ToolError::io(
            "tool output capture task failed",
            std::io::Error::other(join_error),
        )),
    }
}

/// Read a stream line by line, re-terminating each line with `\n` so the
/// captured text uses one line-ending convention regardless of what the tool
/// emitted.
async fn collect_lines<R>(stream: Option<R>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return Ok(String::new());
    };

    let mut lines = BufReader::new(stream).lines();
    let mut text = String::new();
    while let Some(line) = lines.next_line().await? {
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ToolRunner, collect_lines};

    #[tokio::test]
    async fn collect_lines_normalizes_crlf_endings() {
        let captured = collect_lines(Some(&b"first\r\nsecond\nthird"[..]))
            .await
            .expect("in-memory stream should be readable");
        assert_eq!(captured, "first\nsecond\nthird\n");
    }

    #[tokio::test]
    async fn collect_lines_handles_missing_stream() {
        let captured = collect_lines(Option::<&[u8]>::None)
            .await
            .expect("absent stream should capture nothing");
        assert_eq!(captured, "");
    }

    #[test]
    fn tool_path_appends_platform_executable_suffix() {
        let runner = ToolRunner::with_tools_dir("/opt/alice-tools");
        let expected = PathBuf::from("/opt/alice-tools")
            .join(format!("alice-ar{}", std::env::consts::EXE_SUFFIX));
        assert_eq!(runner.tool_path("alice-ar"), expected);
    }
}
