use std::{io, path::Path, process::Stdio, time::Duration};
use thiserror::Error;
use tokio::process::Command;

/// Captured output of a finished external tool.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit code, or `None` if the process died to a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to spawn `{tool}`")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("`{tool}` did not finish within {seconds} seconds")]
    Timeout { tool: String, seconds: u64 },
}

/// Runs `tool` against `path`, capturing its output.
///
/// The invocation is bounded by `timeout`: an unresponsive tool is killed
/// and reported as [`ToolError::Timeout`].
pub async fn run_tool(tool: &str, path: &Path, timeout: Duration) -> Result<ToolOutput, ToolError> {
    let mut command = cascade! {
        Command::new(tool);
        ..arg(path);
        ..stdout(Stdio::piped());
        ..stderr(Stdio::piped());
        ..kill_on_drop(true);
    };

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| ToolError::Timeout { tool: tool.to_owned(), seconds: timeout.as_secs() })?
        .map_err(|source| ToolError::Spawn { tool: tool.to_owned(), source })?;

    Ok(ToolOutput {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_status() {
        let output = run_tool("echo", Path::new("hello"), Duration::from_secs(5)).await.unwrap();

        assert_eq!(output.status, Some(0));
        assert_eq!(output.stdout.trim_end(), "hello");
    }

    #[tokio::test]
    async fn missing_tool_is_a_spawn_error() {
        let why = run_tool("fedora-media-check-no-such-tool", Path::new("x"), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(why, ToolError::Spawn { .. }));
    }

    #[tokio::test]
    async fn unresponsive_tool_times_out() {
        let why =
            run_tool("sleep", Path::new("5"), Duration::from_millis(100)).await.unwrap_err();

        assert!(matches!(why, ToolError::Timeout { .. }));
    }
}
