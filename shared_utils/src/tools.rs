//! External tool detection and invocation.
//!
//! Tools are invoked synchronously with both output streams captured. There is
//! no timeout: a tool that never exits blocks the caller.

use crate::errors::ToolError;
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// 外部命令执行结果
#[derive(Debug, Clone)]
pub struct ExternalCommandResult {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ExternalCommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Checks that `tool` can be started and answers `version_flag` with exit
/// status 0. Output of the version call is discarded.
///
/// Returns the resolved executable path when the search path lookup finds it,
/// otherwise the tool name as given.
pub fn check_tool_available(tool: &str, version_flag: &str) -> Result<PathBuf, ToolError> {
    let resolved = which::which(tool).ok();
    if let Some(ref path) = resolved {
        tracing::debug!(tool, path = ?path, "Resolved external tool");
    }

    let status = Command::new(tool)
        .arg(version_flag)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(resolved.unwrap_or_else(|| PathBuf::from(tool))),
        Ok(status) => Err(ToolError::VersionCheckFailed {
            tool: tool.to_string(),
            status: status.to_string(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ToolError::NotFound(tool.to_string())),
        Err(e) => Err(ToolError::Spawn {
            tool: tool.to_string(),
            source: e,
        }),
    }
}

/// Renders a command line for diagnostics. Not shell-quoted.
pub fn format_command_line<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

/// 执行外部命令
///
/// Runs `program` with `args`, waits for it and captures stdout and stderr as
/// (lossy) UTF-8 text. Spawn failures are returned as `io::Error` untouched so
/// callers can tell a missing executable (`ErrorKind::NotFound`) apart from
/// other I/O problems.
pub fn execute_external_command<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
) -> io::Result<ExternalCommandResult> {
    let start_time = Instant::now();

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()?;

    let result = ExternalCommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration: start_time.elapsed(),
    };

    log_external_tool(program, &result);
    Ok(result)
}

/// 记录外部工具调用
///
/// Success is recorded at DEBUG together with the raw output. Failures are
/// left to the caller, which knows which file the invocation belonged to.
pub fn log_external_tool(tool_name: &str, result: &ExternalCommandResult) {
    match result.exit_code {
        Some(0) => {
            tracing::debug!(
                tool = tool_name,
                duration_secs = result.duration.as_secs_f64(),
                "External tool completed successfully"
            );
            tracing::debug!("{} stdout:\n{}", tool_name, result.stdout);
            // ffmpeg writes its progress to stderr
            tracing::debug!("{} stderr:\n{}", tool_name, result.stderr);
        }
        Some(code) => {
            tracing::debug!(
                tool = tool_name,
                duration_secs = result.duration.as_secs_f64(),
                exit_code = code,
                "External tool failed"
            );
        }
        None => {
            tracing::debug!(
                tool = tool_name,
                duration_secs = result.duration.as_secs_f64(),
                "External tool terminated without exit code"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_command_line() {
        let line = format_command_line("ffmpeg", &["-i", "in.mp4", "out.apng"]);
        assert_eq!(line, "ffmpeg -i in.mp4 out.apng");
    }

    #[test]
    fn test_format_command_line_no_args() {
        let args: [&str; 0] = [];
        assert_eq!(format_command_line("ffmpeg", &args), "ffmpeg");
    }

    #[test]
    fn test_missing_tool_is_not_found() {
        let err = check_tool_available("nonexistent_command_xyz", "-version").unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == "nonexistent_command_xyz"));
    }

    #[test]
    fn test_execute_missing_command_reports_not_found() {
        let err = execute_external_command("nonexistent_command_xyz", &["arg1"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_external_command_captures_output() {
        let result = execute_external_command("sh", &["-c", "echo hello; echo oops >&2"]).unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
        assert_eq!(result.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_external_command_nonzero_exit() {
        let result = execute_external_command("sh", &["-c", "exit 3"]).unwrap();

        assert!(!result.success());
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_available_tool_passes_version_check() {
        // `true` ignores its arguments and exits 0
        assert!(check_tool_available("true", "-version").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_version_check() {
        let err = check_tool_available("false", "-version").unwrap_err();
        assert!(matches!(err, ToolError::VersionCheckFailed { .. }));
    }
}
