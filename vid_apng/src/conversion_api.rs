//! Per-file conversion: one synchronous ffmpeg invocation per input video.
//!
//! A failed file never aborts the run. Every failure is logged here with the
//! captured diagnostics and handed back as an [`InvocationResult`] variant.

use crate::config::RunConfig;
use crate::ffmpeg_args::{build_conversion_command, ConversionCommand};
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Source file and the animated image it is converted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConversionTask {
    /// Output is `export_dir/<input stem>.<output_extension>`.
    pub fn for_input(input: &Path, export_dir: &Path, output_extension: &str) -> Self {
        let mut file_name = input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "output".into());
        file_name.push(".");
        file_name.push(output_extension);

        Self {
            input_path: input.to_path_buf(),
            output_path: export_dir.join(file_name),
        }
    }

    pub fn input_name(&self) -> Cow<'_, str> {
        display_name(&self.input_path)
    }

    pub fn output_name(&self) -> Cow<'_, str> {
        display_name(&self.output_path)
    }
}

fn display_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

/// How a single invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    Success { stdout: String, stderr: String },
    /// The executable could not be found when the file was processed.
    ToolMissing,
    /// `code` is `None` when the tool was killed by a signal.
    NonZeroExit { code: Option<i32>, stderr: String },
    UnexpectedError(String),
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub task: ConversionTask,
    pub result: InvocationResult,
}

impl ConversionOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_success()
    }

    /// Captured error stream or error message, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match &self.result {
            InvocationResult::Success { .. } | InvocationResult::ToolMissing => None,
            InvocationResult::NonZeroExit { stderr, .. } => Some(stderr.as_str()),
            InvocationResult::UnexpectedError(message) => Some(message.as_str()),
        }
    }

    /// One-line reason recorded in the run summary.
    pub fn failure_reason(&self, tool: &str) -> Option<String> {
        match &self.result {
            InvocationResult::Success { .. } => None,
            InvocationResult::ToolMissing => Some(format!("{} command not found", tool)),
            InvocationResult::NonZeroExit { code: Some(code), .. } => {
                Some(format!("{} exited with status {}", tool, code))
            }
            InvocationResult::NonZeroExit { code: None, .. } => {
                Some(format!("{} terminated by signal", tool))
            }
            InvocationResult::UnexpectedError(message) => Some(message.clone()),
        }
    }
}

/// Runs a built command and classifies the result. Blocks until the tool
/// exits.
pub fn invoke(command: &ConversionCommand) -> InvocationResult {
    match shared_utils::execute_external_command(&command.program, command.args.as_slice()) {
        Ok(result) if result.success() => InvocationResult::Success {
            stdout: result.stdout,
            stderr: result.stderr,
        },
        Ok(result) => InvocationResult::NonZeroExit {
            code: result.exit_code,
            stderr: result.stderr,
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => InvocationResult::ToolMissing,
        Err(e) => InvocationResult::UnexpectedError(e.to_string()),
    }
}

/// Converts one video and logs the result.
pub fn convert_file(config: &RunConfig, task: &ConversionTask) -> ConversionOutcome {
    let tool = config.tool.as_str();
    let input_name = task.input_name();

    info!("🎬 Starting conversion for: {}", input_name);
    debug!("Input path: {}", task.input_path.display());
    debug!("Output path: {}", task.output_path.display());

    let command = build_conversion_command(
        tool,
        &task.input_path,
        &task.output_path,
        config.tool_options.as_slice(),
    );
    debug!("Executing command: {}", command.display());

    let result = invoke(&command);
    match &result {
        InvocationResult::Success { .. } => {
            info!(
                "✅ Successfully converted '{}' to '{}'",
                input_name,
                task.output_name()
            );
        }
        InvocationResult::ToolMissing => {
            error!("❌ Error converting {}: {} command not found.", input_name, tool);
        }
        InvocationResult::NonZeroExit { code, stderr } => {
            match code {
                Some(code) => error!(
                    "❌ Error converting {}. {} exited with status {}.",
                    input_name, tool, code
                ),
                None => error!(
                    "❌ Error converting {}. {} was terminated by a signal.",
                    input_name, tool
                ),
            }
            error!("{} stderr:\n{}", tool, stderr);
        }
        InvocationResult::UnexpectedError(message) => {
            error!(
                "❌ An unexpected error occurred during conversion of {}: {}",
                input_name, message
            );
        }
    }

    ConversionOutcome {
        task: task.clone(),
        result,
    }
}
