use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating or starting an external tool.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("External tool not found: {0}")]
    NotFound(String),

    #[error("External tool '{tool}' failed its version check ({status})")]
    VersionCheckFailed { tool: String, status: String },

    #[error("Failed to start external tool '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// Run-aborting errors. Per-file conversion failures are not errors at this
/// level; they are counted in the batch result instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    ToolUnavailable(#[from] ToolError),

    #[error("Source directory not found: {}", .0.display())]
    SourceDirMissing(PathBuf),

    #[error("Source path is not a directory: {}", .0.display())]
    SourceNotADirectory(PathBuf),

    #[error("Failed to create export directory {}: {}", path.display(), source)]
    ExportDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve base directory {}: {}", path.display(), source)]
    BaseDirResolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
