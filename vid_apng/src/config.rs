//! Build-time configuration.
//!
//! Directory names, extensions and the ffmpeg option list are fixed here and
//! are not exposed as runtime flags. Only the base directory they are resolved
//! against can change.

use std::path::{Path, PathBuf};

/// Directory holding the input videos, relative to the base directory.
pub const MP4_SOURCE_DIR: &str = "mp4";
/// Directory receiving the animated PNGs, relative to the base directory.
pub const APNG_EXPORT_DIR: &str = "export";
pub const LOG_FILE: &str = "conversion.log";

pub const INPUT_EXTENSION: &str = "mp4";
pub const OUTPUT_EXTENSION: &str = "apng";

pub const FFMPEG_TOOL: &str = "ffmpeg";
pub const FFMPEG_VERSION_FLAG: &str = "-version";
pub const FFMPEG_INPUT_FLAG: &str = "-i";

/// Options placed between the input and the output path:
/// - `fps=15`: 15 frames per second
/// - `scale=320:-1`: width 320, height follows the aspect ratio
/// - `flags=lanczos`: lanczos resampling
/// - `-plays 0`: loop forever
/// - `-f apng`: force the APNG muxer
/// - `-y`: overwrite existing output without asking
pub const FFMPEG_OPTIONS: &[&str] = &[
    "-vf",
    "fps=15,scale=320:-1:flags=lanczos",
    "-plays",
    "0",
    "-f",
    "apng",
    "-y",
];

/// Everything a run needs, resolved against one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub base_dir: PathBuf,
    pub source_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub input_extension: String,
    pub output_extension: String,
    pub tool: String,
    pub version_flag: String,
    pub tool_options: Vec<String>,
}

impl RunConfig {
    pub fn for_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        Self {
            source_dir: base_dir.join(MP4_SOURCE_DIR),
            export_dir: base_dir.join(APNG_EXPORT_DIR),
            log_file: base_dir.join(LOG_FILE),
            input_extension: INPUT_EXTENSION.to_string(),
            output_extension: OUTPUT_EXTENSION.to_string(),
            tool: FFMPEG_TOOL.to_string(),
            version_flag: FFMPEG_VERSION_FLAG.to_string(),
            tool_options: FFMPEG_OPTIONS.iter().map(|s| s.to_string()).collect(),
            base_dir,
        }
    }

    /// Replaces the executable that is invoked. The option list is unchanged.
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = tool.into();
        self
    }
}

/// Directory containing the running executable, so the layout does not depend
/// on the current working directory.
pub fn executable_base_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        )
    })
}
