//! vid-apng - Batch MP4 → animated PNG conversion
//!
//! Converts every `.mp4` file in `<base>/mp4` into a looping 15 fps, 320 px
//! wide APNG in `<base>/export` by shelling out to ffmpeg, one file at a time.
//!
//! ```rust,ignore
//! use vid_apng::{run, RunConfig};
//!
//! let config = RunConfig::for_base_dir("/path/to/base");
//! let report = run(&config)?;
//! std::process::exit(report.exit_code() as i32);
//! ```

pub mod config;
pub mod conversion_api;
pub mod ffmpeg_args;
pub mod orchestrator;

#[cfg(all(test, unix))]
mod test_support;

pub use config::{executable_base_dir, RunConfig};
pub use conversion_api::{convert_file, ConversionOutcome, ConversionTask, InvocationResult};
pub use ffmpeg_args::{build_conversion_command, ConversionCommand};
pub use orchestrator::{run, RunReport, RunStatus, EXIT_FAILURE, EXIT_SUCCESS};

pub use shared_utils::errors::{ConvertError, Result};
