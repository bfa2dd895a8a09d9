//! ffmpeg command construction.
//!
//! Building the argument list is kept free of I/O so it can be checked without
//! starting a process.

use crate::config::FFMPEG_INPUT_FLAG;
use std::ffi::OsString;
use std::path::Path;

/// A fully built invocation: `program -i <input> <options...> <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ConversionCommand {
    pub fn display(&self) -> String {
        shared_utils::format_command_line(&self.program, self.args.as_slice())
    }
}

pub fn build_conversion_command<S: AsRef<str>>(
    program: &str,
    input: &Path,
    output: &Path,
    options: &[S],
) -> ConversionCommand {
    let mut args: Vec<OsString> = Vec::with_capacity(options.len() + 3);
    args.push(FFMPEG_INPUT_FLAG.into());
    args.push(input.as_os_str().to_os_string());
    args.extend(options.iter().map(|o| OsString::from(o.as_ref())));
    args.push(output.as_os_str().to_os_string());

    ConversionCommand {
        program: program.to_string(),
        args,
    }
}
