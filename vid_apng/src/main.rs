use anyhow::Context;
use clap::{Parser, ValueEnum};
use shared_utils::logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

use vid_apng::{executable_base_dir, run, ConvertError, RunConfig, EXIT_FAILURE};

#[derive(Parser)]
#[command(name = "vid-apng")]
#[command(version, about = "Batch MP4 → animated PNG converter (ffmpeg)", long_about = None)]
struct Cli {
    /// Directory holding `mp4/`; `export/` and `conversion.log` are created
    /// next to it. Defaults to the directory of this executable.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Print debug output (raw ffmpeg output, command lines) on the console
    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long, default_value = "human")]
    output: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Exit codes are returned rather than passed to `process::exit` so the
    // logging context is dropped (and the log file flushed) first.
    match run_cli(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<u8> {
    let base_dir = match cli.base_dir {
        Some(dir) => std::path::absolute(&dir)
            .map_err(|source| ConvertError::BaseDirResolve { path: dir, source })?,
        None => executable_base_dir().context("Failed to locate the executable directory")?,
    };
    let config = RunConfig::for_base_dir(&base_dir);

    let console_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _log = init_logging(LogConfig::new(&config.log_file).with_console_level(console_level))
        .context("Failed to initialize logging")?;

    let code = match run(&config) {
        Ok(report) => {
            if cli.output == OutputFormat::Json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => tracing::error!("Failed to serialize run report: {}", e),
                }
            }
            report.exit_code()
        }
        // already logged as FATAL by the orchestrator
        Err(_) => EXIT_FAILURE,
    };

    Ok(code)
}
