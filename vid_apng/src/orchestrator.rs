//! Run orchestration.
//!
//! `Init → ToolCheck → DirSetup → Discover → {NoFiles | ProcessAll → Summarize}`
//!
//! The tool check, source check and export directory creation are fatal and
//! end the run with an error before any file is touched. Individual
//! conversions are not: each discovered file gets exactly one attempt, in
//! order, and the run always reaches the summary afterwards.

use crate::config::RunConfig;
use crate::conversion_api::{convert_file, ConversionTask};
use serde::Serialize;
use shared_utils::{log_summary_report, BatchResult, ConvertError, ToolError};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Nothing matched in the source directory.
    NoFiles,
    /// Every discovered file was attempted.
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub summary: BatchResult,
    #[serde(serialize_with = "shared_utils::serde_paths::lossy")]
    pub source_dir: PathBuf,
    #[serde(serialize_with = "shared_utils::serde_paths::lossy")]
    pub export_dir: PathBuf,
    #[serde(serialize_with = "shared_utils::serde_paths::lossy")]
    pub log_file: PathBuf,
    pub elapsed_secs: f64,
}

impl RunReport {
    pub fn exit_code(&self) -> u8 {
        if self.summary.has_failures() {
            EXIT_FAILURE
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Runs one batch. `Err` means a fatal precondition failed; it has already
/// been logged.
pub fn run(config: &RunConfig) -> Result<RunReport, ConvertError> {
    let start_time = Instant::now();
    let label = config.input_extension.to_uppercase();
    info!(
        "--- {} to {} Conversion Started ---",
        label,
        config.output_extension.to_uppercase()
    );

    check_tool(config)?;
    prepare_directories(config)?;

    let tasks = discover(config);
    if tasks.is_empty() {
        warn!(
            "⚠️ No {} files found in '{}'. Nothing to convert.",
            label,
            config.source_dir.display()
        );
        info!("--- Conversion Finished (No Files) ---");
        return Ok(report(config, RunStatus::NoFiles, BatchResult::new(), start_time));
    }

    info!("📂 Found {} {} file(s) to process.", tasks.len(), label);
    let summary = process_all(config, &tasks);

    let elapsed = start_time.elapsed();
    log_summary_report(&summary, elapsed, &config.log_file, &config.export_dir);
    info!("--- Conversion Finished ---");

    Ok(report(config, RunStatus::Completed, summary, start_time))
}

fn report(config: &RunConfig, status: RunStatus, summary: BatchResult, start: Instant) -> RunReport {
    RunReport {
        status,
        summary,
        source_dir: config.source_dir.clone(),
        export_dir: config.export_dir.clone(),
        log_file: config.log_file.clone(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    }
}

fn check_tool(config: &RunConfig) -> Result<PathBuf, ConvertError> {
    info!("🔍 Checking for {} executable...", config.tool);

    match shared_utils::check_tool_available(&config.tool, &config.version_flag) {
        Ok(path) => {
            info!("✅ {} found: {}", config.tool, path.display());
            Ok(path)
        }
        Err(e) => {
            match &e {
                ToolError::NotFound(tool) => error!(
                    "FATAL: {} command not found. Please ensure {} is installed and accessible in your PATH.",
                    tool, tool
                ),
                other => error!("FATAL: Error while checking {} version: {}", config.tool, other),
            }
            Err(e.into())
        }
    }
}

fn prepare_directories(config: &RunConfig) -> Result<(), ConvertError> {
    info!("📂 Source directory: {}", config.source_dir.display());
    info!("📂 Export directory: {}", config.export_dir.display());

    if !config.source_dir.exists() {
        error!(
            "FATAL: Source directory '{}' not found. Please create it and place your {} files inside.",
            config.source_dir.display(),
            config.input_extension.to_uppercase()
        );
        return Err(ConvertError::SourceDirMissing(config.source_dir.clone()));
    }
    if !config.source_dir.is_dir() {
        error!(
            "FATAL: Source path '{}' is not a directory.",
            config.source_dir.display()
        );
        return Err(ConvertError::SourceNotADirectory(config.source_dir.clone()));
    }

    if !config.export_dir.is_dir() {
        info!(
            "Export directory '{}' not found. Creating it now.",
            config.export_dir.display()
        );
        if let Err(source) = fs::create_dir_all(&config.export_dir) {
            error!(
                "FATAL: Failed to create export directory '{}': {}",
                config.export_dir.display(),
                source
            );
            return Err(ConvertError::ExportDirCreate {
                path: config.export_dir.clone(),
                source,
            });
        }
    }

    Ok(())
}

fn discover(config: &RunConfig) -> Vec<ConversionTask> {
    shared_utils::collect_files(&config.source_dir, &config.input_extension)
        .iter()
        .map(|input| ConversionTask::for_input(input, &config.export_dir, &config.output_extension))
        .collect()
}

fn process_all(config: &RunConfig, tasks: &[ConversionTask]) -> BatchResult {
    let mut summary = BatchResult::new();

    for task in tasks {
        let outcome = convert_file(config, task);
        match outcome.failure_reason(&config.tool) {
            None => summary.success(),
            Some(reason) => summary.fail(task.input_path.clone(), reason),
        }
    }

    summary
}
