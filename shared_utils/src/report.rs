//! Report Module
//!
//! Summary reporting for batch operations. Everything goes through `tracing`
//! so the summary lands in the log file as well as on the console.

use crate::batch::BatchResult;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

pub fn log_summary_report(
    result: &BatchResult,
    duration: Duration,
    log_file: &Path,
    export_dir: &Path,
) {
    info!("--- Conversion Summary ---");
    info!("📁 Total files processed: {}", result.total);
    info!("✅ Successful conversions: {}", result.succeeded);
    info!("❌ Failed conversions: {}", result.failed);
    info!("📈 Success rate: {:.1}%", result.success_rate());
    info!("⏱️ Total time: {}", format_duration(duration));
    if result.total > 0 {
        let avg_time = duration.as_secs_f64() / result.total as f64;
        info!("⏱️ Avg time/file: {:.2}s", avg_time);
    }
    info!("📝 Log file saved to: {}", log_file.display());
    info!("📂 Converted files are in: {}", export_dir.display());
    info!(
        "🕒 Finished at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if !result.errors.is_empty() {
        error!("❌ Errors encountered:");
        for (path, message) in &result.errors {
            error!("   {} → {}", path.display(), message);
        }
    }
}
