//! Logging Module - 统一的日志系统
//!
//! Provides a scoped logging context built on `tracing`:
//! - a per-run log file, truncated on every run, receiving DEBUG and above
//! - a console sink on stderr receiving INFO and above (`RUST_LOG` overrides it)
//! - timestamped, leveled lines in both sinks
//!
//! The context is installed as the thread default instead of a process-wide
//! global subscriber. Dropping it restores the previous subscriber and flushes
//! the file writer, so every exit path leaves a complete log behind.
//!
//! # Examples
//!
//! ```no_run
//! use shared_utils::logging::{init_logging, LogConfig};
//! use tracing::info;
//!
//! let ctx = init_logging(LogConfig::new("conversion.log")).expect("Failed to initialize logging");
//! info!("Program started");
//! drop(ctx); // 刷新日志文件
//! ```

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer};

/// Timestamp format shared by the console and file sinks.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log file path; the file is overwritten on every run.
    pub log_file: PathBuf,
    /// Minimum level written to the log file, default DEBUG.
    pub file_level: Level,
    /// Minimum level printed on the console, default INFO.
    pub console_level: Level,
    /// Whether the console sink is attached at all.
    pub console: bool,
}

impl LogConfig {
    pub fn new<P: AsRef<Path>>(log_file: P) -> Self {
        Self {
            log_file: log_file.as_ref().to_path_buf(),
            file_level: Level::DEBUG,
            console_level: Level::INFO,
            console: true,
        }
    }

    pub fn with_file_level(mut self, level: Level) -> Self {
        self.file_level = level;
        self
    }

    pub fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }
}

/// Active logging context. Keep it alive for the whole run.
pub struct LogContext {
    log_file: PathBuf,
    // Field order matters: the subscriber is released before the writer guard
    // flushes and joins the file worker.
    _subscriber: DefaultGuard,
    _writer: WorkerGuard,
}

impl LogContext {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

impl std::fmt::Debug for LogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogContext")
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

/// 初始化日志系统
///
/// Creates (or truncates) the log file and installs a subscriber with a file
/// layer and an optional stderr layer as the default for the current thread.
///
/// # Errors
///
/// Fails when the log file or its parent directory cannot be created.
pub fn init_logging(config: LogConfig) -> Result<LogContext> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
        }
    }

    let file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file: {:?}", config.log_file))?;
    let (file_writer, writer_guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_filter(LevelFilter::from_level(config.file_level));

    let console_layer = config.console.then(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.console_level).into())
            .from_env_lossy();
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
            .with_filter(filter)
    });

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer);
    let subscriber_guard = tracing::subscriber::set_default(subscriber);

    tracing::debug!(
        log_file = ?config.log_file,
        file_level = ?config.file_level,
        console_level = ?config.console_level,
        console = config.console,
        "Logging system initialized"
    );

    Ok(LogContext {
        log_file: config.log_file,
        _subscriber: subscriber_guard,
        _writer: writer_guard,
    })
}
