//! Shared Utilities for modern_format_boost tools
//!
//! This crate provides common functionality shared by the conversion tools:
//! - Logging context (console + per-run log file)
//! - External tools detection and invocation
//! - Batch processing utilities (file discovery, run counters)
//! - Summary reporting (lossy path serialization for JSON reports)
//! - Error types

pub mod batch;
pub mod errors;
pub mod logging;
pub mod report;
pub mod serde_paths;
pub mod tools;

pub use batch::*;
pub use errors::{ConvertError, ToolError};
pub use logging::{init_logging, LogConfig, LogContext};
pub use report::*;
pub use tools::*;
