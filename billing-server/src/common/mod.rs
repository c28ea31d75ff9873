//! Common infrastructure
//!
//! - Logging setup
//! - Error types re-exported from `shared`

pub mod logger;

pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
