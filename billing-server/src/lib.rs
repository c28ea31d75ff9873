//! Billing Server - GST pricing and billing calculator
//!
//! # Overview
//!
//! Recomputes invoice and purchase totals for the billing screens:
//!
//! - **Unit conversion** (`pricing::unit`): SQFT / BOX / NOS / TNOS into native stock units
//! - **Calculator** (`pricing`): discount allocation, GST back-out, totals
//! - **Validation** (`pricing::validation`): strict or lenient input policy
//! - **Edge rounding** (`money`): 2 decimal places, half away from zero
//! - **Documents** (`document`): submission payload and print document
//! - **HTTP API** (`api`): JSON endpoints over all of the above
//!
//! # Layout
//!
//! ```text
//! billing-server/src/
//! ├── core/          # config, state, server, errors
//! ├── common/        # logging, re-exported error types
//! ├── pricing/       # calculator, unit conversion, validation
//! ├── money.rs       # edge rounding
//! ├── document/      # payload and print builders
//! └── api/           # HTTP routes and handlers
//! ```

pub mod api;
pub mod common;
pub mod core;
pub mod document;
pub mod money;
pub mod pricing;

pub use common::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use common::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use core::{Config, Server, ServerError, ServerState};
pub use document::{PrintDocument, SubmissionPayload};
pub use pricing::{InputPolicy, ValidationError, compute_document_totals, compute_totals};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> anyhow::Result<Config> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}
