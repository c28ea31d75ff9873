//! Billing API
//!
//! | Path | Method | Body | Result |
//! |------|--------|------|--------|
//! | /api/billing/normalize | POST | `{ "lines": [EnteredLine] }` | `[LineItem]` |
//! | /api/billing/quote | POST | `BillingDocument` | `Totals` |
//! | /api/billing/payload | POST | `BillingDocument` | `SubmissionPayload` |
//! | /api/billing/print | POST | `BillingDocument` | `PrintDocument` |
//!
//! Every body goes through the configured [`InputPolicy`](crate::pricing::InputPolicy)
//! before any calculation.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::NormalizeRequest;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/billing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/normalize", post(handler::normalize))
        .route("/quote", post(handler::quote))
        .route("/payload", post(handler::payload))
        .route("/print", post(handler::print))
}
