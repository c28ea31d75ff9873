use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use std::sync::Arc;
use tower::ServiceExt;

use crate::core::Config;
use crate::pricing::InputPolicy;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.config.input_policy
    }

    /// Full router bound to this state
    pub fn router(&self) -> Router {
        crate::api::build_router(self.clone())
    }

    /// Dispatch a request in-process, without a listener
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        match self.router().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}
