use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelInvoker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `OllamaClient` in production, canned stubs in tests.
    pub invoker: Arc<dyn ModelInvoker>,
    pub config: Config,
}
