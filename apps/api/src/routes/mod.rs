pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::drafting::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Drafting API
        .route("/api/v1/contracts/draft", post(handlers::handle_draft))
        .route(
            "/api/v1/contracts/draft/text",
            post(handlers::handle_draft_text),
        )
        .route(
            "/api/v1/contracts/types",
            get(handlers::handle_contract_types),
        )
        .fallback(not_found)
        .with_state(state)
}
