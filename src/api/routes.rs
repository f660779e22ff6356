//! API Routes
//!
//! Configures the Axum router with all account cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_account_handler, health_handler, put_account_handler, stats_handler,
    top_accounts_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The static `/accounts/top` segment wins over the `:id` capture
    Router::new()
        .route("/accounts", put(put_account_handler))
        .route("/accounts/top", get(top_accounts_handler))
        .route("/accounts/:id", get(get_account_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
