//! ProRep - Role-Gated Problem Board
//!
//! Admins submit problem statements; students browse them, filter them by
//! keyword, department or organisation, and keep bookmark and interest
//! lists.
//!
//! # Architecture
//!
//! - **Guard**: ordered path-to-access table applied to every request using
//!   the `userRole` cookie; denials redirect to `/`
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Store**: persistence boundary with in-memory and PostgreSQL backends
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with its middleware stack
pub fn app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    handlers::routes()
        .layer(from_fn_with_state(state.clone(), middleware::session_middleware))
        .layer(from_fn_with_state(state.clone(), middleware::route_guard))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
