//! Admin dashboard and profile handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(handler::dashboard))
        .route("/admin/problems", post(handler::create_problem))
        .route("/profile", get(handler::profile))
        .route(
            "/profile/problems/{id}",
            put(handler::update_own_problem).delete(handler::delete_own_problem),
        )
}
