//! All-problems view

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/problems", get(handler::list_problems)).route(
        "/problems/{id}",
        put(handler::update_problem).delete(handler::delete_problem),
    )
}
