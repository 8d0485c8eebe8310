//! Student views: browsing, details and the bookmark / interest lists

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Student routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/main", get(handler::main_view))
        .route("/details", get(handler::details_by_query))
        .route("/details/{id}", get(handler::details))
        .route("/bookmarked", get(handler::list_bookmarked))
        .route("/bookmarked/{id}", post(handler::toggle_bookmark))
        .route("/interested", get(handler::list_interested))
        .route("/interested/{id}", post(handler::toggle_interest))
}
