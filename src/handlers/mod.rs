//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain. Every
//! route sits at the root; page access is decided by the route guard layered
//! on in [`crate::app`].

pub mod admin;
pub mod auth;
pub mod health;
pub mod home;
pub mod problems;
pub mod students;

use axum::Router;

use crate::{error::AppError, state::AppState};

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

/// Create all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(home::routes())
        .merge(health::routes())
        .merge(auth::routes())
        .merge(admin::routes())
        .merge(problems::routes())
        .merge(students::routes())
        .fallback(not_found)
}
