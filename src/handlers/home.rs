//! Landing page

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{
    constants::{APP_NAME, APP_TAGLINE},
    middleware::auth::OptionalAuth,
    models::Role,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub app: &'static str,
    pub tagline: &'static str,
    pub signed_in: bool,
    pub role: Option<Role>,
}

async fn home(OptionalAuth(user): OptionalAuth) -> Json<HomeResponse> {
    Json(HomeResponse {
        app: APP_NAME,
        tagline: APP_TAGLINE,
        signed_in: user.is_some(),
        role: user.map(|u| u.role),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
