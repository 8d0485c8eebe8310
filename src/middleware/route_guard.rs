//! Route guard middleware
//!
//! Runs the [`RouteTable`](crate::guard::RouteTable) against every request
//! using the `userRole` cookie.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{constants::cookies::USER_ROLE, guard::Decision, state::AppState};

use super::cookies::read_cookie;

/// Forward the request or redirect it to the table's fallback page
pub async fn route_guard(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    let role = read_cookie(request.headers(), USER_ROLE);
    let decision = state.routes().evaluate(request.uri().path(), role);

    if let Decision::Redirect(to) = decision {
        debug!(path = %request.uri().path(), role = ?role, to, "Route guard redirect");
        return Redirect::temporary(to).into_response();
    }

    next.run(request).await
}
