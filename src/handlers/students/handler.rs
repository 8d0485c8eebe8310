//! Student handler implementations

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::paths,
    error::AppResult,
    handlers::problems::{parse_problem_id, ProblemsListResponse},
    middleware::auth::AuthenticatedUser,
    models::{ListField, Membership, Role},
    services::{membership_service::FlaggedProblem, MembershipService, ProblemFilter, ProblemService},
    state::AppState,
};

use super::{
    request::{DetailsQuery, MainQuery},
    response::{FlaggedProblemResponse, MainResponse},
};

/// Browse all problems, optionally narrowed to one department
pub async fn main_view(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<MainQuery>,
) -> AppResult<Json<MainResponse>> {
    auth_user.require(Role::Student)?;

    let department = query.department.filter(|d| !d.trim().is_empty());
    let filter = ProblemFilter::by_department(department.clone());
    let problems = MembershipService::browse(state.store(), &auth_user.id, &filter).await?;

    Ok(Json(MainResponse {
        email: auth_user.email,
        department,
        total: problems.len(),
        problems: problems.into_iter().map(FlaggedProblemResponse::from).collect(),
    }))
}

async fn detail_view(state: &AppState, viewer: &AuthenticatedUser, id: &Uuid) -> AppResult<FlaggedProblemResponse> {
    let problem = ProblemService::get(state.store(), id).await?;
    let flagged = FlaggedProblem {
        bookmarked: problem.list(ListField::Bookmarks).contains(&viewer.id),
        interested: problem.list(ListField::Interested).contains(&viewer.id),
        problem,
    };
    Ok(flagged.into())
}

/// Full record of one problem
pub async fn details(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<FlaggedProblemResponse>> {
    let id = parse_problem_id(&id)?;
    Ok(Json(detail_view(&state, &auth_user, &id).await?))
}

/// `/details?pid=...`; a missing or malformed id goes back to the browse page
pub async fn details_by_query(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<DetailsQuery>,
) -> AppResult<Response> {
    let Some(id) = query.pid.as_deref().and_then(|pid| Uuid::parse_str(pid.trim()).ok()) else {
        debug!(pid = ?query.pid, "Details without a valid pid");
        return Ok(Redirect::temporary(paths::MAIN).into_response());
    };

    Ok(Json(detail_view(&state, &auth_user, &id).await?).into_response())
}

async fn list(state: &AppState, user: &AuthenticatedUser, list: ListField) -> AppResult<Json<ProblemsListResponse>> {
    user.require(Role::Student)?;
    let problems = MembershipService::list(state.store(), &user.id, list).await?;
    Ok(Json(problems.into()))
}

async fn toggle(
    state: &AppState,
    user: &AuthenticatedUser,
    id: &str,
    list: ListField,
) -> AppResult<Json<Membership>> {
    user.require(Role::Student)?;
    let id = parse_problem_id(id)?;
    Ok(Json(MembershipService::toggle(state.store(), &user.id, &id, list).await?))
}

pub async fn list_bookmarked(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProblemsListResponse>> {
    list(&state, &auth_user, ListField::Bookmarks).await
}

pub async fn list_interested(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProblemsListResponse>> {
    list(&state, &auth_user, ListField::Interested).await
}

/// Add or remove a bookmark
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Membership>> {
    toggle(&state, &auth_user, &id, ListField::Bookmarks).await
}

/// Add or remove interest
pub async fn toggle_interest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Membership>> {
    toggle(&state, &auth_user, &id, ListField::Interested).await
}
