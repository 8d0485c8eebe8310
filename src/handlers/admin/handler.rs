//! Admin handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    constants::DEPARTMENTS,
    error::AppResult,
    handlers::problems::{parse_problem_id, CreateProblemRequest, ProblemResponse},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::ProblemService,
    state::AppState,
};

use super::{
    request::ProfileUpdateRequest,
    response::{DashboardResponse, ProfileResponse},
};

/// Submission form data
pub async fn dashboard(auth_user: AuthenticatedUser) -> AppResult<Json<DashboardResponse>> {
    auth_user.require(Role::Admin)?;

    Ok(Json(DashboardResponse {
        email: auth_user.email,
        departments: DEPARTMENTS,
    }))
}

/// Submit a new problem
pub async fn create_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ProblemResponse>)> {
    auth_user.require(Role::Admin)?;
    let input = payload.into_new_problem()?;

    let problem = ProblemService::create(state.store(), &auth_user, input).await?;

    Ok((StatusCode::CREATED, Json(problem.into())))
}

/// Problems submitted by the current admin
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProfileResponse>> {
    auth_user.require(Role::Admin)?;

    let problems = ProblemService::list_owned(state.store(), &auth_user.id).await?;

    Ok(Json(ProfileResponse {
        email: auth_user.email,
        total: problems.len(),
        problems: problems.into_iter().map(ProblemResponse::from).collect(),
    }))
}

/// Edit one of the admin's own problems
pub async fn update_own_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> AppResult<Json<ProblemResponse>> {
    auth_user.require(Role::Admin)?;
    let id = parse_problem_id(&id)?;
    let patch = payload.changes.into_patch()?;

    let problem =
        ProblemService::update_owned(state.store(), &auth_user, &id, &payload.password, patch)
            .await?;

    Ok(Json(problem.into()))
}

/// Delete one of the admin's own problems
pub async fn delete_own_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth_user.require(Role::Admin)?;
    let id = parse_problem_id(&id)?;

    ProblemService::delete_owned(state.store(), &auth_user, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
