//! All-problems handler implementations

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    constants::EDIT_CODE_HEADER,
    error::AppResult,
    services::{ProblemFilter, ProblemService},
    state::AppState,
};

use super::{
    request::{parse_problem_id, UpdateProblemRequest},
    response::{ProblemResponse, ProblemsListResponse},
};

fn edit_code(headers: &HeaderMap) -> Option<&str> {
    headers.get(EDIT_CODE_HEADER).and_then(|v| v.to_str().ok())
}

/// List problems filtered by keyword, department and organisation
pub async fn list_problems(
    State(state): State<AppState>,
    Query(filter): Query<ProblemFilter>,
) -> AppResult<Json<ProblemsListResponse>> {
    let problems = ProblemService::list(state.store(), &filter).await?;
    Ok(Json(problems.into()))
}

/// Update a problem; requires the edit code header
pub async fn update_problem(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProblemRequest>,
) -> AppResult<Json<ProblemResponse>> {
    let id = parse_problem_id(&id)?;
    let patch = payload.into_patch()?;

    let problem = ProblemService::update_with_code(
        state.store(),
        &state.config().auth,
        edit_code(&headers),
        &id,
        patch,
    )
    .await?;

    Ok(Json(problem.into()))
}

/// Delete a problem; requires the edit code header
pub async fn delete_problem(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let id = parse_problem_id(&id)?;
    ProblemService::delete_with_code(state.store(), &state.config().auth, edit_code(&headers), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
