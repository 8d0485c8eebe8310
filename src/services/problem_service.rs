//! Problem service

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    db::Store,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{CreatedBy, NewProblem, Problem, ProblemPatch},
    utils::crypto::secrets_match,
};

use super::{AuthService, ProblemFilter};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Create a problem owned by `author`
    pub async fn create(
        store: &dyn Store,
        author: &AuthenticatedUser,
        input: NewProblem,
    ) -> AppResult<Problem> {
        let problem = store
            .create_problem(
                input,
                CreatedBy {
                    uid: author.id,
                    email: author.email.clone(),
                },
            )
            .await?;

        info!(problem_id = %problem.id, author = %author.id, "Problem created");
        Ok(problem)
    }

    pub async fn get(store: &dyn Store, id: &Uuid) -> AppResult<Problem> {
        store
            .find_problem(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
    }

    /// All problems matching `filter`, newest first
    pub async fn list(store: &dyn Store, filter: &ProblemFilter) -> AppResult<Vec<Problem>> {
        Ok(filter.apply(store.list_problems().await?))
    }

    /// Problems submitted by `uid`
    pub async fn list_owned(store: &dyn Store, uid: &Uuid) -> AppResult<Vec<Problem>> {
        store.list_problems_by_creator(uid).await
    }

    /// Update from the shared all-problems view; needs the configured edit code
    pub async fn update_with_code(
        store: &dyn Store,
        config: &AuthConfig,
        code: Option<&str>,
        id: &Uuid,
        patch: ProblemPatch,
    ) -> AppResult<Problem> {
        Self::check_edit_code(config, code, id)?;
        Self::apply_patch(store, id, patch).await
    }

    /// Delete from the shared all-problems view; needs the configured edit code
    pub async fn delete_with_code(
        store: &dyn Store,
        config: &AuthConfig,
        code: Option<&str>,
        id: &Uuid,
    ) -> AppResult<()> {
        Self::check_edit_code(config, code, id)?;
        store.delete_problem(id).await?;
        info!(problem_id = %id, "Problem deleted with edit code");
        Ok(())
    }

    /// Owner update from the admin profile, re-checking the owner's password
    pub async fn update_owned(
        store: &dyn Store,
        user: &AuthenticatedUser,
        id: &Uuid,
        password: &str,
        patch: ProblemPatch,
    ) -> AppResult<Problem> {
        AuthService::reauthenticate(store, &user.id, password).await?;
        Self::require_owner(store, user, id).await?;
        Self::apply_patch(store, id, patch).await
    }

    /// Owner delete from the admin profile
    pub async fn delete_owned(store: &dyn Store, user: &AuthenticatedUser, id: &Uuid) -> AppResult<()> {
        Self::require_owner(store, user, id).await?;
        store.delete_problem(id).await?;
        info!(problem_id = %id, owner = %user.id, "Problem deleted by owner");
        Ok(())
    }

    async fn apply_patch(store: &dyn Store, id: &Uuid, patch: ProblemPatch) -> AppResult<Problem> {
        if patch.is_empty() {
            return Self::get(store, id).await;
        }
        store.update_problem(id, patch).await
    }

    async fn require_owner(store: &dyn Store, user: &AuthenticatedUser, id: &Uuid) -> AppResult<Problem> {
        let problem = Self::get(store, id).await?;
        if !problem.is_owned_by(&user.id) {
            return Err(AppError::Forbidden(
                "Only the submitting admin can change this problem".to_string(),
            ));
        }
        Ok(problem)
    }

    fn check_edit_code(config: &AuthConfig, code: Option<&str>, id: &Uuid) -> AppResult<()> {
        let granted = match (&config.problem_edit_code, code) {
            (Some(expected), Some(given)) => secrets_match(given, expected),
            _ => false,
        };
        if !granted {
            warn!(problem_id = %id, "Rejected edit code");
            return Err(AppError::Forbidden("Invalid edit code".to_string()));
        }
        Ok(())
    }
}
