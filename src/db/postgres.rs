//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{
    order_by_ids,
    repositories::{MembershipRepository, ProblemRepository, ResetRepository, UserRepository},
    PasswordReset, Store,
};
use crate::{
    error::{AppError, AppResult},
    models::{CreatedBy, ListField, Membership, NewProblem, NewUser, Problem, ProblemPatch, User},
};

/// [`Store`] over a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        UserRepository::create(&self.pool, &input).await
    }

    async fn find_user_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(&self.pool, email).await
    }

    async fn update_password(&self, id: &Uuid, password_hash: &str) -> AppResult<()> {
        if UserRepository::update_password(&self.pool, id, password_hash).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("User not found".to_string()))
        }
    }

    async fn create_problem(&self, input: NewProblem, created_by: CreatedBy) -> AppResult<Problem> {
        ProblemRepository::create(&self.pool, &input, &created_by).await
    }

    async fn find_problem(&self, id: &Uuid) -> AppResult<Option<Problem>> {
        ProblemRepository::find_by_id(&self.pool, id).await
    }

    async fn list_problems(&self) -> AppResult<Vec<Problem>> {
        ProblemRepository::list(&self.pool).await
    }

    async fn list_problems_by_creator(&self, uid: &Uuid) -> AppResult<Vec<Problem>> {
        ProblemRepository::list_by_creator(&self.pool, uid).await
    }

    async fn list_problems_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Problem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let problems = ProblemRepository::list_by_ids(&self.pool, ids).await?;
        Ok(order_by_ids(ids, problems))
    }

    async fn update_problem(&self, id: &Uuid, patch: ProblemPatch) -> AppResult<Problem> {
        ProblemRepository::update(&self.pool, id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
    }

    async fn delete_problem(&self, id: &Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if !ProblemRepository::delete(&mut tx, id).await? {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn toggle_membership(
        &self,
        user_id: &Uuid,
        problem_id: &Uuid,
        list: ListField,
    ) -> AppResult<Membership> {
        let mut tx = self.pool.begin().await?;

        if !MembershipRepository::lock_problem(&mut tx, problem_id).await? {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        let member = MembershipRepository::toggle_user_list(&mut tx, user_id, problem_id, list)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        MembershipRepository::sync_problem_list(&mut tx, problem_id, user_id, list, member).await?;
        tx.commit().await?;

        debug!(%user_id, %problem_id, %list, member, "Membership toggled");

        Ok(Membership {
            problem_id: *problem_id,
            list,
            member,
        })
    }

    async fn save_password_reset(&self, reset: PasswordReset) -> AppResult<()> {
        ResetRepository::save(&self.pool, &reset).await
    }

    async fn take_password_reset(&self, token_hash: &str) -> AppResult<Option<PasswordReset>> {
        ResetRepository::take(&self.pool, token_hash).await
    }

    async fn ping(&self) -> AppResult<()> {
        super::test_connection(&self.pool).await?;
        Ok(())
    }
}
