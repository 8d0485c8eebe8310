//! Storage module
//!
//! The [`Store`] trait is the boundary between handlers and persistence.
//! Two implementations exist: [`MemoryStore`] for development and tests, and
//! [`PgStore`] backed by PostgreSQL through the repositories.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod repositories;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreatedBy, ListField, Membership, NewProblem, NewUser, Problem, ProblemPatch, User},
};

pub use connection::*;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Pending password reset, keyed by the SHA-256 of the emailed token
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PasswordReset {
    pub token_hash: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Persistence operations used by the services
#[async_trait]
pub trait Store: Send + Sync {
    // --- Users ---
    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    async fn find_user_by_id(&self, id: &Uuid) -> AppResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn update_password(&self, id: &Uuid, password_hash: &str) -> AppResult<()>;

    // --- Problems ---
    async fn create_problem(&self, input: NewProblem, created_by: CreatedBy) -> AppResult<Problem>;

    async fn find_problem(&self, id: &Uuid) -> AppResult<Option<Problem>>;

    /// All problems, newest first
    async fn list_problems(&self) -> AppResult<Vec<Problem>>;

    /// Problems submitted by `uid`, newest first
    async fn list_problems_by_creator(&self, uid: &Uuid) -> AppResult<Vec<Problem>>;

    /// Problems with the given ids in the order of `ids`; unknown ids are skipped
    async fn list_problems_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Problem>>;

    async fn update_problem(&self, id: &Uuid, patch: ProblemPatch) -> AppResult<Problem>;

    /// Delete a problem and drop it from every user's lists
    async fn delete_problem(&self, id: &Uuid) -> AppResult<()>;

    // --- Membership ---

    /// Flip membership of `problem_id` in the user's `list` and mirror it on
    /// the problem's uid list, as one atomic update.
    async fn toggle_membership(
        &self,
        user_id: &Uuid,
        problem_id: &Uuid,
        list: ListField,
    ) -> AppResult<Membership>;

    // --- Password resets ---
    async fn save_password_reset(&self, reset: PasswordReset) -> AppResult<()>;

    /// Remove and return the reset stored under `token_hash`
    async fn take_password_reset(&self, token_hash: &str) -> AppResult<Option<PasswordReset>>;

    /// Cheap liveness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Reorder `problems` to follow `ids`, skipping ids with no problem
pub(crate) fn order_by_ids(ids: &[Uuid], mut problems: Vec<Problem>) -> Vec<Problem> {
    let mut ordered = Vec::with_capacity(problems.len());
    for id in ids {
        if let Some(pos) = problems.iter().position(|p| p.id == *id) {
            ordered.push(problems.swap_remove(pos));
        }
    }
    ordered
}
