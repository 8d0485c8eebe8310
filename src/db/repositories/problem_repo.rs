//! Problem repository

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreatedBy, NewProblem, Problem, ProblemPatch},
};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem
    pub async fn create(
        pool: &PgPool,
        input: &NewProblem,
        created_by: &CreatedBy,
    ) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (
                id, title, domain, statement, departments, keywords,
                source, source_link, organisation, notes,
                created_by_uid, created_by_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.domain)
        .bind(&input.statement)
        .bind(&input.departments)
        .bind(&input.keywords)
        .bind(&input.source)
        .bind(&input.source_link)
        .bind(&input.organisation)
        .bind(&input.notes)
        .bind(created_by.uid)
        .bind(&created_by.email)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// List every problem, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"SELECT * FROM problems ORDER BY created_at DESC, id"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// List problems submitted by a user, newest first
    pub async fn list_by_creator(pool: &PgPool, uid: &Uuid) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"SELECT * FROM problems WHERE created_by_uid = $1 ORDER BY created_at DESC, id"#,
        )
        .bind(uid)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Fetch the problems whose ids are in `ids` (unordered)
    pub async fn list_by_ids(pool: &PgPool, ids: &[Uuid]) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        Ok(problems)
    }

    /// Update problem; `None` fields keep their value
    pub async fn update(pool: &PgPool, id: &Uuid, patch: &ProblemPatch) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problems
            SET
                title = COALESCE($2, title),
                domain = COALESCE($3, domain),
                statement = COALESCE($4, statement),
                departments = COALESCE($5, departments),
                keywords = COALESCE($6, keywords),
                source = COALESCE($7, source),
                source_link = COALESCE($8, source_link),
                organisation = COALESCE($9, organisation),
                notes = COALESCE($10, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.domain)
        .bind(&patch.statement)
        .bind(&patch.departments)
        .bind(&patch.keywords)
        .bind(&patch.source)
        .bind(&patch.source_link)
        .bind(&patch.organisation)
        .bind(&patch.notes)
        .fetch_optional(pool)
        .await?;

        Ok(problem)
    }

    /// Delete problem and scrub its id from user lists; returns whether it existed
    pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM problems WHERE id = $1"#)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE users
            SET
                bookmarks = array_remove(bookmarks, $1),
                interested = array_remove(interested, $1),
                updated_at = NOW()
            WHERE $1 = ANY(bookmarks) OR $1 = ANY(interested)
            "#,
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(true)
    }
}
