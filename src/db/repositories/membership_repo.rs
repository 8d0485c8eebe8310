//! Bookmark / interest membership repository
//!
//! Both sides of a toggle are updated inside the caller's transaction. The
//! problem row is locked first, then the user row, so concurrent toggles
//! serialize without a lock-order cycle.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{error::AppResult, models::ListField};

/// Repository for list membership updates
pub struct MembershipRepository;

impl MembershipRepository {
    /// Lock the problem row; returns false if it does not exist
    pub async fn lock_problem(tx: &mut Transaction<'_, Postgres>, problem_id: &Uuid) -> AppResult<bool> {
        let found: Option<Uuid> =
            sqlx::query_scalar(r#"SELECT id FROM problems WHERE id = $1 FOR UPDATE"#)
                .bind(problem_id)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(found.is_some())
    }

    /// Flip `problem_id` in the user's list. Returns the membership after the
    /// flip, or `None` if the user does not exist.
    pub async fn toggle_user_list(
        tx: &mut Transaction<'_, Postgres>,
        user_id: &Uuid,
        problem_id: &Uuid,
        list: ListField,
    ) -> AppResult<Option<bool>> {
        // Column name comes from a closed enum
        let column = list.as_str();
        let sql = format!(
            r#"
            UPDATE users
            SET
                {column} = CASE
                    WHEN $2 = ANY({column}) THEN array_remove({column}, $2)
                    ELSE array_append({column}, $2)
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING $2 = ANY({column})
            "#
        );

        let member: Option<bool> = sqlx::query_scalar(&sql)
            .bind(user_id)
            .bind(problem_id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(member)
    }

    /// Make the problem's uid list agree with `member`
    pub async fn sync_problem_list(
        tx: &mut Transaction<'_, Postgres>,
        problem_id: &Uuid,
        user_id: &Uuid,
        list: ListField,
        member: bool,
    ) -> AppResult<()> {
        let column = list.as_str();
        let sql = format!(
            r#"
            UPDATE problems
            SET {column} = CASE
                WHEN NOT $3 THEN array_remove({column}, $2)
                WHEN $2 = ANY({column}) THEN {column}
                ELSE array_append({column}, $2)
            END
            WHERE id = $1
            "#
        );

        sqlx::query(&sql)
            .bind(problem_id)
            .bind(user_id)
            .bind(member)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
