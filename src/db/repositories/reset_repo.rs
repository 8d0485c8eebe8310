//! Password reset repository

use sqlx::PgPool;

use crate::{db::PasswordReset, error::AppResult};

/// Repository for pending password resets
pub struct ResetRepository;

impl ResetRepository {
    /// Store a reset, replacing any earlier one for the same user
    pub async fn save(pool: &PgPool, reset: &PasswordReset) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(r#"DELETE FROM password_resets WHERE user_id = $1"#)
            .bind(reset.user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO password_resets (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&reset.token_hash)
        .bind(reset.user_id)
        .bind(reset.expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete and return the reset for `token_hash`
    pub async fn take(pool: &PgPool, token_hash: &str) -> AppResult<Option<PasswordReset>> {
        let reset = sqlx::query_as::<_, PasswordReset>(
            r#"
            DELETE FROM password_resets
            WHERE token_hash = $1
            RETURNING token_hash, user_id, expires_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(reset)
    }
}
