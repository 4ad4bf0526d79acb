use async_trait::async_trait;
use auth::RefreshTokenError;
use auth::RefreshTokenStore;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres adapter for refresh token state.
///
/// The active check (exists AND not revoked AND not expired) is evaluated
/// from a single row read so it cannot observe a half-applied transition.
pub struct PostgresRefreshTokenStore {
    pool: PgPool,
}

impl PostgresRefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl RefreshTokenStore for PostgresRefreshTokenStore {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(Utc::now())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::Store(e.to_string()))?;

        Ok(())
    }

    async fn find_active(&self, token: &str) -> Result<Uuid, RefreshTokenError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT user_id, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::Store(e.to_string()))?;

        let row = row.ok_or(RefreshTokenError::NotFound)?;

        // Revoked is absorbing; it wins over expiry.
        if row.revoked_at.is_some() {
            return Err(RefreshTokenError::Revoked);
        }
        if Utc::now() > row.expires_at {
            return Err(RefreshTokenError::Expired);
        }

        Ok(row.user_id)
    }

    async fn mark_revoked(&self, token: &str) -> Result<(), RefreshTokenError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::Store(e.to_string()))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero rows means the token was already revoked or never existed;
        // only the latter is an error.
        let exists = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT 1 FROM refresh_tokens WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::Store(e.to_string()))?;

        match exists {
            Some(_) => Ok(()),
            None => Err(RefreshTokenError::NotFound),
        }
    }
}
