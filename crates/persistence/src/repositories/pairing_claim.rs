//! Pairing claim repository for database operations.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PairingClaimEntity;

/// Repository for pending pairing claims.
///
/// One claim per session: upsert keyed by session_id replaces any earlier
/// claim from the same session. Claims have no expiry; they live until
/// overwritten or consumed by a matching heartbeat.
#[derive(Clone)]
pub struct PairingClaimRepository {
    pool: PgPool,
}

impl PairingClaimRepository {
    /// Creates a new PairingClaimRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store (or replace) the pending claim for a session.
    pub async fn upsert(
        &self,
        session_id: &str,
        user_id: Uuid,
        token: &str,
    ) -> Result<PairingClaimEntity, sqlx::Error> {
        sqlx::query_as::<_, PairingClaimEntity>(
            r#"
            INSERT INTO pairing_claims (session_id, user_id, token, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                token = EXCLUDED.token,
                created_at = EXCLUDED.created_at
            RETURNING session_id, user_id, token, created_at
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .bind(token)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Find the pending claim for a session, if any.
    pub async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<PairingClaimEntity>, sqlx::Error> {
        sqlx::query_as::<_, PairingClaimEntity>(
            r#"
            SELECT session_id, user_id, token, created_at
            FROM pairing_claims
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Consume a session's claim once a heartbeat has resolved it.
    pub async fn delete(&self, session_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM pairing_claims
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
