// MySQL persistence for till sessions.
//
// The one-open-session-per-register invariant is enforced by the store, not
// by a check-then-act in application code: opening is a single conditional
// INSERT that only lands when no open row exists for the register.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::pos::models::TillSession;

pub struct TillRepository {
    pool: MySqlPool,
}

impl TillRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert the session if the register has no open one.
    ///
    /// Returns `false` when another open session exists (nothing inserted).
    pub async fn open(&self, session: &TillSession) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO till_sessions (
                id, register_id, cashier_name, opened_by, status,
                opening_amount, opened_at
            )
            SELECT ?, ?, ?, ?, 'open', ?, ?
            FROM DUAL
            WHERE NOT EXISTS (
                SELECT 1 FROM till_sessions
                WHERE register_id = ? AND status = 'open'
            )
            "#,
        )
        .bind(&session.id)
        .bind(&session.register_id)
        .bind(&session.cashier_name)
        .bind(&session.opened_by)
        .bind(session.opening_amount)
        .bind(session.opened_at)
        .bind(&session.register_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn find_open(&self, register_id: &str) -> Result<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, register_id, cashier_name, opened_by, status, opening_amount,
                   opened_at, counted_amount, expected_amount, difference, closed_at
            FROM till_sessions
            WHERE register_id = ? AND status = 'open'
            "#,
        )
        .bind(register_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, register_id, cashier_name, opened_by, status, opening_amount,
                   opened_at, counted_amount, expected_amount, difference, closed_at
            FROM till_sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Transition an open session to closed with its reconciliation figures.
    ///
    /// Returns `false` when the session was not open (closed concurrently or
    /// never existed); the caller maps that to a conflict.
    pub async fn close(
        &self,
        session_id: &str,
        counted_amount: Decimal,
        expected_amount: Decimal,
        difference: Decimal,
        closed_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE till_sessions
            SET status = 'closed', counted_amount = ?, expected_amount = ?,
                difference = ?, closed_at = ?
            WHERE id = ? AND status = 'open'
            "#,
        )
        .bind(counted_amount)
        .bind(expected_amount)
        .bind(difference)
        .bind(closed_at)
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Closing history, most recent first
    pub async fn list_closed(&self, limit: i64, offset: i64) -> Result<Vec<TillSession>> {
        let limit = limit.clamp(1, 100);

        let sessions = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, register_id, cashier_name, opened_by, status, opening_amount,
                   opened_at, counted_amount, expected_amount, difference, closed_at
            FROM till_sessions
            WHERE status = 'closed'
            ORDER BY closed_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
