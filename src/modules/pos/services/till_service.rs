use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::core::currency;
use crate::core::{AppError, RequestContext, Result};
use crate::modules::pos::models::{Reconciliation, TillSession, TillStatus};
use crate::modules::pos::repositories::{SaleRepository, TillRepository};

/// Till session lifecycle: open, inspect, close with reconciliation
pub struct TillService {
    till_repo: TillRepository,
    sale_repo: SaleRepository,
}

impl TillService {
    pub fn new(till_repo: TillRepository, sale_repo: SaleRepository) -> Self {
        Self {
            till_repo,
            sale_repo,
        }
    }

    /// Open a till session for a register. Fails with a conflict when the
    /// register already has an open session; the guard is the conditional
    /// insert in the repository, not a prior read.
    pub async fn open(
        &self,
        ctx: &RequestContext,
        register_id: &str,
        opening_amount: Decimal,
    ) -> Result<TillSession> {
        if register_id.trim().is_empty() {
            return Err(AppError::validation("register_id cannot be empty"));
        }
        currency::validate_amount(opening_amount)
            .map_err(|e| AppError::validation(format!("opening_amount: {}", e)))?;

        let session = TillSession {
            id: Uuid::new_v4().to_string(),
            register_id: register_id.trim().to_string(),
            cashier_name: ctx.display_name.clone(),
            opened_by: ctx.subject_id.clone(),
            status: TillStatus::Open,
            opening_amount,
            opened_at: Utc::now(),
            counted_amount: None,
            expected_amount: None,
            difference: None,
            closed_at: None,
        };

        if !self.till_repo.open(&session).await? {
            return Err(AppError::conflict(format!(
                "Register '{}' already has an open till session",
                session.register_id
            )));
        }

        info!(
            session_id = %session.id,
            register_id = %session.register_id,
            opening_amount = %session.opening_amount,
            "Till session opened"
        );

        Ok(session)
    }

    /// The register's open session, if any
    pub async fn current(&self, register_id: &str) -> Result<Option<TillSession>> {
        self.till_repo.find_open(register_id).await
    }

    /// The register's open session, or a conflict error
    pub async fn require_open(&self, register_id: &str) -> Result<TillSession> {
        self.till_repo.find_open(register_id).await?.ok_or_else(|| {
            AppError::conflict(format!(
                "Register '{}' has no open till session",
                register_id
            ))
        })
    }

    /// Close the register's open session.
    ///
    /// Expected cash is recomputed from the persisted sales of the session
    /// rather than kept as a running counter, so the figure cannot drift.
    pub async fn close(&self, register_id: &str, counted_amount: Decimal) -> Result<TillSession> {
        currency::validate_amount(counted_amount)
            .map_err(|e| AppError::validation(format!("counted_amount: {}", e)))?;

        let session = self.require_open(register_id).await?;

        let totals = self.sale_repo.session_totals(&session.id).await?;
        let reconciliation = Reconciliation::compute(
            session.opening_amount,
            totals.sales_total,
            counted_amount,
        );
        let closed_at = Utc::now();

        let closed = self
            .till_repo
            .close(
                &session.id,
                counted_amount,
                reconciliation.expected,
                reconciliation.difference,
                closed_at,
            )
            .await?;

        if !closed {
            // Lost the race with another close on the same session
            return Err(AppError::conflict(format!(
                "Register '{}' has no open till session",
                register_id
            )));
        }

        info!(
            session_id = %session.id,
            register_id = %register_id,
            expected = %reconciliation.expected,
            counted = %counted_amount,
            difference = %reconciliation.difference,
            "Till session closed"
        );

        Ok(TillSession {
            status: TillStatus::Closed,
            counted_amount: Some(counted_amount),
            expected_amount: Some(reconciliation.expected),
            difference: Some(reconciliation.difference),
            closed_at: Some(closed_at),
            ..session
        })
    }

    pub async fn get_session(&self, id: &str) -> Result<TillSession> {
        self.till_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Till session '{}' not found", id)))
    }

    /// Closing history for the back office
    pub async fn closing_history(&self, limit: i64, offset: i64) -> Result<Vec<TillSession>> {
        self.till_repo.list_closed(limit, offset).await
    }
}
