//! # Loan Status Repository
//!
//! Reads and transitions the per-item loan state.
//!
//! ## One Transaction Per Id
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply(id, toggle, policy)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN IMMEDIATE  (write lock, waits up to busy_timeout)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT availability, loan_from WHERE equipment_id = id                │
//! │       │                                                                 │
//! │       ├── no row ──────────────────────► NotFound      (rollback)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LoanStatus::plan(toggle, policy)                                      │
//! │       │                                                                 │
//! │       ├── Err(InvalidTransition) ──────► Rejected      (rollback)      │
//! │       ├── Unchanged ───────────────────► Ok(Unchanged) (rollback)      │
//! │       │                                                                 │
//! │       ▼  Applied(next)                                                 │
//! │  UPDATE loan_status SET availability, loan_from  (both columns, once)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ───────────────────────────────► Ok(Applied(next))             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both columns change in the same statement, so no reader ever sees
//! `on_loan` with a null date or `available` with a date.
//!
//! Concurrent toggles on the same id are last-write-wins. The write lock is
//! taken before the read, so a competing commit can never invalidate the
//! snapshot mid-transaction. Writers queue on the busy timeout, and only a
//! writer still waiting when it expires fails with a storage error.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use equip_core::{EquipmentId, LoanStatus, Toggle, TransitionOutcome, TransitionPolicy};

/// Repository for loan status operations.
#[derive(Debug, Clone)]
pub struct LoanStatusRepository {
    pool: SqlitePool,
}

impl LoanStatusRepository {
    /// Creates a new LoanStatusRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LoanStatusRepository { pool }
    }

    /// Gets the loan status of one item.
    pub async fn get(&self, id: EquipmentId) -> DbResult<Option<LoanStatus>> {
        let status = sqlx::query_as::<_, LoanStatus>(
            r#"
            SELECT equipment_id, availability, loan_from
            FROM loan_status
            WHERE equipment_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    /// Applies one toggle to one item atomically.
    ///
    /// ## Returns
    /// * `Ok(Applied(status))` - Row rewritten with `status`
    /// * `Ok(Unchanged)` - Already in the target state (idempotent policy)
    /// * `Err(DbError::NotFound)` - No such id
    /// * `Err(DbError::Rejected)` - Already in the target state (strict policy)
    /// * `Err(_)` - Storage failure; nothing was written
    pub async fn apply(
        &self,
        id: EquipmentId,
        toggle: &Toggle,
        policy: TransitionPolicy,
    ) -> DbResult<TransitionOutcome> {
        debug!(id, toggle = toggle.verb(), %policy, "Applying toggle");

        // IMMEDIATE: a deferred read-then-write fails with SQLITE_BUSY without
        // waiting when another connection commits in between.
        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let current = sqlx::query_as::<_, LoanStatus>(
            r#"
            SELECT equipment_id, availability, loan_from
            FROM loan_status
            WHERE equipment_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let current = match current {
            Some(status) => status,
            None => {
                let orphan: Option<i64> =
                    sqlx::query_scalar("SELECT id FROM equipment WHERE id = ?1")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?;
                if orphan.is_some() {
                    warn!(id, "Equipment has no loan status row");
                }
                return Err(DbError::not_found("Equipment", id));
            }
        };

        let outcome = current.plan(toggle, policy)?;

        match outcome {
            TransitionOutcome::Applied(next) => {
                sqlx::query(
                    r#"
                    UPDATE loan_status
                    SET availability = ?2, loan_from = ?3
                    WHERE equipment_id = ?1
                    "#,
                )
                .bind(id)
                .bind(next.availability)
                .bind(next.loan_from)
                .execute(&mut *tx)
                .await?;

                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                info!(
                    id,
                    from = %current.availability,
                    to = %next.availability,
                    loan_from = ?next.loan_from,
                    "Loan status changed"
                );
            }
            TransitionOutcome::Unchanged => {
                tx.rollback().await?;
                debug!(id, state = %current.availability, "Already in target state");
            }
        }

        Ok(outcome)
    }
}
