//! # Inventory Store
//!
//! The facade the dashboard shell talks to: filtered reads and the two
//! batch toggles.
//!
//! ## Error Propagation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Reads                                Writes                            │
//! │  ─────                                ──────                            │
//! │  list_types()                         set_loaned_out(ids, date)         │
//! │  list_equipment(filter)               set_returned(ids)                 │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  Err? ── warn! + empty Vec           dedupe, ascending order            │
//! │                                            │                            │
//! │  try_* variants return the                 ▼                            │
//! │  CoreError instead                    for id: apply() (own tx)          │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                       BatchReport                       │
//! │                                       ├── transitioned                  │
//! │                                       ├── unchanged                     │
//! │                                       └── failed [(id, CoreError)]      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Batches are best-effort. An id that committed stays committed when a
//! later id fails; the caller re-queries to refresh its view.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::repository::equipment::EquipmentRepository;
use crate::repository::loan::LoanStatusRepository;
use equip_core::{
    BatchReport, CoreError, CoreResult, EquipmentFilter, EquipmentId, EquipmentRecord,
    InventorySummary, Toggle, TransitionPolicy,
};

/// Stateless between calls: every operation goes to the database.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    equipment: EquipmentRepository,
    loans: LoanStatusRepository,
    policy: TransitionPolicy,
}

impl InventoryStore {
    /// Creates a store with the idempotent same-state policy.
    pub fn new(equipment: EquipmentRepository, loans: LoanStatusRepository) -> Self {
        InventoryStore {
            equipment,
            loans,
            policy: TransitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Distinct equipment types for the filter list.
    ///
    /// An unreachable store yields an empty list and a warning.
    pub async fn list_types(&self) -> Vec<String> {
        self.try_list_types().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not list equipment types, showing none");
            Vec::new()
        })
    }

    pub async fn try_list_types(&self) -> CoreResult<Vec<String>> {
        Ok(self.equipment.list_types().await?)
    }

    /// Rows matching both facets of `filter`.
    ///
    /// An unreachable store yields an empty list and a warning.
    pub async fn list_equipment(&self, filter: &EquipmentFilter) -> Vec<EquipmentRecord> {
        self.try_list_equipment(filter).await.unwrap_or_else(|e| {
            warn!(error = %e, %filter, "Could not list equipment, showing none");
            Vec::new()
        })
    }

    pub async fn try_list_equipment(
        &self,
        filter: &EquipmentFilter,
    ) -> CoreResult<Vec<EquipmentRecord>> {
        Ok(self.equipment.list(filter).await?)
    }

    /// One joined row, or `NotFound`.
    pub async fn get(&self, id: EquipmentId) -> CoreResult<EquipmentRecord> {
        self.equipment
            .get(id)
            .await
            .map_err(|e| e.into_core(id))?
            .ok_or(CoreError::NotFound { id })
    }

    pub async fn summary(&self) -> CoreResult<InventorySummary> {
        Ok(self.equipment.summary().await?)
    }

    // =========================================================================
    // Toggles
    // =========================================================================

    /// Marks every id as on loan since `loan_from`.
    pub async fn set_loaned_out(
        &self,
        ids: impl IntoIterator<Item = EquipmentId>,
        loan_from: NaiveDate,
    ) -> BatchReport {
        self.toggle_batch(ids, Toggle::LoanOut { from: loan_from })
            .await
    }

    /// Marks every id as available again.
    pub async fn set_returned(&self, ids: impl IntoIterator<Item = EquipmentId>) -> BatchReport {
        self.toggle_batch(ids, Toggle::Return).await
    }

    async fn toggle_batch(
        &self,
        ids: impl IntoIterator<Item = EquipmentId>,
        toggle: Toggle,
    ) -> BatchReport {
        let ids: BTreeSet<EquipmentId> = ids.into_iter().collect();
        debug!(count = ids.len(), toggle = toggle.verb(), policy = %self.policy, "Starting batch");

        let mut report = BatchReport::new();
        for id in ids {
            let result = self
                .loans
                .apply(id, &toggle, self.policy)
                .await
                .map_err(|e| e.into_core(id));

            if let Err(error) = &result {
                warn!(id, toggle = toggle.verb(), %error, "Toggle failed");
            }
            report.record(id, result);
        }

        info!(
            toggle = toggle.verb(),
            transitioned = report.transitioned.len(),
            unchanged = report.unchanged.len(),
            failed = report.failed.len(),
            "Batch finished"
        );
        report
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
