//! # Loan State Machine
//!
//! The two transitions every equipment id cycles through, and the report
//! a batch of them produces.
//!
//! ## States
//! ```text
//!         LoanOut { from }
//! Available ─────────────────▶ OnLoan
//!    ▲                            │
//!    └────────── Return ──────────┘
//! ```
//!
//! No terminal state: items cycle indefinitely.
//!
//! ## Same-State Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Return on an item that is already Available                           │
//! │                                                                         │
//! │  Idempotent (default) ──► Unchanged (reported as success)              │
//! │  Strict              ──► InvalidTransition { current: available }      │
//! │                                                                         │
//! │  LoanOut on an item already OnLoan behaves the same way; the original  │
//! │  loan_from date is kept.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Availability, EquipmentId, LoanStatus};

// =============================================================================
// Toggle
// =============================================================================

/// One of the two state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "toggle", rename_all = "snake_case")]
pub enum Toggle {
    /// Available → OnLoan, starting on `from`.
    LoanOut { from: NaiveDate },
    /// OnLoan → Available.
    Return,
}

impl Toggle {
    /// State the item is in after the toggle.
    pub fn target(&self) -> Availability {
        match self {
            Toggle::LoanOut { .. } => Availability::OnLoan,
            Toggle::Return => Availability::Available,
        }
    }

    /// Short verb for logs.
    pub fn verb(&self) -> &'static str {
        match self {
            Toggle::LoanOut { .. } => "loan_out",
            Toggle::Return => "return",
        }
    }
}

// =============================================================================
// Policy & Outcome
// =============================================================================

/// How a toggle on an item already in the target state is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Same-state toggle is a successful no-op.
    #[default]
    Idempotent,
    /// Same-state toggle is rejected with `InvalidTransition`.
    Strict,
}

impl std::fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionPolicy::Idempotent => write!(f, "idempotent"),
            TransitionPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idempotent" | "lenient" => Ok(TransitionPolicy::Idempotent),
            "strict" => Ok(TransitionPolicy::Strict),
            _ => Err(ValidationError::InvalidFormat {
                field: "policy".to_string(),
                reason: format!("'{}' is not one of: idempotent, strict", s),
            }
            .into()),
        }
    }
}

/// Result of planning a toggle against the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The row must be written with this status.
    Applied(LoanStatus),
    /// Already in the target state; nothing to write.
    Unchanged,
}

impl LoanStatus {
    /// Plans `toggle` against this status.
    ///
    /// Pure: the caller writes `Applied` rows inside its own transaction.
    pub fn plan(&self, toggle: &Toggle, policy: TransitionPolicy) -> CoreResult<TransitionOutcome> {
        if self.availability == toggle.target() {
            return match policy {
                TransitionPolicy::Idempotent => Ok(TransitionOutcome::Unchanged),
                TransitionPolicy::Strict => Err(CoreError::InvalidTransition {
                    id: self.equipment_id,
                    current: self.availability,
                }),
            };
        }

        let next = match toggle {
            Toggle::LoanOut { from } => LoanStatus::on_loan(self.equipment_id, *from),
            Toggle::Return => LoanStatus::available(self.equipment_id),
        };
        Ok(TransitionOutcome::Applied(next))
    }
}

// =============================================================================
// Batch Report
// =============================================================================

/// One id that could not be toggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleFailure {
    pub id: EquipmentId,
    pub error: CoreError,
}

/// Per-id results of a batch toggle.
///
/// Batches are best-effort: ids that succeeded stay committed even when
/// later ids fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Ids whose state changed.
    pub transitioned: Vec<EquipmentId>,
    /// Ids already in the target state (idempotent no-ops).
    pub unchanged: Vec<EquipmentId>,
    /// Ids that failed, with their reasons.
    pub failed: Vec<ToggleFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result for one id.
    pub fn record(&mut self, id: EquipmentId, result: CoreResult<TransitionOutcome>) {
        match result {
            Ok(TransitionOutcome::Applied(_)) => self.transitioned.push(id),
            Ok(TransitionOutcome::Unchanged) => self.unchanged.push(id),
            Err(error) => self.failed.push(ToggleFailure { id, error }),
        }
    }

    /// Ids reported as success (state changed or already in target state).
    pub fn succeeded_count(&self) -> usize {
        self.transitioned.len() + self.unchanged.len()
    }

    pub fn failed_ids(&self) -> Vec<EquipmentId> {
        self.failed.iter().map(|f| f.id).collect()
    }

    pub fn failure_for(&self, id: EquipmentId) -> Option<&CoreError> {
        self.failed.iter().find(|f| f.id == id).map(|f| &f.error)
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded_count() + self.failed.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn jan10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_loan_out_from_available() {
        let outcome = LoanStatus::available(1)
            .plan(&Toggle::LoanOut { from: jan10() }, TransitionPolicy::Idempotent)
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Applied(LoanStatus::on_loan(1, jan10())));
    }

    #[test]
    fn test_return_from_on_loan() {
        let outcome = LoanStatus::on_loan(1, jan10())
            .plan(&Toggle::Return, TransitionPolicy::Idempotent)
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Applied(LoanStatus::available(1)));
    }

    #[test]
    fn test_round_trip_restores_available() {
        let start = LoanStatus::available(5);
        let TransitionOutcome::Applied(loaned) = start
            .plan(&Toggle::LoanOut { from: jan10() }, TransitionPolicy::Strict)
            .unwrap()
        else {
            panic!("expected loan-out to apply");
        };
        let TransitionOutcome::Applied(back) = loaned
            .plan(&Toggle::Return, TransitionPolicy::Strict)
            .unwrap()
        else {
            panic!("expected return to apply");
        };

        assert_eq!(back, start);
        assert!(loaned.is_consistent() && back.is_consistent());
    }

    #[test]
    fn test_same_state_is_noop_when_idempotent() {
        let outcome = LoanStatus::available(1)
            .plan(&Toggle::Return, TransitionPolicy::Idempotent)
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Unchanged);

        // Re-loaning keeps the original date.
        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let outcome = LoanStatus::on_loan(1, jan10())
            .plan(&Toggle::LoanOut { from: later }, TransitionPolicy::Idempotent)
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Unchanged);
    }

    #[test]
    fn test_same_state_rejected_when_strict() {
        let err = LoanStatus::on_loan(3, jan10())
            .plan(&Toggle::LoanOut { from: jan10() }, TransitionPolicy::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                id: 3,
                current: Availability::OnLoan
            }
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("strict".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Strict);
        assert_eq!(
            "Idempotent".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::Idempotent
        );
        assert!("loose".parse::<TransitionPolicy>().is_err());
        assert_eq!(TransitionPolicy::default(), TransitionPolicy::Idempotent);
    }

    #[test]
    fn test_batch_report_accounting() {
        let mut report = BatchReport::new();
        report.record(1, Ok(TransitionOutcome::Applied(LoanStatus::available(1))));
        report.record(2, Ok(TransitionOutcome::Unchanged));
        report.record(999, Err(CoreError::NotFound { id: 999 }));

        assert_eq!(report.succeeded_count(), 2);
        assert_eq!(report.total(), 3);
        assert_eq!(report.failed_ids(), vec![999]);
        assert_eq!(report.failure_for(999), Some(&CoreError::NotFound { id: 999 }));
        assert!(report.failure_for(1).is_none());
        assert!(!report.is_complete_success());
    }

    #[test]
    fn test_toggle_target() {
        assert_eq!(Toggle::LoanOut { from: jan10() }.target(), Availability::OnLoan);
        assert_eq!(Toggle::Return.target(), Availability::Available);
    }
}
