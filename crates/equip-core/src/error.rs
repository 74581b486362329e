//! # Error Types
//!
//! Domain-specific error types for equip-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  equip-core errors (this file)                                         │
//! │  ├── CoreError        - Inventory taxonomy seen by callers             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  equip-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  equip-cli errors (app)                                                │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ⇄ DbError → CliError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable at the request boundary. `CoreError` is
//! `Clone + Serialize` because it travels inside [`crate::BatchReport`]
//! back to the shell, one entry per failed id.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Availability, EquipmentId};

// =============================================================================
// Core Error
// =============================================================================

/// Inventory errors reported to callers of the store.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoreError {
    /// Id referenced in a toggle does not exist in the catalog.
    #[error("Equipment not found: {id}")]
    NotFound { id: EquipmentId },

    /// Id exists but is already in the requested state.
    ///
    /// ## When This Occurs
    /// Only under [`crate::TransitionPolicy::Strict`]. The default
    /// idempotent policy treats the same situation as a successful no-op.
    #[error("Equipment {id} is already {current}, cannot perform transition")]
    InvalidTransition {
        id: EquipmentId,
        current: Availability,
    },

    /// Underlying persistence cannot be reached.
    ///
    /// ## User Workflow
    /// ```text
    /// Confirm Loan (ids 1, 2)
    ///      │
    ///      ▼
    /// id 1 ── committed
    /// id 2 ── StoreUnavailable { reason: "database is locked" }
    ///      │
    ///      ▼
    /// Shell reports partial success, staff retries the action
    /// ```
    #[error("Store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// Filter value outside the enumerated set.
    #[error("Malformed {field} filter: '{value}'")]
    MalformedFilter { field: String, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a StoreUnavailable error from any displayable cause.
    pub fn unavailable(reason: impl ToString) -> Self {
        CoreError::StoreUnavailable {
            reason: reason.to_string(),
        }
    }

    /// Creates a MalformedFilter error.
    pub fn malformed_filter(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::MalformedFilter {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether retrying the whole user-initiated action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::StoreUnavailable { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value collides with a reserved filter token.
    #[error("{field} cannot be '{value}' (reserved)")]
    Reserved { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::NotFound { id: 999 }.to_string(),
            "Equipment not found: 999"
        );

        let err = CoreError::InvalidTransition {
            id: 4,
            current: Availability::OnLoan,
        };
        assert_eq!(
            err.to_string(),
            "Equipment 4 is already on_loan, cannot perform transition"
        );

        let err = CoreError::malformed_filter("availability", "maybe");
        assert_eq!(err.to_string(), "Malformed availability filter: 'maybe'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "loan_from".to_string(),
        };
        assert_eq!(err.to_string(), "loan_from is required");

        let err = ValidationError::Reserved {
            field: "type".to_string(),
            value: "ALL".to_string(),
        };
        assert_eq!(err.to_string(), "type cannot be 'ALL' (reserved)");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_only_store_unavailable_is_retryable() {
        assert!(CoreError::unavailable("pool closed").is_retryable());
        assert!(!CoreError::NotFound { id: 1 }.is_retryable());
        assert!(!CoreError::malformed_filter("type", "").is_retryable());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(CoreError::NotFound { id: 7 }).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["id"], 7);
    }
}
