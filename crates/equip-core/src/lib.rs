//! # equip-core: Pure Domain Logic for the Equipment Inventory
//!
//! This crate holds the domain of the lab equipment dashboard as pure
//! types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Equipment Inventory Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard Shell (equip-cli)                     │   │
//! │  │    Types ──► List ──► Loan Out ──► Return ──► Summary           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ equip-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │   loan    │  │ validation│  │   │
//! │  │   │ Equipment │  │ Equipment │  │  Toggle   │  │   rules   │  │   │
//! │  │   │LoanStatus │  │  Filter   │  │BatchReport│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    equip-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, repositories, store          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Equipment, LoanStatus, EquipmentRecord, ...)
//! - [`filter`] - Typed listing filter (availability × type)
//! - [`loan`] - Loan state machine and batch reports
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use equip_core::{Availability, LoanStatus, Toggle, TransitionOutcome, TransitionPolicy};
//!
//! let status = LoanStatus::available(1);
//! let from = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//!
//! let outcome = status
//!     .plan(&Toggle::LoanOut { from }, TransitionPolicy::Idempotent)
//!     .unwrap();
//!
//! match outcome {
//!     TransitionOutcome::Applied(next) => {
//!         assert_eq!(next.availability, Availability::OnLoan);
//!         assert_eq!(next.loan_from, Some(from));
//!     }
//!     TransitionOutcome::Unchanged => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod loan;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{AvailabilityFilter, EquipmentFilter, TypeFilter};
pub use loan::{BatchReport, Toggle, ToggleFailure, TransitionOutcome, TransitionPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Filter token meaning "every equipment type".
///
/// The dashboard's type dropdown always offers this entry ahead of the
/// distinct types found in the catalog, so no real type may use it.
pub const ALL_TYPES: &str = "ALL";

/// Date format accepted for loan start dates.
pub const LOAN_DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum owned quantity for a single catalog entry.
pub const MAX_QUANTITY: i64 = 9_999;
