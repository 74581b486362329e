//! # Validation Module
//!
//! Input validation for provisioning and loan requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (equip-cli)                                            │
//! │  ├── Argument parsing (clap)                                           │
//! │  └── THIS MODULE: dates, selections, catalog fields                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store (equip-db)                                             │
//! │  └── Loan state machine (equip_core::loan)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use equip_core::validation::{validate_loan_date, validate_selection};
//!
//! let from = validate_loan_date("2024-01-10").unwrap();
//! assert_eq!(from.to_string(), "2024-01-10");
//!
//! assert!(validate_selection(&[1, 2]).is_ok());
//! assert!(validate_selection(&[]).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{EquipmentId, NewEquipment};
use crate::{ALL_TYPES, LOAN_DATE_FORMAT, MAX_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TYPE_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_BRAND_LEN: usize = 100;

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a loan start date typed by staff.
///
/// ## Rules
/// - Must not be empty
/// - Must be a real calendar date in `YYYY-MM-DD` form
/// - No past/future restriction
///
/// ## Example
/// ```rust
/// use equip_core::validation::validate_loan_date;
///
/// assert!(validate_loan_date("2024-02-29").is_ok());
/// assert!(validate_loan_date("2023-02-29").is_err());
/// assert!(validate_loan_date("10/01/2024").is_err());
/// ```
pub fn validate_loan_date(input: &str) -> ValidationResult<NaiveDate> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "loan_from".to_string(),
        });
    }

    NaiveDate::parse_from_str(input, LOAN_DATE_FORMAT).map_err(|e| ValidationError::InvalidFormat {
        field: "loan_from".to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an equipment type label.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Must not be the `ALL` filter token (in any case), which would make the
///   type unreachable from the type dropdown
pub fn validate_equipment_type(equipment_type: &str) -> ValidationResult<()> {
    let equipment_type = equipment_type.trim();

    if equipment_type.is_empty() {
        return Err(ValidationError::Required {
            field: "type".to_string(),
        });
    }

    if equipment_type.chars().count() > MAX_TYPE_LEN {
        return Err(ValidationError::TooLong {
            field: "type".to_string(),
            max: MAX_TYPE_LEN,
        });
    }

    if equipment_type.eq_ignore_ascii_case(ALL_TYPES) {
        return Err(ValidationError::Reserved {
            field: "type".to_string(),
            value: equipment_type.to_string(),
        });
    }

    Ok(())
}

/// Validates an equipment display name (1..=200 characters).
pub fn validate_equipment_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a brand. Empty is allowed (unbranded kit).
pub fn validate_brand(brand: &str) -> ValidationResult<()> {
    if brand.trim().chars().count() > MAX_BRAND_LEN {
        return Err(ValidationError::TooLong {
            field: "brand".to_string(),
            max: MAX_BRAND_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an owned quantity.
///
/// ## Rules
/// - Zero is allowed (entry kept while awaiting replenishment)
/// - Must not exceed MAX_QUANTITY
///
/// ## Example
/// ```rust
/// use equip_core::validation::validate_quantity;
///
/// assert!(validate_quantity(0).is_ok());
/// assert!(validate_quantity(12).is_ok());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a provisioning request field by field.
pub fn validate_new_equipment(new: &NewEquipment) -> ValidationResult<()> {
    validate_equipment_type(&new.equipment_type)?;
    validate_equipment_name(&new.name)?;
    validate_brand(&new.brand)?;
    validate_quantity(new.quantity)?;
    Ok(())
}

/// Validates a multiselect before a batch toggle: at least one id.
pub fn validate_selection(ids: &[EquipmentId]) -> ValidationResult<()> {
    if ids.is_empty() {
        return Err(ValidationError::Required {
            field: "selection".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
