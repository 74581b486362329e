//! # Domain Types
//!
//! Core domain types used throughout the equipment inventory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  1 : 1  ┌─────────────────┐                        │
//! │  │    Equipment    │◄───────►│   LoanStatus    │                        │
//! │  │  ─────────────  │         │  ─────────────  │                        │
//! │  │  id (i64)       │         │  equipment_id   │                        │
//! │  │  equipment_type │         │  availability   │                        │
//! │  │  name, brand    │         │  loan_from      │                        │
//! │  │  quantity       │         └─────────────────┘                        │
//! │  │  created_at     │                                                    │
//! │  └─────────────────┘                                                    │
//! │           │ inner join                                                  │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │ EquipmentRecord │   │  Availability   │                              │
//! │  │  (listing row)  │   │  Available      │                              │
//! │  └─────────────────┘   │  OnLoan         │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Loan Rule
//! `loan_from` is `None` exactly when the item is `Available`. Every
//! constructor and every transition in [`crate::loan`] preserves it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Identifier of a catalog entry (SQLite integer primary key).
pub type EquipmentId = i64;

// =============================================================================
// Availability
// =============================================================================

/// Loan state of a single equipment id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// On the shelf, can be loaned out.
    Available,
    /// Currently loaned out.
    OnLoan,
}

impl Availability {
    /// Storage / wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::OnLoan => "on_loan",
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Availability::Available
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = CoreError;

    /// Accepts the storage names plus the dashboard's legacy Yes/No wording.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" | "yes" => Ok(Availability::Available),
            "on_loan" | "on-loan" | "onloan" | "no" => Ok(Availability::OnLoan),
            _ => Err(CoreError::malformed_filter("availability", s)),
        }
    }
}

// =============================================================================
// Equipment
// =============================================================================

/// A catalog entry.
///
/// Reference data: created by provisioning, only `quantity` changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Equipment {
    /// Stable identifier assigned at creation.
    pub id: EquipmentId,

    /// Category label, used as a filter facet (e.g. "Camera").
    #[serde(rename = "type")]
    pub equipment_type: String,

    /// Display name (e.g. "Canon R5").
    pub name: String,

    /// Manufacturer.
    pub brand: String,

    /// Units owned. Loans do not decrement this.
    pub quantity: i64,

    /// When the entry was created. Never mutated.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Provisioning input for a new catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEquipment {
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub quantity: i64,
}

impl NewEquipment {
    pub fn new(
        equipment_type: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        quantity: i64,
    ) -> Self {
        NewEquipment {
            equipment_type: equipment_type.into(),
            name: name.into(),
            brand: brand.into(),
            quantity,
        }
    }
}

// =============================================================================
// Loan Status
// =============================================================================

/// Loan state row, exactly one per equipment id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct LoanStatus {
    pub equipment_id: EquipmentId,
    pub availability: Availability,
    /// Date the current loan began; `None` while available.
    #[ts(as = "Option<String>")]
    pub loan_from: Option<NaiveDate>,
}

impl LoanStatus {
    /// Status of a freshly provisioned item.
    pub const fn available(equipment_id: EquipmentId) -> Self {
        LoanStatus {
            equipment_id,
            availability: Availability::Available,
            loan_from: None,
        }
    }

    /// Status of an item loaned out since `from`.
    pub const fn on_loan(equipment_id: EquipmentId, from: NaiveDate) -> Self {
        LoanStatus {
            equipment_id,
            availability: Availability::OnLoan,
            loan_from: Some(from),
        }
    }

    /// Checks the loan rule: `loan_from` is null iff available.
    pub fn is_consistent(&self) -> bool {
        match self.availability {
            Availability::Available => self.loan_from.is_none(),
            Availability::OnLoan => self.loan_from.is_some(),
        }
    }
}

// =============================================================================
// Equipment Record
// =============================================================================

/// Listing row: an Equipment inner-joined with its LoanStatus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct EquipmentRecord {
    pub id: EquipmentId,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub name: String,
    pub brand: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub availability: Availability,
    #[ts(as = "Option<String>")]
    pub loan_from: Option<NaiveDate>,
}

impl EquipmentRecord {
    /// The loan half of the joined row.
    pub fn loan_status(&self) -> LoanStatus {
        LoanStatus {
            equipment_id: self.id,
            availability: self.availability,
            loan_from: self.loan_from,
        }
    }

    /// The catalog half of the joined row.
    pub fn equipment(&self) -> Equipment {
        Equipment {
            id: self.id,
            equipment_type: self.equipment_type.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            quantity: self.quantity,
            created_at: self.created_at,
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Per-type counts for the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TypeSummary {
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Catalog entries of this type.
    pub items: i64,
    /// Sum of owned units.
    pub quantity: i64,
    pub available: i64,
    pub on_loan: i64,
}

/// Whole-catalog counts for the overview page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventorySummary {
    pub total_items: i64,
    pub total_quantity: i64,
    pub available: i64,
    pub on_loan: i64,
    pub by_type: Vec<TypeSummary>,
}

impl InventorySummary {
    /// Folds per-type rows into catalog totals.
    pub fn from_types(by_type: Vec<TypeSummary>) -> Self {
        let mut summary = InventorySummary::default();
        for row in &by_type {
            summary.total_items += row.items;
            summary.total_quantity += row.quantity;
            summary.available += row.available;
            summary.on_loan += row.on_loan;
        }
        summary.by_type = by_type;
        summary
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_availability_parsing() {
        assert_eq!("available".parse::<Availability>().unwrap(), Availability::Available);
        assert_eq!("Yes".parse::<Availability>().unwrap(), Availability::Available);
        assert_eq!("on_loan".parse::<Availability>().unwrap(), Availability::OnLoan);
        assert_eq!("OnLoan".parse::<Availability>().unwrap(), Availability::OnLoan);
        assert_eq!("No".parse::<Availability>().unwrap(), Availability::OnLoan);
        assert!("lost".parse::<Availability>().is_err());
    }

    #[test]
    fn test_availability_default() {
        assert_eq!(Availability::default(), Availability::Available);
    }

    #[test]
    fn test_loan_status_consistency() {
        assert!(LoanStatus::available(1).is_consistent());
        assert!(LoanStatus::on_loan(1, date(2024, 1, 10)).is_consistent());

        let broken = LoanStatus {
            equipment_id: 1,
            availability: Availability::Available,
            loan_from: Some(date(2024, 1, 10)),
        };
        assert!(!broken.is_consistent());

        let broken = LoanStatus {
            equipment_id: 1,
            availability: Availability::OnLoan,
            loan_from: None,
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_record_splits_into_halves() {
        let record = EquipmentRecord {
            id: 1,
            equipment_type: "Camera".to_string(),
            name: "Canon R5".to_string(),
            brand: "Canon".to_string(),
            quantity: 2,
            created_at: Utc::now(),
            availability: Availability::OnLoan,
            loan_from: Some(date(2024, 1, 10)),
        };

        assert_eq!(record.loan_status(), LoanStatus::on_loan(1, date(2024, 1, 10)));
        assert_eq!(record.equipment().name, "Canon R5");
    }

    #[test]
    fn test_summary_folds_types() {
        let summary = InventorySummary::from_types(vec![
            TypeSummary {
                equipment_type: "Camera".to_string(),
                items: 3,
                quantity: 5,
                available: 2,
                on_loan: 1,
            },
            TypeSummary {
                equipment_type: "Tripod".to_string(),
                items: 2,
                quantity: 2,
                available: 2,
                on_loan: 0,
            },
        ]);

        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.total_quantity, 7);
        assert_eq!(summary.available, 4);
        assert_eq!(summary.on_loan, 1);
        assert_eq!(summary.by_type.len(), 2);
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = EquipmentRecord {
            id: 1,
            equipment_type: "Camera".to_string(),
            name: "Canon R5".to_string(),
            brand: "Canon".to_string(),
            quantity: 1,
            created_at: Utc::now(),
            availability: Availability::Available,
            loan_from: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Camera");
        assert_eq!(json["availability"], "available");
        assert!(json["loan_from"].is_null());
    }
}
