//! # Listing Filters
//!
//! Typed filter object for equipment listings.
//!
//! ## Two Facets, ANDed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EquipmentFilter                                  │
//! │                                                                         │
//! │  availability: All | Available | OnLoan                                │
//! │  equipment_type: All | Exact("Camera")                                 │
//! │                                                                         │
//! │  (All, All)                 → every row                                │
//! │  (Available, All)           → availability = 'available'               │
//! │  (OnLoan, Exact("Lens"))    → availability = 'on_loan'                 │
//! │                               AND equipment_type = 'Lens'              │
//! │                                                                         │
//! │  equip-db translates each restricted facet into one bound parameter;   │
//! │  filter values never become SQL text.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Availability, EquipmentRecord};
use crate::ALL_TYPES;

// =============================================================================
// Availability Filter
// =============================================================================

/// Availability facet of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityFilter {
    /// No restriction.
    #[default]
    All,
    Available,
    OnLoan,
}

impl AvailabilityFilter {
    /// The availability this facet restricts to, if any.
    pub fn restriction(&self) -> Option<Availability> {
        match self {
            AvailabilityFilter::All => None,
            AvailabilityFilter::Available => Some(Availability::Available),
            AvailabilityFilter::OnLoan => Some(Availability::OnLoan),
        }
    }

    pub fn matches(&self, availability: Availability) -> bool {
        self.restriction().map_or(true, |a| a == availability)
    }
}

impl From<Availability> for AvailabilityFilter {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Available => AvailabilityFilter::Available,
            Availability::OnLoan => AvailabilityFilter::OnLoan,
        }
    }
}

impl std::fmt::Display for AvailabilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityFilter::All => write!(f, "all"),
            AvailabilityFilter::Available => write!(f, "available"),
            AvailabilityFilter::OnLoan => write!(f, "on_loan"),
        }
    }
}

impl std::str::FromStr for AvailabilityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(AvailabilityFilter::All);
        }
        s.parse::<Availability>()
            .map(AvailabilityFilter::from)
            .map_err(|_| CoreError::malformed_filter("availability", s))
    }
}

// =============================================================================
// Type Filter
// =============================================================================

/// Equipment type facet of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    /// No restriction (the `ALL` token).
    #[default]
    All,
    /// Exact, case-sensitive type match.
    Exact(String),
}

impl TypeFilter {
    /// Parses a dropdown value: `ALL` or an exact type string.
    ///
    /// Unknown types are accepted; they simply match nothing. An exact type
    /// is kept verbatim so rows written with stray whitespace stay selectable.
    pub fn parse(value: &str) -> CoreResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::malformed_filter("type", value));
        }
        if trimmed.eq_ignore_ascii_case(ALL_TYPES) {
            return Ok(TypeFilter::All);
        }
        Ok(TypeFilter::Exact(value.to_string()))
    }

    /// The type this facet restricts to, if any.
    pub fn restriction(&self) -> Option<&str> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Exact(t) => Some(t.as_str()),
        }
    }

    pub fn matches(&self, equipment_type: &str) -> bool {
        self.restriction().map_or(true, |t| t == equipment_type)
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => f.write_str(ALL_TYPES),
            TypeFilter::Exact(t) => f.write_str(t),
        }
    }
}

// =============================================================================
// Equipment Filter
// =============================================================================

/// Both facets of a listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentFilter {
    pub availability: AvailabilityFilter,
    pub equipment_type: TypeFilter,
}

impl EquipmentFilter {
    pub fn new(availability: AvailabilityFilter, equipment_type: TypeFilter) -> Self {
        EquipmentFilter {
            availability,
            equipment_type,
        }
    }

    /// The unrestricted listing.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only rows in the given state, any type.
    pub fn by_availability(availability: Availability) -> Self {
        EquipmentFilter::new(availability.into(), TypeFilter::All)
    }

    /// Parses raw selections from the shell.
    pub fn parse(availability: &str, equipment_type: &str) -> CoreResult<Self> {
        Ok(EquipmentFilter::new(
            availability.parse()?,
            TypeFilter::parse(equipment_type)?,
        ))
    }

    /// Sets the type facet.
    pub fn with_type(mut self, equipment_type: TypeFilter) -> Self {
        self.equipment_type = equipment_type;
        self
    }

    /// Pure predicate equivalent to the SQL translation in equip-db.
    pub fn matches(&self, record: &EquipmentRecord) -> bool {
        self.availability.matches(record.availability)
            && self.equipment_type.matches(&record.equipment_type)
    }

    /// True when neither facet restricts.
    pub fn is_unrestricted(&self) -> bool {
        self.availability == AvailabilityFilter::All && self.equipment_type == TypeFilter::All
    }
}

impl std::fmt::Display for EquipmentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "availability={} type={}", self.availability, self.equipment_type)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn record(id: i64, equipment_type: &str, availability: Availability) -> EquipmentRecord {
        EquipmentRecord {
            id,
            equipment_type: equipment_type.to_string(),
            name: format!("Item {}", id),
            brand: "Acme".to_string(),
            quantity: 1,
            created_at: Utc::now(),
            availability,
            loan_from: match availability {
                Availability::Available => None,
                Availability::OnLoan => NaiveDate::from_ymd_opt(2024, 1, 10),
            },
        }
    }

    #[test]
    fn test_availability_filter_parsing() {
        assert_eq!("All".parse::<AvailabilityFilter>().unwrap(), AvailabilityFilter::All);
        assert_eq!("yes".parse::<AvailabilityFilter>().unwrap(), AvailabilityFilter::Available);
        assert_eq!("on-loan".parse::<AvailabilityFilter>().unwrap(), AvailabilityFilter::OnLoan);

        let err = "sometimes".parse::<AvailabilityFilter>().unwrap_err();
        assert_eq!(err, CoreError::malformed_filter("availability", "sometimes"));
    }

    #[test]
    fn test_type_filter_parsing() {
        assert_eq!(TypeFilter::parse("ALL").unwrap(), TypeFilter::All);
        assert_eq!(TypeFilter::parse("all").unwrap(), TypeFilter::All);
        assert_eq!(TypeFilter::parse(" ALL ").unwrap(), TypeFilter::All);
        assert_eq!(
            TypeFilter::parse("Camera ").unwrap(),
            TypeFilter::Exact("Camera ".to_string())
        );
        assert!(!TypeFilter::parse("Camera ").unwrap().matches("Camera"));
        assert!(matches!(
            TypeFilter::parse("   "),
            Err(CoreError::MalformedFilter { .. })
        ));
    }

    #[test]
    fn test_filters_are_anded() {
        let filter = EquipmentFilter::new(
            AvailabilityFilter::OnLoan,
            TypeFilter::Exact("Camera".to_string()),
        );

        assert!(filter.matches(&record(1, "Camera", Availability::OnLoan)));
        assert!(!filter.matches(&record(2, "Camera", Availability::Available)));
        assert!(!filter.matches(&record(3, "Lens", Availability::OnLoan)));
    }

    #[test]
    fn test_unrestricted_matches_everything() {
        let filter = EquipmentFilter::all();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&record(1, "Camera", Availability::OnLoan)));
        assert!(filter.matches(&record(2, "Tripod", Availability::Available)));
    }

    #[test]
    fn test_state_filters_partition_rows() {
        let rows = vec![
            record(1, "Camera", Availability::Available),
            record(2, "Camera", Availability::OnLoan),
            record(3, "Lens", Availability::Available),
        ];
        let available = EquipmentFilter::by_availability(Availability::Available);
        let on_loan = EquipmentFilter::by_availability(Availability::OnLoan);

        for row in &rows {
            assert_ne!(available.matches(row), on_loan.matches(row));
        }
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        let filter = EquipmentFilter::all().with_type(TypeFilter::Exact("Camera".to_string()));
        assert!(!filter.matches(&record(1, "camera", Availability::Available)));
    }

    #[test]
    fn test_parse_combined() {
        let filter = EquipmentFilter::parse("available", "Lens").unwrap();
        assert_eq!(filter.availability, AvailabilityFilter::Available);
        assert_eq!(filter.equipment_type, TypeFilter::Exact("Lens".to_string()));
        assert_eq!(filter.to_string(), "availability=available type=Lens");

        assert!(EquipmentFilter::parse("bogus", "ALL").is_err());
    }
}
