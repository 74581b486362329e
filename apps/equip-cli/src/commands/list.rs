//! # List Commands
//!
//! `equip list` and `equip show`.
//!
//! ## Filter Flow
//! ```text
//! --availability on_loan --type Camera
//!        │                      │
//!        ▼                      ▼
//!  AvailabilityFilter::from_str  TypeFilter::parse
//!        │                      │
//!        └───────┬──────────────┘
//!                ▼
//!         EquipmentFilter ── bad value ──► MalformedFilter (exit 1)
//!                │
//!                ▼
//!   InventoryStore::list_equipment ── unreachable ──► empty listing
//! ```

use equip_core::{EquipmentFilter, EquipmentId};

use super::{Output, Shell};
use crate::error::CliResult;
use crate::output;

/// Lists equipment matching both facets.
pub async fn run(shell: &Shell, availability: &str, equipment_type: &str) -> CliResult<Output> {
    let filter = EquipmentFilter::parse(availability, equipment_type)?;
    let rows = shell.store().list_equipment(&filter).await;

    Ok(Output::success(output::records(&rows, &filter, shell.format())?))
}

/// Shows one item with its loan status.
pub async fn show(shell: &Shell, id: EquipmentId) -> CliResult<Output> {
    let record = shell.store().get(id).await?;

    Ok(Output::success(output::record(&record, shell.format())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::error::CliError;
    use chrono::NaiveDate;
    use equip_core::{CoreError, NewEquipment};

    async fn stocked() -> Shell {
        let shell = testing::shell().await;
        let repo = shell.database().equipment();
        repo.insert(&NewEquipment::new("Camera", "Canon R5", "Canon", 1)).await.unwrap();
        repo.insert(&NewEquipment::new("Tripod", "Manfrotto 055", "Manfrotto", 2)).await.unwrap();
        shell
    }

    #[tokio::test]
    async fn test_list_on_loan() {
        let shell = stocked().await;
        let from = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        shell.store().set_loaned_out([1], from).await;

        let out = run(&shell, "on_loan", "ALL").await.unwrap();
        assert!(out.text.contains("Canon R5"));
        assert!(out.text.contains("2024-01-10"));
        assert!(!out.text.contains("Manfrotto"));
    }

    #[tokio::test]
    async fn test_unknown_type_is_empty_not_error() {
        let shell = stocked().await;
        let out = run(&shell, "all", "Lens").await.unwrap();
        assert_eq!(out.text, "No equipment matches availability=all type=Lens");
    }

    #[tokio::test]
    async fn test_bad_availability_is_malformed_filter() {
        let shell = stocked().await;
        let err = run(&shell, "maybe", "ALL").await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Inventory(CoreError::MalformedFilter { .. })
        ));
    }

    #[tokio::test]
    async fn test_show_missing_id() {
        let shell = stocked().await;
        let err = show(&shell, 99).await.unwrap_err();
        assert!(matches!(err, CliError::Inventory(CoreError::NotFound { id: 99 })));
    }
}
