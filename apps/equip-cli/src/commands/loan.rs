//! # Loan Commands
//!
//! `equip loan` and `equip return`: batch toggles on selected ids.
//!
//! ## Confirm Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  equip loan --staff ana --from 2024-01-10 1 2 999                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate: staff present, at least one id, real calendar date          │
//! │       │          (any failure here ──► nothing is touched, exit 1)     │
//! │       ▼                                                                 │
//! │  span staff_action{staff="ana"}                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryStore::set_loaned_out({1, 2, 999}, 2024-01-10)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Loaned out from 2024-01-10: 1, 2                                      │
//! │  Failed 999: Equipment not found: 999                                  │
//! │  2 of 3 succeeded                                  ──► exit 2          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, info_span, Instrument};

use equip_core::validation::{validate_loan_date, validate_selection};
use equip_core::{EquipmentId, Toggle, ValidationError};

use super::{Output, Shell};
use crate::error::CliResult;
use crate::output;

/// Marks `ids` as loaned out starting `from` (YYYY-MM-DD).
pub async fn loan_out(
    shell: &Shell,
    staff: &str,
    from: &str,
    ids: &[EquipmentId],
) -> CliResult<Output> {
    let staff = validate_staff(staff)?;
    validate_selection(ids)?;
    let from = validate_loan_date(from)?;

    apply(shell, staff, ids, Toggle::LoanOut { from }).await
}

/// Marks `ids` as returned.
pub async fn return_items(shell: &Shell, staff: &str, ids: &[EquipmentId]) -> CliResult<Output> {
    let staff = validate_staff(staff)?;
    validate_selection(ids)?;

    apply(shell, staff, ids, Toggle::Return).await
}

async fn apply(
    shell: &Shell,
    staff: &str,
    ids: &[EquipmentId],
    toggle: Toggle,
) -> CliResult<Output> {
    let store = shell.store();
    let span = info_span!("staff_action", staff = %staff, action = toggle.verb());

    let report = async {
        info!(ids = ?ids, "Confirming selection");
        match toggle {
            Toggle::LoanOut { from } => store.set_loaned_out(ids.iter().copied(), from).await,
            Toggle::Return => store.set_returned(ids.iter().copied()).await,
        }
    }
    .instrument(span)
    .await;

    let text = output::report(&report, &toggle, shell.format())?;
    Ok(Output::for_report(text, &report))
}

/// Acting staff member; replaces the dashboard's login flag.
fn validate_staff(staff: &str) -> Result<&str, ValidationError> {
    let staff = staff.trim();
    if staff.is_empty() {
        return Err(ValidationError::Required {
            field: "staff".to_string(),
        });
    }
    Ok(staff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{testing, Outcome};
    use crate::config::AppConfig;
    use crate::error::CliError;
    use equip_core::{Availability, CoreError, NewEquipment, TransitionPolicy};

    async fn stock(shell: &Shell) {
        let repo = shell.database().equipment();
        for name in ["Canon R5", "Sony A7"] {
            repo.insert(&NewEquipment::new("Camera", name, "", 1)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_loan_then_return() {
        let shell = testing::shell().await;
        stock(&shell).await;

        let out = loan_out(&shell, "ana", "2024-01-10", &[1]).await.unwrap();
        assert_eq!(out.outcome, Outcome::Success);
        assert!(out.text.starts_with("Loaned out from 2024-01-10: 1"));

        let out = return_items(&shell, "ana", &[1]).await.unwrap();
        assert_eq!(out.outcome, Outcome::Success);

        let item = shell.store().get(1).await.unwrap();
        assert_eq!(item.availability, Availability::Available);
        assert_eq!(item.loan_from, None);
    }

    #[tokio::test]
    async fn test_partial_batch_exits_two() {
        let shell = testing::shell().await;
        stock(&shell).await;

        let out = loan_out(&shell, "ana", "2024-01-10", &[1, 2, 999]).await.unwrap();

        assert_eq!(out.outcome, Outcome::PartialFailure);
        assert!(out.text.contains("Failed 999: Equipment not found: 999"));
        assert!(out.text.ends_with("2 of 3 succeeded"));
    }

    #[tokio::test]
    async fn test_bad_date_touches_nothing() {
        let shell = testing::shell().await;
        stock(&shell).await;

        let err = loan_out(&shell, "ana", "2024-02-30", &[1]).await.unwrap_err();
        assert!(matches!(err, CliError::Inventory(CoreError::Validation(_))));
        assert_eq!(
            shell.store().get(1).await.unwrap().availability,
            Availability::Available
        );
    }

    #[tokio::test]
    async fn test_staff_and_selection_required() {
        let shell = testing::shell().await;

        assert!(return_items(&shell, "  ", &[1]).await.is_err());
        assert!(return_items(&shell, "ana", &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_strict_policy_from_config() {
        let mut config = AppConfig::default();
        config.loans.policy = TransitionPolicy::Strict;
        let shell = testing::shell_with(config).await;
        stock(&shell).await;

        let out = return_items(&shell, "ana", &[1]).await.unwrap();
        assert_eq!(out.outcome, Outcome::PartialFailure);
        assert!(out.text.contains("already available"));
    }
}
