//! `equip summary`: per-type counts and totals.

use super::{Output, Shell};
use crate::error::CliResult;
use crate::output;

pub async fn run(shell: &Shell) -> CliResult<Output> {
    let summary = shell.store().summary().await?;

    Ok(Output::success(output::summary(&summary, shell.format())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::config::{AppConfig, OutputFormat};
    use chrono::NaiveDate;
    use equip_core::NewEquipment;

    #[tokio::test]
    async fn test_summary_json() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;
        let shell = testing::shell_with(config).await;

        let repo = shell.database().equipment();
        repo.insert(&NewEquipment::new("Camera", "C1", "", 2)).await.unwrap();
        repo.insert(&NewEquipment::new("Camera", "C2", "", 1)).await.unwrap();
        shell
            .store()
            .set_loaned_out([2], NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
            .await;

        let out = run(&shell).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();

        assert_eq!(value["total_items"], 2);
        assert_eq!(value["total_quantity"], 3);
        assert_eq!(value["on_loan"], 1);
        assert_eq!(value["by_type"][0]["type"], "Camera");
    }

    #[tokio::test]
    async fn test_summary_table_has_total_row() {
        let shell = testing::shell().await;
        let out = run(&shell).await.unwrap();
        assert_eq!(out.text, "TYPE   ITEMS  QTY  AVAILABLE  ON LOAN\nTOTAL  0      0    0          0");
    }
}
