//! `equip types`: distinct equipment types for the type filter.

use tracing::debug;

use super::{Output, Shell};
use crate::error::CliResult;
use crate::output;

pub async fn run(shell: &Shell) -> CliResult<Output> {
    let types = shell.store().list_types().await;
    debug!(count = types.len(), "Fetched types");

    Ok(Output::success(output::types(&types, shell.format())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use equip_core::NewEquipment;

    #[tokio::test]
    async fn test_types_lists_each_once() {
        let shell = testing::shell().await;
        let repo = shell.database().equipment();
        repo.insert(&NewEquipment::new("Lens", "L1", "", 1)).await.unwrap();
        repo.insert(&NewEquipment::new("Camera", "C1", "", 1)).await.unwrap();
        repo.insert(&NewEquipment::new("Lens", "L2", "", 1)).await.unwrap();

        let out = run(&shell).await.unwrap();
        assert_eq!(out.text, "Camera\nLens");
    }

    #[tokio::test]
    async fn test_unreachable_store_prints_empty() {
        let shell = testing::shell().await;
        shell.database().close().await;

        let out = run(&shell).await.unwrap();
        assert_eq!(out.text, "No equipment types");
    }
}
