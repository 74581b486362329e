//! Catalog commands: `equip add` (provisioning) and `equip restock`
//! (replenishment).

use tracing::info;

use equip_core::{EquipmentId, NewEquipment};

use super::{Output, Shell};
use crate::error::CliResult;
use crate::output;

/// Provisions one item; it starts available.
pub async fn add(shell: &Shell, new: NewEquipment) -> CliResult<Output> {
    let item = shell.database().equipment().insert(&new).await?;

    Ok(Output::success(output::equipment(&item, shell.format())?))
}

/// Sets the owned quantity of an item.
pub async fn restock(shell: &Shell, id: EquipmentId, quantity: i64) -> CliResult<Output> {
    shell
        .database()
        .equipment()
        .update_quantity(id, quantity)
        .await
        .map_err(|e| e.into_core(id))?;

    info!(id, quantity, "Quantity updated");

    let record = shell.store().get(id).await?;
    Ok(Output::success(output::record(&record, shell.format())?))
}
