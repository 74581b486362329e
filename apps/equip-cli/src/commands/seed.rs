//! `equip seed`: provisions a demo catalog into an empty database.

use tracing::info;

use equip_core::NewEquipment;

use super::{Output, Shell};
use crate::error::CliResult;

/// (type, name, brand) of the demo catalog, grouped by type.
const DEMO_CATALOG: &[(&str, &str, &str)] = &[
    ("Camera", "Canon R5", "Canon"),
    ("Camera", "Sony A7 IV", "Sony"),
    ("Camera", "Nikon Z6 II", "Nikon"),
    ("Lens", "RF 24-70mm f/2.8", "Canon"),
    ("Lens", "FE 50mm f/1.8", "Sony"),
    ("Lens", "35mm f/1.4 DG Art", "Sigma"),
    ("Tripod", "055 Aluminium", "Manfrotto"),
    ("Tripod", "Traveler Series 1", "Gitzo"),
    ("Microphone", "NTG3", "Rode"),
    ("Microphone", "SM7B", "Shure"),
    ("Microphone", "MKE 600", "Sennheiser"),
    ("Lighting", "120d II", "Aputure"),
    ("Lighting", "SL60W", "Godox"),
];

/// Entries taken from the demo catalog, at most `per_type` of each type.
pub fn demo_items(per_type: usize) -> Vec<NewEquipment> {
    let mut items = Vec::new();
    let mut current = "";
    let mut taken = 0;

    for (index, &(equipment_type, name, brand)) in DEMO_CATALOG.iter().enumerate() {
        if equipment_type != current {
            current = equipment_type;
            taken = 0;
        }
        if taken < per_type {
            let quantity = (index % 3) as i64 + 1;
            items.push(NewEquipment::new(equipment_type, name, brand, quantity));
            taken += 1;
        }
    }

    items
}

pub async fn run(shell: &Shell, per_type: usize) -> CliResult<Output> {
    let repo = shell.database().equipment();

    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "Catalog not empty, skipping seed");
        return Ok(Output::success(format!(
            "Catalog already has {} items; nothing seeded",
            existing
        )));
    }

    let items = demo_items(per_type);
    for item in &items {
        repo.insert(item).await?;
    }

    info!(count = items.len(), "Demo catalog seeded");
    Ok(Output::success(format!("Seeded {} items", items.len())))
}
