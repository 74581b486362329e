//! # Output Rendering
//!
//! Turns store results into text for stdout: aligned columns for people,
//! JSON for scripts. Logs go to stderr, so stdout carries only this.

use serde::Serialize;

use equip_core::{
    BatchReport, Equipment, EquipmentFilter, EquipmentId, EquipmentRecord, InventorySummary,
    Toggle,
};

use crate::config::OutputFormat;
use crate::error::CliResult;

/// Placeholder for null cells.
const EMPTY_CELL: &str = "-";

// =============================================================================
// Listings
// =============================================================================

pub fn types(types: &[String], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(types)?),
        OutputFormat::Table if types.is_empty() => Ok("No equipment types".to_string()),
        OutputFormat::Table => Ok(types.join("\n")),
    }
}

pub fn records(
    rows: &[EquipmentRecord],
    filter: &EquipmentFilter,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Table if rows.is_empty() => {
            Ok(format!("No equipment matches {}", filter))
        }
        OutputFormat::Table => Ok(table(
            &["ID", "TYPE", "NAME", "BRAND", "QTY", "STATUS", "LOAN FROM"],
            rows.iter().map(record_cells).collect(),
        )),
    }
}

pub fn record(row: &EquipmentRecord, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(row)?),
        OutputFormat::Table => {
            let fields = [
                ("id", row.id.to_string()),
                ("type", row.equipment_type.clone()),
                ("name", row.name.clone()),
                ("brand", or_empty(&row.brand)),
                ("quantity", row.quantity.to_string()),
                ("status", row.availability.to_string()),
                ("loan from", loan_from_cell(row)),
                ("created", row.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ];
            Ok(fields
                .iter()
                .map(|(k, v)| format!("{:<10} {}", k, v))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

pub fn equipment(item: &Equipment, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
        OutputFormat::Table => Ok(format!(
            "Added {} ({}) as {}, quantity {}",
            item.name, item.id, item.equipment_type, item.quantity
        )),
    }
}

pub fn summary(summary: &InventorySummary, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => {
            let mut rows: Vec<Vec<String>> = summary
                .by_type
                .iter()
                .map(|t| {
                    vec![
                        t.equipment_type.clone(),
                        t.items.to_string(),
                        t.quantity.to_string(),
                        t.available.to_string(),
                        t.on_loan.to_string(),
                    ]
                })
                .collect();
            rows.push(vec![
                "TOTAL".to_string(),
                summary.total_items.to_string(),
                summary.total_quantity.to_string(),
                summary.available.to_string(),
                summary.on_loan.to_string(),
            ]);
            Ok(table(&["TYPE", "ITEMS", "QTY", "AVAILABLE", "ON LOAN"], rows))
        }
    }
}

// =============================================================================
// Batch Reports
// =============================================================================

#[derive(Serialize)]
struct ReportView<'a> {
    action: &'static str,
    #[serde(flatten)]
    report: &'a BatchReport,
    /// Ids whose failure was a storage outage; rerunning the action may succeed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    retry: Vec<EquipmentId>,
}

fn retryable_ids(report: &BatchReport) -> Vec<EquipmentId> {
    report
        .failed
        .iter()
        .filter(|f| f.error.is_retryable())
        .map(|f| f.id)
        .collect()
}

pub fn report(report: &BatchReport, toggle: &Toggle, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ReportView {
            action: toggle.verb(),
            report,
            retry: retryable_ids(report),
        })?),
        OutputFormat::Table => {
            let (done, unchanged) = match toggle {
                Toggle::LoanOut { from } => (format!("Loaned out from {}", from), "Already on loan"),
                Toggle::Return => ("Returned".to_string(), "Already available"),
            };

            let mut lines = Vec::new();
            if !report.transitioned.is_empty() {
                lines.push(format!("{}: {}", done, join_ids(&report.transitioned)));
            }
            if !report.unchanged.is_empty() {
                lines.push(format!("{}: {}", unchanged, join_ids(&report.unchanged)));
            }
            for failure in &report.failed {
                lines.push(format!("Failed {}: {}", failure.id, failure.error));
            }
            lines.push(format!(
                "{} of {} succeeded",
                report.succeeded_count(),
                report.total()
            ));

            let retry = retryable_ids(report);
            if !retry.is_empty() {
                lines.push(format!(
                    "Inventory unavailable for {}; run the same command again",
                    join_ids(&retry)
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn record_cells(row: &EquipmentRecord) -> Vec<String> {
    vec![
        row.id.to_string(),
        row.equipment_type.clone(),
        row.name.clone(),
        or_empty(&row.brand),
        row.quantity.to_string(),
        row.availability.to_string(),
        loan_from_cell(row),
    ]
}

fn loan_from_cell(row: &EquipmentRecord) -> String {
    row.loan_from
        .map(|d| d.to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

fn or_empty(value: &str) -> String {
    if value.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

/// Left-aligned columns separated by two spaces.
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}
