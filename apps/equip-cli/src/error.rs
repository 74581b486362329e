//! # Shell Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  equip loan --staff ana --from 2024-13-01 1 2                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation Error? ── ValidationError ──► CliError ──► exit 1          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  InventoryStore::set_loaned_out ──► BatchReport                        │
//! │         │                                                               │
//! │         ├── every id ok ─────────────────────────────────► exit 0      │
//! │         └── some ids failed (printed per id) ────────────► exit 2      │
//! │                                                                         │
//! │  Config / database open failures ── CliError ──► anyhow ──► exit 1     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-id toggle failures are data, not errors: they live in the
//! `BatchReport` and never become a `CliError`.

use equip_core::{CoreError, ValidationError};
use equip_db::DbError;
use thiserror::Error;

/// Errors raised by shell commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// File system error (config file, data directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened or a query failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// The inventory rejected the request (bad filter, unknown id, ...).
    #[error(transparent)]
    Inventory(#[from] CoreError),

    /// Output could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Inventory(err.into())
    }
}

/// Result type for shell commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_wraps_as_inventory_error() {
        let err: CliError = ValidationError::Required {
            field: "ids".to_string(),
        }
        .into();

        assert!(matches!(err, CliError::Inventory(CoreError::Validation(_))));
    }

    #[test]
    fn test_inventory_message_is_transparent() {
        let err: CliError = CoreError::NotFound { id: 7 }.into();
        assert_eq!(err.to_string(), "Equipment not found: 7");
    }
}
