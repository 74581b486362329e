//! # Shell Commands
//!
//! One module per subcommand. Every command takes the [`Shell`] (database
//! handle plus resolved configuration) and returns an [`Output`] for
//! `main` to print.
//!
//! ## Command Categories
//!
//! ### Reads (`types`, `list`, `show`, `summary`)
//! `types` and `list` degrade to an empty listing when the store is
//! unreachable; `show` and `summary` report the error.
//!
//! ### Loans (`loan`, `return`)
//! Batch toggles. A batch with per-id failures prints every failure and
//! exits with [`Outcome::PartialFailure`].
//!
//! ### Catalog (`add`, `restock`, `seed`)
//! Provisioning and replenishment.

pub mod catalog;
pub mod list;
pub mod loan;
pub mod seed;
pub mod summary;
pub mod types;

use std::process::ExitCode;

use equip_core::BatchReport;
use equip_db::{Database, InventoryStore};

use crate::config::{AppConfig, OutputFormat};

/// Request-scoped state handed to every command.
#[derive(Debug, Clone)]
pub struct Shell {
    db: Database,
    config: AppConfig,
}

impl Shell {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Shell { db, config }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Inventory store using the configured same-state policy.
    pub fn store(&self) -> InventoryStore {
        self.db.inventory_with_policy(self.config.policy())
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format()
    }
}

/// How a command finished, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit 0.
    Success,
    /// Exit 2: a batch toggle had per-id failures.
    PartialFailure,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::PartialFailure => ExitCode::from(2),
        }
    }
}

/// Rendered command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub outcome: Outcome,
}

impl Output {
    pub fn success(text: String) -> Self {
        Output {
            text,
            outcome: Outcome::Success,
        }
    }

    pub fn for_report(text: String, report: &BatchReport) -> Self {
        let outcome = if report.is_complete_success() {
            Outcome::Success
        } else {
            Outcome::PartialFailure
        };
        Output { text, outcome }
    }
}
