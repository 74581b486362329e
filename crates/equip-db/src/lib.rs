//! # equip-db: Database Layer for the Equipment Inventory
//!
//! SQLite persistence for the catalog and loan status, plus the
//! [`InventoryStore`] facade the shell calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Equipment Inventory Data Flow                       │
//! │                                                                         │
//! │  Shell command (equip list --availability on_loan)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     equip-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ InventoryStore│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (store.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │       │       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ EquipmentRepo │    │ 001_init.sql │  │   │
//! │  │   │ WAL, FKs      │    │ LoanStatusRepo│    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/equip/equip.db (platform data dir)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (equipment, loan status)
//! - [`store`] - Inventory facade with batch toggles
//!
//! ## Usage
//!
//! ```rust,ignore
//! use equip_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/equip.db")).await?;
//!
//! let store = db.inventory();
//! let report = store.set_loaned_out([1, 2], loan_from).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::InventoryStore;

// Repository re-exports for convenience
pub use repository::equipment::EquipmentRepository;
pub use repository::loan::LoanStatusRepository;
