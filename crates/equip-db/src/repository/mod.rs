//! # Repository Module
//!
//! Database repository implementations for the inventory store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  InventoryStore                                                        │
//! │       │                                                                 │
//! │       ├──► EquipmentRepository                                         │
//! │       │    ├── list_types(&self)                                       │
//! │       │    ├── list(&self, filter)                                     │
//! │       │    ├── insert(&self, new)                                      │
//! │       │    └── summary(&self)                                          │
//! │       │                                                                 │
//! │       └──► LoanStatusRepository                                        │
//! │            ├── get(&self, id)                                          │
//! │            └── apply(&self, id, toggle, policy)  ← one tx per id       │
//! │                 │                                                       │
//! │                 │  SQL Query                                            │
//! │                 ▼                                                       │
//! │            SQLite Database                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EquipmentRepository`](equipment::EquipmentRepository) - Catalog reads and provisioning
//! - [`LoanStatusRepository`](loan::LoanStatusRepository) - Loan state transitions

pub mod equipment;
pub mod loan;
