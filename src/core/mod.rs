//! Core business logic - framework-agnostic ledger operations.
//!
//! Each module owns one concern: statement import, allocation editing, the
//! reconciliation queue, envelope transfers, and the user-scoped CRUD around
//! them. Everything is async over a `DatabaseConnection` plus a
//! [`crate::cache::BalanceCache`], and returns the crate's `Result`.

pub mod account;
pub mod allocation;
pub mod entry;
pub mod envelope;
pub mod import;
pub mod item;
pub mod note;
pub mod process;
pub mod settings;
pub mod tag;
