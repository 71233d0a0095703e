//! `budgetbook` - A personal finance ledger with envelope budgeting
//!
//! This crate provides the core engine of an envelope-budgeting ledger:
//! importing bank statement exports without creating duplicates, matching
//! them against pre-declared expected entries, allocating each transaction
//! across budget envelopes with auto-balancing of remainders, and keeping
//! derived account/envelope balances and the per-user reconciliation queue
//! consistent as allocations change.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Derived-value cache for balances and the unbalanced-entry work queue
pub mod cache;
/// Configuration management for database connections and schema
pub mod config;
/// Core business logic - import, allocation, reconciliation, and transfers
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Statement parser variants and their registry
pub mod parsers;

#[cfg(test)]
pub mod test_utils;
