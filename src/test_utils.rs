//! Shared test utilities for `budgetbook`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    cache::BalanceCache,
    core::{account, entry, envelope},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// The user id all test fixtures belong to.
pub const TEST_USER: i64 = 1;

/// Initializes tracing for a test, once; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a `%Y-%m-%d` date literal.
#[allow(clippy::unwrap_used)]
pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Creates a test account with its start date at the Unix epoch.
pub async fn create_test_account(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::account::Model> {
    account::create_account(db, TEST_USER, name.to_string(), date("1970-01-01")).await
}

/// Creates a test envelope with an empty description, not pinned.
pub async fn create_test_envelope(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::envelope::Model> {
    envelope::create_envelope(db, TEST_USER, name.to_string(), String::new(), false).await
}

/// Creates a (non-expected, import-less) test entry through the save wrapper
/// so the balance cache sees it.
pub async fn create_test_entry(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    account: &entities::account::Model,
    amount: Decimal,
    date_str: &str,
    description: &str,
) -> Result<entities::entry::Model> {
    entry::save_entry(
        db,
        cache,
        entities::entry::ActiveModel {
            amount: Set(amount),
            date: Set(date(date_str)),
            description: Set(description.to_string()),
            account_id: Set(account.id),
            import_id: Set(None),
            expected: Set(false),
            user_id: Set(account.user_id),
            ..Default::default()
        },
    )
    .await
}
