//! Entry business logic - save/delete wrappers, lookups, and expected
//! entries.
//!
//! `save_entry` is the single write path for entries; it persists the row and
//! lets the balance cache recompute everything an entry save can affect.
//! `expect` creates a placeholder entry ahead of an anticipated transaction,
//! optionally with immediate allocations; the import engine later resolves it
//! by amount.

use crate::{
    cache::BalanceCache,
    core::{allocation, envelope, item},
    entities::{AccountModel, Entry, EntryModel, entry, item as item_entity},
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TryIntoModel, prelude::*};
use tracing::debug;

/// Persists an entry (insert or update) and notifies the balance cache.
pub async fn save_entry(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    entry: entry::ActiveModel,
) -> Result<EntryModel> {
    let saved = entry.save(db).await?.try_into_model()?;
    cache.entry_saved(db, &saved).await?;
    Ok(saved)
}

/// Finds an entry by id, scoped to the owning user.
pub async fn get_entry(db: &DatabaseConnection, user_id: i64, entry_id: i64) -> Result<EntryModel> {
    Entry::find_by_id(entry_id)
        .filter(entry::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "entry",
            id: entry_id,
        })
}

/// Returns an account's entries, newest first (ties broken by amount
/// descending, the ledger's display order).
pub async fn entries_for_account(
    db: &DatabaseConnection,
    account_id: i64,
) -> Result<Vec<EntryModel>> {
    Entry::find()
        .filter(entry::Column::AccountId.eq(account_id))
        .order_by_desc(entry::Column::Date)
        .order_by_desc(entry::Column::Amount)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes an entry's remaining balance: its amount minus the sum of its
/// item amounts. Zero means the entry is fully allocated.
pub async fn entry_balance(db: &DatabaseConnection, entry: &EntryModel) -> Result<Decimal> {
    let items = item::items_for_entry(db, entry.id).await?;
    Ok(entry.amount - items.iter().map(|i| i.amount).sum::<Decimal>())
}

/// Deletes an entry and all of its items, keeping every derived cache value
/// consistent with their absence.
pub async fn delete_entry(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    entry: EntryModel,
) -> Result<()> {
    for it in item::items_for_entry(db, entry.id).await? {
        item::delete_item(db, cache, it).await?;
    }
    let snapshot = entry.clone();
    entry.delete(db).await?;
    cache.entry_deleted(&snapshot).await;
    Ok(())
}

/// One planned allocation attached to an expected entry. A `None` amount
/// takes an even share of whatever the explicit amounts leave over.
#[derive(Clone, Debug)]
pub struct ExpectedAllocation {
    /// Target envelope; requests without one are ignored
    pub envelope_id: Option<i64>,
    /// Explicit amount, or None for an even share of the remainder
    pub amount: Option<Decimal>,
    /// Item description
    pub description: String,
}

/// Creates an expected entry: a placeholder dated today that a later import
/// resolves by amount. Allocations may be declared up front and follow the
/// same even-split rule as the allocation engine.
pub async fn expect(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    account: &AccountModel,
    amount: Decimal,
    description: String,
    allocations: Vec<ExpectedAllocation>,
) -> Result<EntryModel> {
    let entry = save_entry(
        db,
        cache,
        entry::ActiveModel {
            amount: Set(amount),
            date: Set(Utc::now().date_naive()),
            description: Set(description),
            account_id: Set(account.id),
            import_id: Set(None),
            expected: Set(true),
            user_id: Set(account.user_id),
            ..Default::default()
        },
    )
    .await?;

    // First pass: figure out what is left over and how many ways to split it
    let mut split_amount = entry.amount;
    let mut split_n = 0usize;
    for alloc in &allocations {
        if alloc.envelope_id.is_none() {
            continue;
        }
        match alloc.amount {
            Some(amount) => split_amount -= amount,
            None => split_n += 1,
        }
    }
    let mut shares = allocation::even_shares(split_amount, split_n).into_iter();

    for alloc in allocations {
        let Some(envelope_id) = alloc.envelope_id else {
            continue;
        };
        let envelope = envelope::get_envelope(db, account.user_id, envelope_id).await?;
        let amount = match alloc.amount {
            Some(amount) => amount,
            // First pass counted the blanks, so a share is always there
            None => shares.next().unwrap_or(Decimal::ZERO),
        };
        item::save_item(
            db,
            cache,
            &entry,
            item_entity::ActiveModel {
                amount: Set(amount),
                description: Set(alloc.description),
                envelope_id: Set(envelope.id),
                entry_id: Set(entry.id),
                user_id: Set(account.user_id),
                ..Default::default()
            },
        )
        .await?;
    }

    debug!(entry_id = entry.id, %entry.amount, "expected entry created");
    Ok(entry)
}
