//! Derived-value cache over account balances, envelope balances, memoized
//! item dates, and per-user unbalanced-entry sets.
//!
//! Reads are read-through: a miss computes the value from the store and keeps
//! it with no expiry. Writes never repopulate in bulk; the `entry_saved` /
//! `item_saved` hooks (called by the save wrappers in `core::entry` and
//! `core::item`) invalidate exactly the values a save can change and adjust
//! unbalanced-set membership incrementally. The per-user skipped set for the
//! reconciliation queue also lives here; it is transient by design and is
//! lost on restart.

use crate::entities::{Entry, EntryModel, Item, ItemColumn, ItemModel, entry, item};
use crate::errors::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// Process-wide cache of derived ledger values.
///
/// One instance is shared by all operations over one database; the cached
/// values are a shadow of the store, never a source of truth.
#[derive(Debug, Default)]
pub struct BalanceCache {
    account_balances: RwLock<HashMap<i64, Decimal>>,
    envelope_balances: RwLock<HashMap<i64, Decimal>>,
    item_dates: RwLock<HashMap<i64, NaiveDate>>,
    unbalanced_entries: RwLock<HashMap<i64, HashSet<i64>>>,
    skipped_entries: RwLock<HashMap<i64, HashSet<i64>>>,
}

impl BalanceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the account's balance: the negative sum of its non-expected
    /// entry amounts. Computed from the store on a cache miss.
    pub async fn get_account_balance(
        &self,
        db: &DatabaseConnection,
        account_id: i64,
    ) -> Result<Decimal> {
        if let Some(balance) = self.account_balances.read().await.get(&account_id) {
            return Ok(*balance);
        }

        let entries = Entry::find()
            .filter(entry::Column::AccountId.eq(account_id))
            .filter(entry::Column::Expected.eq(false))
            .all(db)
            .await?;
        let balance = -entries.iter().map(|e| e.amount).sum::<Decimal>();

        trace!(account_id, %balance, "account balance computed on cache miss");
        self.account_balances
            .write()
            .await
            .insert(account_id, balance);
        Ok(balance)
    }

    /// Drops the cached balance for an account.
    pub async fn clear_account_balance(&self, account_id: i64) {
        self.account_balances.write().await.remove(&account_id);
    }

    /// Returns the envelope's balance: the negative sum of the item amounts
    /// allocated to it. Computed from the store on a cache miss.
    pub async fn get_envelope_balance(
        &self,
        db: &DatabaseConnection,
        envelope_id: i64,
    ) -> Result<Decimal> {
        if let Some(balance) = self.envelope_balances.read().await.get(&envelope_id) {
            return Ok(*balance);
        }

        let items = Item::find()
            .filter(ItemColumn::EnvelopeId.eq(envelope_id))
            .all(db)
            .await?;
        let balance = -items.iter().map(|i| i.amount).sum::<Decimal>();

        trace!(envelope_id, %balance, "envelope balance computed on cache miss");
        self.envelope_balances
            .write()
            .await
            .insert(envelope_id, balance);
        Ok(balance)
    }

    /// Drops the cached balance for an envelope.
    pub async fn clear_envelope_balance(&self, envelope_id: i64) {
        self.envelope_balances.write().await.remove(&envelope_id);
    }

    /// Returns the item's display date (its entry's date), memoized.
    pub async fn get_item_date(&self, db: &DatabaseConnection, item: &ItemModel) -> Result<NaiveDate> {
        if let Some(date) = self.item_dates.read().await.get(&item.id) {
            return Ok(*date);
        }

        let entry = Entry::find_by_id(item.entry_id)
            .one(db)
            .await?
            .ok_or(crate::errors::Error::NotFound {
                entity: "entry",
                id: item.entry_id,
            })?;

        self.item_dates.write().await.insert(item.id, entry.date);
        Ok(entry.date)
    }

    /// Drops the memoized date for an item.
    pub async fn clear_item_date(&self, item_id: i64) {
        self.item_dates.write().await.remove(&item_id);
    }

    /// Returns the set of entry ids that are not fully allocated for this
    /// user. Recomputed from the store only on a miss; afterwards it is kept
    /// in sync incrementally by the save hooks.
    pub async fn get_unbalanced_entries(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<HashSet<i64>> {
        if let Some(unbalanced) = self.unbalanced_entries.read().await.get(&user_id) {
            return Ok(unbalanced.clone());
        }

        let entries = Entry::find()
            .filter(entry::Column::UserId.eq(user_id))
            .all(db)
            .await?;
        let items = Item::find()
            .filter(item::Column::UserId.eq(user_id))
            .all(db)
            .await?;

        let mut allocated: HashMap<i64, Decimal> = HashMap::new();
        for item in &items {
            *allocated.entry(item.entry_id).or_insert(Decimal::ZERO) += item.amount;
        }

        let unbalanced: HashSet<i64> = entries
            .iter()
            .filter(|e| {
                e.amount - allocated.get(&e.id).copied().unwrap_or(Decimal::ZERO) != Decimal::ZERO
            })
            .map(|e| e.id)
            .collect();

        debug!(
            user_id,
            count = unbalanced.len(),
            "unbalanced entry set rebuilt on cache miss"
        );
        self.unbalanced_entries
            .write()
            .await
            .insert(user_id, unbalanced.clone());
        Ok(unbalanced)
    }

    /// Hook for entry saves: invalidates the account balance, updates the
    /// owner's unbalanced-set membership for this entry, and drops the
    /// memoized date of every item attached to it.
    pub async fn entry_saved(&self, db: &DatabaseConnection, entry: &EntryModel) -> Result<()> {
        self.clear_account_balance(entry.account_id).await;
        self.update_unbalanced_membership(db, entry).await?;

        let items = Item::find()
            .filter(item::Column::EntryId.eq(entry.id))
            .all(db)
            .await?;
        let mut dates = self.item_dates.write().await;
        for item in &items {
            dates.remove(&item.id);
        }
        Ok(())
    }

    /// Hook for item saves: invalidates the envelope balance and updates the
    /// owning entry's unbalanced-set membership.
    pub async fn item_saved(&self, db: &DatabaseConnection, item: &ItemModel) -> Result<()> {
        self.clear_envelope_balance(item.envelope_id).await;

        let entry = Entry::find_by_id(item.entry_id)
            .one(db)
            .await?
            .ok_or(crate::errors::Error::NotFound {
                entity: "entry",
                id: item.entry_id,
            })?;
        self.update_unbalanced_membership(db, &entry).await
    }

    /// Hook for item deletes: same invalidations as a save, plus dropping
    /// the memoized date. The owning entry is expected to still exist.
    pub async fn item_deleted(&self, db: &DatabaseConnection, item: &ItemModel) -> Result<()> {
        self.clear_item_date(item.id).await;
        self.item_saved(db, item).await
    }

    /// Hook for entry deletes: removes the entry from the owner's unbalanced
    /// set and invalidates the account balance. Item-level invalidation is
    /// handled per item by the cascade in `core::entry::delete_entry`.
    pub async fn entry_deleted(&self, entry: &EntryModel) {
        self.clear_account_balance(entry.account_id).await;
        if let Some(unbalanced) = self.unbalanced_entries.write().await.get_mut(&entry.user_id) {
            unbalanced.remove(&entry.id);
        }
    }

    async fn update_unbalanced_membership(
        &self,
        db: &DatabaseConnection,
        entry: &EntryModel,
    ) -> Result<()> {
        // Populate-on-miss first so the incremental update below always
        // starts from a set consistent with the store.
        let mut unbalanced = self.get_unbalanced_entries(db, entry.user_id).await?;

        let items = Item::find()
            .filter(item::Column::EntryId.eq(entry.id))
            .all(db)
            .await?;
        let balance = entry.amount - items.iter().map(|i| i.amount).sum::<Decimal>();

        if balance == Decimal::ZERO {
            unbalanced.remove(&entry.id);
        } else {
            unbalanced.insert(entry.id);
        }
        self.unbalanced_entries
            .write()
            .await
            .insert(entry.user_id, unbalanced);
        Ok(())
    }

    /// Marks an entry as skipped in the reconciliation queue.
    pub async fn add_skipped_entry(&self, user_id: i64, entry_id: i64) {
        self.skipped_entries
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(entry_id);
    }

    /// Returns the user's transient skipped-entry set.
    pub async fn get_skipped_entries(&self, user_id: i64) -> HashSet<i64> {
        self.skipped_entries
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Clears the user's skipped-entry set, as if nothing were skipped.
    pub async fn clear_skipped_entries(&self, user_id: i64) {
        self.skipped_entries.write().await.remove(&user_id);
    }
}
