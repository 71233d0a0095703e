//! Reconciliation queue - surfaces the next entry needing allocation work.
//!
//! The queue is the user's unbalanced-entry set ordered by date, with
//! transient skip/defer semantics: skipped entries are passed over until
//! every queued entry has been skipped, at which point the skip set resets
//! and the earliest entry comes around again. Skips live only in the cache
//! and do not survive a restart.

use crate::{
    cache::BalanceCache,
    entities::{Entry, EntryModel, entry},
    errors::Result,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Returns the next unbalanced entry to work on, or `None` when the user has
/// nothing left to reconcile.
pub async fn next_to_process(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    user_id: i64,
) -> Result<Option<EntryModel>> {
    let unbalanced = cache.get_unbalanced_entries(db, user_id).await?;
    if unbalanced.is_empty() {
        return Ok(None);
    }

    let mut queue = Entry::find()
        .filter(entry::Column::UserId.eq(user_id))
        .filter(entry::Column::Id.is_in(unbalanced))
        .all(db)
        .await?;
    // Date ascending, id as a stable tiebreak
    queue.sort_by_key(|e| (e.date, e.id));

    let skipped = cache.get_skipped_entries(user_id).await;
    if let Some(next) = queue.iter().find(|e| !skipped.contains(&e.id)) {
        return Ok(Some(next.clone()));
    }

    // Everything was skipped: act like nothing is skipped
    cache.clear_skipped_entries(user_id).await;
    Ok(queue.into_iter().next())
}

/// Defers an entry: it will be passed over until the queue resets.
pub async fn skip_entry(cache: &BalanceCache, user_id: i64, entry_id: i64) {
    cache.add_skipped_entry(user_id, entry_id).await;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::allocation;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_empty_queue_returns_none() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = BalanceCache::new();
        assert!(next_to_process(&db, &cache, TEST_USER).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_queue_is_ordered_by_date() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = BalanceCache::new();
        let account = create_test_account(&db, "Checking").await?;

        create_test_entry(&db, &cache, &account, dec!(20.00), "2021-02-01", "LATER").await?;
        let earliest =
            create_test_entry(&db, &cache, &account, dec!(10.00), "2021-01-01", "FIRST").await?;

        let next = next_to_process(&db, &cache, TEST_USER).await?.unwrap();
        assert_eq!(next.id, earliest.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_skipped_entries_are_passed_over() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = BalanceCache::new();
        let account = create_test_account(&db, "Checking").await?;

        let first =
            create_test_entry(&db, &cache, &account, dec!(10.00), "2021-01-01", "FIRST").await?;
        let second =
            create_test_entry(&db, &cache, &account, dec!(20.00), "2021-02-01", "SECOND").await?;

        skip_entry(&cache, TEST_USER, first.id).await;
        let next = next_to_process(&db, &cache, TEST_USER).await?.unwrap();
        assert_eq!(next.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_all_skipped_resets_and_returns_earliest() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = BalanceCache::new();
        let account = create_test_account(&db, "Checking").await?;

        let first =
            create_test_entry(&db, &cache, &account, dec!(10.00), "2021-01-01", "FIRST").await?;
        let second =
            create_test_entry(&db, &cache, &account, dec!(20.00), "2021-02-01", "SECOND").await?;

        skip_entry(&cache, TEST_USER, first.id).await;
        skip_entry(&cache, TEST_USER, second.id).await;

        let next = next_to_process(&db, &cache, TEST_USER).await?.unwrap();
        assert_eq!(next.id, first.id);
        // The reset cleared the skip set entirely
        assert!(cache.get_skipped_entries(TEST_USER).await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_balanced_entries_leave_the_queue() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = BalanceCache::new();
        let account = create_test_account(&db, "Checking").await?;
        let envelope = create_test_envelope(&db, "Misc").await?;

        let only =
            create_test_entry(&db, &cache, &account, dec!(10.00), "2021-01-01", "ONLY").await?;
        allocation::apply_allocations(
            &db,
            &cache,
            TEST_USER,
            &only,
            vec![allocation::AllocationRequest {
                item_id: None,
                envelope_id: Some(envelope.id),
                amount: None,
                description: String::new(),
            }],
        )
        .await?;

        assert!(next_to_process(&db, &cache, TEST_USER).await?.is_none());
        Ok(())
    }
}
