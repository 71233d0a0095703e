//! Item business logic - the save/delete wrappers every other engine goes
//! through.
//!
//! `save_item` enforces the sign invariant (an item's amount sign always
//! matches its entry's) and notifies the balance cache; `delete_item` keeps
//! the cache and the tag junction table consistent. Bypassing these wrappers
//! leaves stale cached balances behind, so only the allocation engine's
//! remainder pass writes items directly.

use crate::{
    cache::BalanceCache,
    entities::{EntryModel, Item, ItemModel, ItemTag, item, item_tag},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryOrder, Set, TryIntoModel, prelude::*};

/// Flips `item_amount` when its sign disagrees with the owning entry's.
///
/// The only two valid states are both-positive or both-negative; a zero on
/// either side is left untouched.
#[must_use]
pub fn normalized_amount(entry_amount: Decimal, item_amount: Decimal) -> Decimal {
    if (entry_amount > Decimal::ZERO && item_amount < Decimal::ZERO)
        || (entry_amount < Decimal::ZERO && item_amount > Decimal::ZERO)
    {
        -item_amount
    } else {
        item_amount
    }
}

/// Persists an item (insert or update), normalizing its amount sign against
/// the owning entry and updating the balance cache.
pub async fn save_item(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    entry: &EntryModel,
    mut item: item::ActiveModel,
) -> Result<ItemModel> {
    match item.amount {
        ActiveValue::Set(amount) | ActiveValue::Unchanged(amount) => {
            item.amount = Set(normalized_amount(entry.amount, amount));
        }
        ActiveValue::NotSet => {}
    }

    let saved = item.save(db).await?.try_into_model()?;
    cache.item_saved(db, &saved).await?;
    Ok(saved)
}

/// Finds an item by id, scoped to the owning user.
pub async fn get_item(db: &DatabaseConnection, user_id: i64, item_id: i64) -> Result<ItemModel> {
    Item::find_by_id(item_id)
        .filter(item::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "item",
            id: item_id,
        })
}

/// Returns all allocation items for an entry, oldest row first.
pub async fn items_for_entry(db: &DatabaseConnection, entry_id: i64) -> Result<Vec<ItemModel>> {
    Item::find()
        .filter(item::Column::EntryId.eq(entry_id))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an item along with its tag links, then fixes up the cache: the
/// envelope balance is invalidated and the owning entry's unbalanced-set
/// membership is recomputed.
pub async fn delete_item(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    item: ItemModel,
) -> Result<()> {
    ItemTag::delete_many()
        .filter(item_tag::Column::ItemId.eq(item.id))
        .exec(db)
        .await?;

    let snapshot = item.clone();
    item.delete(db).await?;
    cache.item_deleted(db, &snapshot).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalized_amount_matches_entry_sign() {
        // Positive entry flips negative items
        assert_eq!(normalized_amount(dec!(100), dec!(-40)), dec!(40));
        // Negative entry flips positive items
        assert_eq!(normalized_amount(dec!(-100), dec!(40)), dec!(-40));
        // Concordant signs pass through
        assert_eq!(normalized_amount(dec!(100), dec!(40)), dec!(40));
        assert_eq!(normalized_amount(dec!(-100), dec!(-40)), dec!(-40));
    }

    #[tokio::test]
    async fn test_save_item_normalizes_for_both_entry_signs() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = crate::cache::BalanceCache::new();
        let account = create_test_account(&db, "Checking").await?;
        let envelope = create_test_envelope(&db, "Misc").await?;

        let expense =
            create_test_entry(&db, &cache, &account, dec!(50.00), "2021-01-01", "SHOP").await?;
        let saved = save_item(
            &db,
            &cache,
            &expense,
            item::ActiveModel {
                amount: Set(dec!(-20.00)),
                description: Set(String::new()),
                envelope_id: Set(envelope.id),
                entry_id: Set(expense.id),
                user_id: Set(TEST_USER),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(saved.amount, dec!(20.00));

        let income =
            create_test_entry(&db, &cache, &account, dec!(-50.00), "2021-01-02", "PAY").await?;
        let saved = save_item(
            &db,
            &cache,
            &income,
            item::ActiveModel {
                amount: Set(dec!(20.00)),
                description: Set(String::new()),
                envelope_id: Set(envelope.id),
                entry_id: Set(income.id),
                user_id: Set(TEST_USER),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(saved.amount, dec!(-20.00));
        Ok(())
    }
}
