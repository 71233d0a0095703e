//! Account business logic - CRUD and the running-balance walk used by the
//! account detail view.

use crate::{
    cache::BalanceCache,
    core::entry as entry_core,
    entities::{Account, AccountModel, EntryModel, account},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new account, validating that the name is not empty.
pub async fn create_account(
    db: &DatabaseConnection,
    user_id: i64,
    name: String,
    start_date: NaiveDate,
) -> Result<AccountModel> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "account name cannot be empty".to_string(),
        });
    }

    let account = account::ActiveModel {
        name: Set(name.trim().to_string()),
        start_date: Set(start_date),
        user_id: Set(user_id),
        ..Default::default()
    };
    account.insert(db).await.map_err(Into::into)
}

/// Finds an account by id, scoped to the owning user.
pub async fn get_account(
    db: &DatabaseConnection,
    user_id: i64,
    account_id: i64,
) -> Result<AccountModel> {
    Account::find_by_id(account_id)
        .filter(account::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "account",
            id: account_id,
        })
}

/// Returns all of a user's accounts, ordered alphabetically by name.
pub async fn list_accounts(db: &DatabaseConnection, user_id: i64) -> Result<Vec<AccountModel>> {
    Account::find()
        .filter(account::Column::UserId.eq(user_id))
        .order_by_asc(account::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Pairs each of the account's entries (display order: newest first) with
/// the account balance as of just after that entry, walking backwards from
/// the current cached balance.
pub async fn entries_with_running_balance(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    account: &AccountModel,
) -> Result<Vec<(EntryModel, Decimal)>> {
    let mut ongoing = cache.get_account_balance(db, account.id).await?;
    let mut rows = Vec::new();
    for entry in entry_core::entries_for_account(db, account.id).await? {
        let amount = entry.amount;
        rows.push((entry, ongoing));
        // Entries report money leaving the account, so stepping back past
        // one adds its amount back
        ongoing += amount;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_running_balance_walk() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = BalanceCache::new();
        let account = create_test_account(&db, "Checking").await?;

        create_test_entry(&db, &cache, &account, dec!(-100.00), "2021-01-01", "PAY").await?;
        create_test_entry(&db, &cache, &account, dec!(30.00), "2021-01-02", "SHOP").await?;
        create_test_entry(&db, &cache, &account, dec!(20.00), "2021-01-03", "FOOD").await?;

        // Balance is 100 - 30 - 20 = 50
        let rows = entries_with_running_balance(&db, &cache, &account).await?;
        assert_eq!(rows.len(), 3);
        // Newest first: after FOOD the balance is 50, after SHOP 70, after
        // PAY 100
        assert_eq!(rows[0].1, dec!(50.00));
        assert_eq!(rows[1].1, dec!(70.00));
        assert_eq!(rows[2].1, dec!(100.00));
        Ok(())
    }

    #[tokio::test]
    async fn test_accounts_are_user_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_account(&db, "Checking").await?;

        assert!(get_account(&db, TEST_USER, account.id).await.is_ok());
        assert!(matches!(
            get_account(&db, TEST_USER + 1, account.id).await.unwrap_err(),
            Error::NotFound { entity: "account", .. }
        ));
        Ok(())
    }
}
