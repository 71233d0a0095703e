//! User settings business logic - lazy get-or-insert per-user configuration.
//!
//! Settings rows are created on first access with defaults, as an explicit
//! upsert at the storage boundary. An anonymous caller (no user id) always
//! fails the lookup; settings never exist for unauthenticated identities.

use crate::{
    entities::{UserSettings, UserSettingsModel, user_settings},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{IntoActiveModel, Set, prelude::*};

/// Fetches the settings row for a user, creating it with defaults on first
/// access. `None` (an anonymous caller) fails with [`Error::AnonymousUser`].
pub async fn for_user(db: &DatabaseConnection, user: Option<i64>) -> Result<UserSettingsModel> {
    let Some(user_id) = user else {
        return Err(Error::AnonymousUser);
    };

    if let Some(settings) = UserSettings::find_by_id(user_id).one(db).await? {
        return Ok(settings);
    }

    user_settings::ActiveModel {
        user_id: Set(user_id),
        dark_mode: Set(true),
        small_change_envelope_id: Set(None),
        small_change_threshold: Set(Decimal::ONE),
        transfer_envelope_id: Set(None),
        // Unix epoch: "the beginning of time"
        beginning_of_time: Set(NaiveDate::default()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Flips the display theme flag and returns the updated settings.
pub async fn toggle_dark_mode(
    db: &DatabaseConnection,
    user: Option<i64>,
) -> Result<UserSettingsModel> {
    let settings = for_user(db, user).await?;
    let dark_mode = !settings.dark_mode;
    let mut active = settings.into_active_model();
    active.dark_mode = Set(dark_mode);
    active.update(db).await.map_err(Into::into)
}

/// Configures (or disables, with `envelope_id: None`) small-change
/// auto-allocation for the user.
pub async fn set_small_change(
    db: &DatabaseConnection,
    user: Option<i64>,
    envelope_id: Option<i64>,
    threshold: Decimal,
) -> Result<UserSettingsModel> {
    let settings = for_user(db, user).await?;
    let mut active = settings.into_active_model();
    active.small_change_envelope_id = Set(envelope_id);
    active.small_change_threshold = Set(threshold);
    active.update(db).await.map_err(Into::into)
}

/// Designates the envelope income is reclassified through.
pub async fn set_transfer_envelope(
    db: &DatabaseConnection,
    user: Option<i64>,
    envelope_id: Option<i64>,
) -> Result<UserSettingsModel> {
    let settings = for_user(db, user).await?;
    let mut active = settings.into_active_model();
    active.transfer_envelope_id = Set(envelope_id);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_settings_created_lazily_with_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(UserSettings::find().all(&db).await?.is_empty());

        let settings = for_user(&db, Some(TEST_USER)).await?;
        assert!(settings.dark_mode);
        assert_eq!(settings.small_change_threshold, dec!(1.00));
        assert!(settings.small_change_envelope_id.is_none());
        assert_eq!(settings.beginning_of_time, date("1970-01-01"));

        // Second access reuses the same row
        for_user(&db, Some(TEST_USER)).await?;
        assert_eq!(UserSettings::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_gets_no_settings() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            for_user(&db, None).await.unwrap_err(),
            Error::AnonymousUser
        ));
        assert!(UserSettings::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_dark_mode() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = toggle_dark_mode(&db, Some(TEST_USER)).await?;
        assert!(!settings.dark_mode);
        let settings = toggle_dark_mode(&db, Some(TEST_USER)).await?;
        assert!(settings.dark_mode);
        Ok(())
    }
}
