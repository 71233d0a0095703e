//! Envelope business logic - CRUD, summary queries, and income transfer.
//!
//! The income transfer moves historical income allocations (negative-amount
//! items) from one envelope to another, most recent first, splitting the item
//! at the boundary when the requested amount does not line up with existing
//! allocations. The multi-item reassignment runs inside one database
//! transaction; a partial transfer would change per-entry allocation totals.

use crate::{
    cache::BalanceCache,
    entities::{Envelope, EnvelopeModel, entry, envelope, item},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Creates a new envelope, validating that the name is not empty.
pub async fn create_envelope(
    db: &DatabaseConnection,
    user_id: i64,
    name: String,
    description: String,
    pinned: bool,
) -> Result<EnvelopeModel> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "envelope name cannot be empty".to_string(),
        });
    }

    let envelope = envelope::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        pinned: Set(pinned),
        user_id: Set(user_id),
        ..Default::default()
    };
    envelope.insert(db).await.map_err(Into::into)
}

/// Finds an envelope by id, scoped to the owning user.
pub async fn get_envelope(
    db: &DatabaseConnection,
    user_id: i64,
    envelope_id: i64,
) -> Result<EnvelopeModel> {
    Envelope::find_by_id(envelope_id)
        .filter(envelope::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "envelope",
            id: envelope_id,
        })
}

/// Returns all of a user's envelopes, ordered alphabetically by name.
pub async fn list_envelopes(db: &DatabaseConnection, user_id: i64) -> Result<Vec<EnvelopeModel>> {
    Envelope::find()
        .filter(envelope::Column::UserId.eq(user_id))
        .order_by_asc(envelope::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the envelopes pinned to the summary view.
pub async fn pinned_envelopes(db: &DatabaseConnection, user_id: i64) -> Result<Vec<EnvelopeModel>> {
    Envelope::find()
        .filter(envelope::Column::UserId.eq(user_id))
        .filter(envelope::Column::Pinned.eq(true))
        .order_by_asc(envelope::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the envelopes whose balance has gone negative, paired with that
/// balance, for the summary view's overdrawn list.
pub async fn negative_envelopes(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    user_id: i64,
) -> Result<Vec<(EnvelopeModel, Decimal)>> {
    let mut negative = Vec::new();
    for env in list_envelopes(db, user_id).await? {
        let balance = cache.get_envelope_balance(db, env.id).await?;
        if balance < Decimal::ZERO {
            negative.push((env, balance));
        }
    }
    Ok(negative)
}

/// Moves `amount` worth of income allocations from `from` to `to`, most
/// recent first.
///
/// Whole items are reassigned while they fit; the item that only partially
/// fits is shrunk and a new item for the remainder is created on the
/// destination envelope against the same entry, so per-entry allocation
/// totals never change. Fails with [`Error::InsufficientFunds`] and touches
/// nothing when the source envelope holds less income than requested.
pub async fn transfer_income(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    from: &EnvelopeModel,
    to: &EnvelopeModel,
    amount: Decimal,
) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Config {
            message: format!("transfer amount must be positive, got {amount}"),
        });
    }
    if from.user_id != to.user_id {
        return Err(Error::NotFound {
            entity: "envelope",
            id: to.id,
        });
    }

    // Income allocations, most recent entry first
    let income = item::Entity::find()
        .find_also_related(entry::Entity)
        .filter(item::Column::EnvelopeId.eq(from.id))
        .filter(item::Column::Amount.lt(Decimal::ZERO))
        .order_by_desc(entry::Column::Date)
        .all(db)
        .await?;

    let available: Decimal = income.iter().map(|(i, _)| -i.amount).sum();
    if available < amount {
        return Err(Error::InsufficientFunds {
            available,
            requested: amount,
        });
    }

    let txn = db.begin().await?;
    let mut remaining = amount;
    for (income_item, _) in income {
        if remaining == Decimal::ZERO {
            break;
        }

        let magnitude = -income_item.amount;
        if magnitude <= remaining {
            // Fits wholesale: reassign the item to the destination
            remaining -= magnitude;
            let mut active = income_item.into_active_model();
            active.envelope_id = Set(to.id);
            active.update(&txn).await?;
        } else {
            // Boundary item: shrink it and put the rest on the destination,
            // leaving the entry's total allocation unchanged
            let entry_id = income_item.entry_id;
            let user_id = income_item.user_id;
            let mut active = income_item.into_active_model();
            active.amount = Set(-(magnitude - remaining));
            active.update(&txn).await?;

            item::ActiveModel {
                amount: Set(-remaining),
                description: Set(String::new()),
                envelope_id: Set(to.id),
                entry_id: Set(entry_id),
                user_id: Set(user_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            remaining = Decimal::ZERO;
        }
    }
    txn.commit().await?;

    cache.clear_envelope_balance(from.id).await;
    cache.clear_envelope_balance(to.id).await;
    info!(
        from = from.id,
        to = to.id,
        %amount,
        "income transferred between envelopes"
    );
    Ok(())
}
