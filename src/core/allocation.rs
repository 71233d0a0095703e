//! Allocation engine - replaces an entry's allocation set in one operation.
//!
//! A submission is the full desired set of allocations for one entry, not an
//! incremental patch: requests may reference existing items to keep or edit,
//! leave the envelope blank to delete, or leave the amount blank to take an
//! even share of whatever the explicit amounts do not cover. Pre-existing
//! items not referenced by any request are deleted. There is no separate
//! undo; re-submitting the full set is the correction mechanism.

use crate::{
    cache::BalanceCache,
    core::{envelope, item},
    entities::{Entry, EntryModel, item as item_entity},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{IntoActiveModel, Set, prelude::*};
use std::collections::HashSet;
use tracing::debug;

/// One row of an allocation submission.
#[derive(Clone, Debug, Default)]
pub struct AllocationRequest {
    /// Existing item to edit, or None to create one
    pub item_id: Option<i64>,
    /// Target envelope; None means "delete the referenced item"
    pub envelope_id: Option<i64>,
    /// Explicit amount, or None to auto-balance against the remainder
    pub amount: Option<Decimal>,
    /// Item description
    pub description: String,
}

/// Splits `total` into `count` near-equal shares, each rounded to cents, with
/// the last share absorbing the rounding remainder so the shares always sum
/// to exactly `total`.
pub(crate) fn even_shares(total: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }
    let share = (total / Decimal::from(count as u64)).round_dp(2);
    let mut shares = vec![share; count];
    if let Some(last) = shares.last_mut() {
        *last = total - share * Decimal::from(count as u64 - 1);
    }
    shares
}

/// Applies a full allocation submission against one entry.
///
/// After this returns, the entry's items are exactly those described by
/// `requests`: explicit amounts as given (sign-normalized), blank amounts
/// evenly splitting the unassigned remainder, and everything unreferenced
/// deleted. When the explicit amounts already overshoot the entry's amount,
/// auto-balanced items receive a negative share; that is allowed.
pub async fn apply_allocations(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    user_id: i64,
    entry: &EntryModel,
    requests: Vec<AllocationRequest>,
) -> Result<()> {
    let mut existing: HashSet<i64> = item::items_for_entry(db, entry.id)
        .await?
        .iter()
        .map(|i| i.id)
        .collect();

    let mut to_split_amount = entry.amount;
    let mut to_split_ids: Vec<i64> = Vec::new();

    for request in requests {
        if let Some(item_id) = request.item_id {
            existing.remove(&item_id);
        }

        let Some(envelope_id) = request.envelope_id else {
            // Blank envelope: the user removed this row
            if let Some(item_id) = request.item_id {
                let doomed = item::get_item(db, user_id, item_id).await?;
                item::delete_item(db, cache, doomed).await?;
            }
            continue;
        };

        let envelope = envelope::get_envelope(db, user_id, envelope_id).await?;

        let mut active = match request.item_id {
            Some(item_id) => item::get_item(db, user_id, item_id)
                .await?
                .into_active_model(),
            None => <item_entity::ActiveModel as std::default::Default>::default(),
        };
        active.description = Set(request.description);
        active.envelope_id = Set(envelope.id);
        active.entry_id = Set(entry.id);
        active.user_id = Set(user_id);

        match request.amount {
            Some(amount) => {
                active.amount = Set(amount);
                to_split_amount -= amount;
                item::save_item(db, cache, entry, active).await?;
            }
            None => {
                // Temporary non-zero amount so the row gets an id; the real
                // share is written below once the remainder is known
                active.amount = Set(Decimal::new(1, 2));
                let saved = item::save_item(db, cache, entry, active).await?;
                to_split_ids.push(saved.id);
            }
        }
    }

    // Anything the submission did not reference was deleted by the user
    for item_id in existing {
        let leftover = item::get_item(db, user_id, item_id).await?;
        item::delete_item(db, cache, leftover).await?;
    }

    if !to_split_ids.is_empty() {
        debug!(
            entry_id = entry.id,
            remainder = %to_split_amount,
            n = to_split_ids.len(),
            "auto-balancing remainder"
        );
        let shares = even_shares(to_split_amount, to_split_ids.len());
        for (item_id, share) in to_split_ids.into_iter().zip(shares) {
            // Written directly, skipping sign normalization: an overshot
            // remainder legitimately carries the opposite sign
            let mut active = item::get_item(db, user_id, item_id)
                .await?
                .into_active_model();
            active.amount = Set(share);
            let updated = active.update(db).await?;
            cache.item_saved(db, &updated).await?;
        }
    }

    // Re-read the entry and run its save hook so every derived value
    // recomputes from the final allocation set
    let entry = Entry::find_by_id(entry.id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "entry",
            id: entry.id,
        })?;
    cache.entry_saved(db, &entry).await?;
    Ok(())
}
