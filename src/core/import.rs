//! Import engine - turns a raw statement upload into persisted entries.
//!
//! The engine is parser-agnostic: it walks the registered statement parsers
//! in priority order and uses the first that accepts the text, failing with
//! [`Error::NoParserMatched`] (nothing persisted) when all reject it. Each
//! accepted charge is then filtered against the account's start date, matched
//! against expected entries by amount, checked for duplicates, and finally
//! persisted; tiny expenses are auto-allocated to the user's small-change
//! envelope when one is configured.

use crate::{
    cache::BalanceCache,
    core::{entry as entry_core, item as item_core, settings},
    entities::{AccountModel, Entry, EntryModel, ImportModel, entry, import, item},
    errors::{Error, Result},
    parsers,
};
use chrono::Utc;
use sea_orm::{IntoActiveModel, Set, prelude::*};
use tracing::{debug, info, trace};

/// Imports a statement against an account.
///
/// Returns the persisted import record and the entries that were newly
/// created; charges that resolved an expected entry or were recognized as
/// duplicates are not part of the returned list.
pub async fn import_statement(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    account: &AccountModel,
    data: &[u8],
) -> Result<(ImportModel, Vec<EntryModel>)> {
    let text = String::from_utf8_lossy(data).into_owned();

    let mut parsed = None;
    for parser in parsers::registry() {
        match parser.parse(&text) {
            Ok(charges) => {
                debug!(parser = parser.name(), charges = charges.len(), "parser accepted statement");
                parsed = Some((parser.name(), charges));
                break;
            }
            Err(err) => trace!(parser = parser.name(), %err, "parser rejected statement"),
        }
    }
    let Some((parser_name, charges)) = parsed else {
        return Err(Error::NoParserMatched);
    };

    let import = import::ActiveModel {
        parser: Set(parser_name.to_string()),
        text: Set(text),
        timestamp: Set(Utc::now()),
        user_id: Set(account.user_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let user_settings = settings::for_user(db, Some(account.user_id)).await?;

    let mut new_entries = Vec::new();
    for charge in charges {
        if charge.date < account.start_date {
            trace!(%charge.date, "charge predates account start, dropped");
            continue;
        }

        // An expected entry with the same amount resolves in place instead
        // of creating a duplicate row
        if let Some(expected) = Entry::find()
            .filter(entry::Column::AccountId.eq(account.id))
            .filter(entry::Column::Expected.eq(true))
            .filter(entry::Column::Amount.eq(charge.amount))
            .one(db)
            .await?
        {
            debug!(entry_id = expected.id, "charge resolved an expected entry");
            let mut active = expected.into_active_model();
            active.date = Set(charge.date);
            active.description = Set(charge.description);
            active.expected = Set(false);
            active.import_id = Set(Some(import.id));
            let resolved = active.update(db).await?;
            cache.entry_saved(db, &resolved).await?;
            continue;
        }

        // Same date, description, and amount: presumed already imported
        let duplicate = Entry::find()
            .filter(entry::Column::AccountId.eq(account.id))
            .filter(entry::Column::Date.eq(charge.date))
            .filter(entry::Column::Description.eq(charge.description.clone()))
            .filter(entry::Column::Amount.eq(charge.amount))
            .one(db)
            .await?;
        if duplicate.is_some() {
            trace!(%charge.date, "duplicate charge dropped");
            continue;
        }

        let new_entry = entry_core::save_entry(
            db,
            cache,
            entry::ActiveModel {
                amount: Set(charge.amount),
                date: Set(charge.date),
                description: Set(charge.description),
                account_id: Set(account.id),
                import_id: Set(Some(import.id)),
                expected: Set(false),
                user_id: Set(account.user_id),
                ..Default::default()
            },
        )
        .await?;

        // Tiny expenses short-circuit manual reconciliation. Signed
        // comparison, no absolute value: only negative amounts below a
        // positive threshold trigger this, matching the original engine.
        if let Some(envelope_id) = user_settings.small_change_envelope_id {
            if new_entry.amount < user_settings.small_change_threshold {
                item_core::save_item(
                    db,
                    cache,
                    &new_entry,
                    item::ActiveModel {
                        amount: Set(new_entry.amount),
                        description: Set(String::new()),
                        envelope_id: Set(envelope_id),
                        entry_id: Set(new_entry.id),
                        user_id: Set(account.user_id),
                        ..Default::default()
                    },
                )
                .await?;
            }
        }

        new_entries.push(new_entry);
    }

    info!(
        import_id = import.id,
        parser = %import.parser,
        new_entries = new_entries.len(),
        "statement imported"
    );
    Ok((import, new_entries))
}

/// The upload surface: imports a statement and drops the import record again
/// when it produced nothing new, so empty imports are never retained.
/// Returns `None` in that case.
pub async fn upload(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    account: &AccountModel,
    data: &[u8],
) -> Result<Option<(ImportModel, Vec<EntryModel>)>> {
    let (import, new_entries) = import_statement(db, cache, account, data).await?;
    if new_entries.is_empty() {
        delete_import(db, cache, import).await?;
        return Ok(None);
    }
    Ok(Some((import, new_entries)))
}

/// Deletes an import and cascades to exactly the entries it produced (and
/// through them, their items), fixing up every affected cached balance.
pub async fn delete_import(
    db: &DatabaseConnection,
    cache: &BalanceCache,
    import: ImportModel,
) -> Result<()> {
    let produced = Entry::find()
        .filter(entry::Column::ImportId.eq(import.id))
        .all(db)
        .await?;
    for produced_entry in produced {
        entry_core::delete_entry(db, cache, produced_entry).await?;
    }
    import.delete(db).await?;
    Ok(())
}
