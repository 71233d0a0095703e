//! Database configuration module for the ledger engine.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements
//! from the entity models, ensuring that the database schema matches the Rust struct
//! definitions without requiring manual SQL.

use crate::entities::{Account, Entry, Envelope, Import, Item, ItemTag, Note, Tag, UserSettings};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/budgetbook.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from
/// entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper
/// SQL statements for table creation, ensuring the database schema matches the Rust
/// struct definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let account_table = schema.create_table_from_entity(Account);
    let entry_table = schema.create_table_from_entity(Entry);
    let envelope_table = schema.create_table_from_entity(Envelope);
    let import_table = schema.create_table_from_entity(Import);
    let item_table = schema.create_table_from_entity(Item);
    let item_tag_table = schema.create_table_from_entity(ItemTag);
    let note_table = schema.create_table_from_entity(Note);
    let tag_table = schema.create_table_from_entity(Tag);
    let settings_table = schema.create_table_from_entity(UserSettings);

    db.execute(builder.build(&account_table)).await?;
    db.execute(builder.build(&envelope_table)).await?;
    db.execute(builder.build(&import_table)).await?;
    db.execute(builder.build(&entry_table)).await?;
    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&tag_table)).await?;
    db.execute(builder.build(&item_tag_table)).await?;
    db.execute(builder.build(&note_table)).await?;
    db.execute(builder.build(&settings_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AccountModel, EntryModel, EnvelopeModel, ImportModel, ItemModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection_in_memory() -> Result<()> {
        // Use in-memory database for testing to avoid touching any local file
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<AccountModel> = Account::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<AccountModel> = Account::find().limit(1).all(&db).await?;
        let _: Vec<EntryModel> = Entry::find().limit(1).all(&db).await?;
        let _: Vec<EnvelopeModel> = Envelope::find().limit(1).all(&db).await?;
        let _: Vec<ImportModel> = Import::find().limit(1).all(&db).await?;
        let _: Vec<ItemModel> = Item::find().limit(1).all(&db).await?;

        Ok(())
    }
}
