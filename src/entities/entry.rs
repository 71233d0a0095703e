//! Entry entity - Represents one ledger transaction.
//!
//! Entries are created by the import engine from parsed statement rows, or
//! directly by the user as "expected" placeholders awaiting a real
//! transaction. A positive amount represents money leaving the account. An
//! entry is balanced when its item amounts sum exactly to `amount`; the
//! balance itself is derived, never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Signed transaction amount; positive means money leaving the account
    #[sea_orm(column_type = "Decimal(Some((9, 2)))")]
    pub amount: Decimal,
    /// Transaction date
    pub date: Date,
    /// Statement description of the transaction
    pub description: String,
    /// Id of the account this entry belongs to
    pub account_id: i64,
    /// Id of the import that produced this entry, None for manual entries
    pub import_id: Option<i64>,
    /// Placeholder awaiting a real transaction; resolved by amount on import
    pub expected: bool,
    /// Id of the owning user
    pub user_id: i64,
}

/// Defines relationships between Entry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
    /// Each entry optionally belongs to one import
    #[sea_orm(
        belongs_to = "super::import::Entity",
        from = "Column::ImportId",
        to = "super::import::Column::Id"
    )]
    Import,
    /// One entry has many allocation items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::import::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Import.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
