//! Account entity - Represents a money source or destination.
//!
//! Each account has a name, a start date, and an owning user. Statement rows
//! dated before `start_date` are dropped on import. An account's balance is a
//! derived value (the negative sum of its non-expected entry amounts) served
//! through the balance cache rather than stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the account (e.g., "Checking", "Credit Card")
    pub name: String,
    /// Imported statement rows dated before this are silently discarded
    pub start_date: Date,
    /// Id of the owning user; all queries are scoped by this
    pub user_id: i64,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One account has many entries
    #[sea_orm(has_many = "super::entry::Entity")]
    Entries,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
