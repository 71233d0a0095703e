//! Import entity - Represents one completed statement upload.
//!
//! Records which parser succeeded, the raw statement text, and when the
//! upload happened. Deleting an import cascades to the entries it produced
//! (and through them, their items) via `core::import::delete_import`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Import database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "imports")]
pub struct Model {
    /// Unique identifier for the import
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the statement parser that accepted the text
    pub parser: String,
    /// Raw statement text as uploaded
    pub text: String,
    /// When the upload happened
    pub timestamp: DateTimeUtc,
    /// Id of the owning user
    pub user_id: i64,
}

/// Defines relationships between Import and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One import produces many entries
    #[sea_orm(has_many = "super::entry::Entity")]
    Entries,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
