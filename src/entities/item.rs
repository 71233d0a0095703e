//! Item entity - Represents one allocation of (part of) an entry's amount to
//! an envelope.
//!
//! Item amount signs always match their entry's sign; `core::item::save_item`
//! normalizes a mismatched sign by negating the item amount. Items may carry a
//! set of tags through the `item_tags` junction table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Allocated amount; sign always matches the owning entry's amount
    #[sea_orm(column_type = "Decimal(Some((9, 2)))")]
    pub amount: Decimal,
    /// Free-form description, may be empty
    pub description: String,
    /// Id of the envelope this allocation is charged against
    pub envelope_id: i64,
    /// Id of the entry this allocation belongs to
    pub entry_id: i64,
    /// Id of the owning user
    pub user_id: i64,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one envelope
    #[sea_orm(
        belongs_to = "super::envelope::Entity",
        from = "Column::EnvelopeId",
        to = "super::envelope::Column::Id"
    )]
    Envelope,
    /// Each item belongs to one entry
    #[sea_orm(
        belongs_to = "super::entry::Entity",
        from = "Column::EntryId",
        to = "super::entry::Column::Id"
    )]
    Entry,
    /// Junction rows linking this item to its tags
    #[sea_orm(has_many = "super::item_tag::Entity")]
    ItemTags,
}

impl Related<super::envelope::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Envelope.def()
    }
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_tag::Relation::Item.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
