//! ItemTag entity - Junction table linking items to their tags.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item/tag junction model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_tags")]
pub struct Model {
    /// Id of the tagged item
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i64,
    /// Id of the tag
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i64,
}

/// Defines relationships between ItemTag and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each junction row belongs to one item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
    /// Each junction row belongs to one tag
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id"
    )]
    Tag,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
