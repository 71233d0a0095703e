//! Envelope entity - Represents a budget category.
//!
//! An envelope accumulates allocation items; its balance is the negative sum
//! of the item amounts allocated to it, served through the balance cache.
//! Pinned envelopes are surfaced first on summary views.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Envelope database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "envelopes")]
pub struct Model {
    /// Unique identifier for the envelope
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the envelope (e.g., "Groceries", "Rent")
    pub name: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Whether this envelope is surfaced on summary views
    pub pinned: bool,
    /// Id of the owning user
    pub user_id: i64,
}

/// Defines relationships between Envelope and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One envelope has many allocation items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
