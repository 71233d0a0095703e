//! UserSettings entity - One row per user, created lazily on first access.
//!
//! Holds the display theme flag, the small-change auto-allocation
//! configuration, the designated income-transfer envelope, and the
//! "beginning of time" date bounding historical views. Rows are never created
//! for anonymous callers; see `core::settings::for_user`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-user settings model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_settings")]
pub struct Model {
    /// Id of the owning user; doubles as the primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    /// Whether the dark display theme is active
    pub dark_mode: bool,
    /// Envelope tiny expenses are auto-allocated to, None to disable
    pub small_change_envelope_id: Option<i64>,
    /// Entries with `amount < threshold` trigger the auto-allocation
    #[sea_orm(column_type = "Decimal(Some((9, 2)))")]
    pub small_change_threshold: Decimal,
    /// Envelope designated for income reclassification, None if unset
    pub transfer_envelope_id: Option<i64>,
    /// Lower bound for historical views
    pub beginning_of_time: Date,
}

/// Settings rows reference envelopes only through nullable id columns
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
