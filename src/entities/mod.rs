//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod entry;
pub mod envelope;
pub mod import;
pub mod item;
pub mod item_tag;
pub mod note;
pub mod tag;
pub mod user_settings;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel};
pub use entry::{Column as EntryColumn, Entity as Entry, Model as EntryModel};
pub use envelope::{Column as EnvelopeColumn, Entity as Envelope, Model as EnvelopeModel};
pub use import::{Column as ImportColumn, Entity as Import, Model as ImportModel};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use item_tag::{Column as ItemTagColumn, Entity as ItemTag, Model as ItemTagModel};
pub use note::{Column as NoteColumn, Entity as Note, Model as NoteModel};
pub use tag::{Column as TagColumn, Entity as Tag, Model as TagModel};
pub use user_settings::{
    Column as UserSettingsColumn, Entity as UserSettings, Model as UserSettingsModel,
};
