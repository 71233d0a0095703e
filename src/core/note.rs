//! Note business logic - free-form scratch notes kept alongside the ledger.

use crate::{
    entities::{Note, NoteModel, note},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Records a note for the user, stamped with the current time.
pub async fn add_note(db: &DatabaseConnection, user_id: i64, text: String) -> Result<NoteModel> {
    note::ActiveModel {
        text: Set(text),
        timestamp: Set(Utc::now()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Returns the user's notes, newest first.
pub async fn list_notes(db: &DatabaseConnection, user_id: i64) -> Result<Vec<NoteModel>> {
    Note::find()
        .filter(note::Column::UserId.eq(user_id))
        .order_by_desc(note::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_notes_are_user_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        add_note(&db, TEST_USER, "remember the rent".to_string()).await?;
        add_note(&db, TEST_USER + 1, "someone else's note".to_string()).await?;

        let notes = list_notes(&db, TEST_USER).await?;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "remember the rent");
        Ok(())
    }
}
