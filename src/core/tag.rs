//! Tag business logic - user-scoped labels on allocation items.

use crate::{
    entities::{ItemModel, Tag, TagModel, item_tag, tag},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Returns the user's tag with this name, creating it if necessary.
pub async fn get_or_create_tag(
    db: &DatabaseConnection,
    user_id: i64,
    name: &str,
) -> Result<TagModel> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "tag name cannot be empty".to_string(),
        });
    }

    if let Some(existing) = Tag::find()
        .filter(tag::Column::UserId.eq(user_id))
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    tag::ActiveModel {
        name: Set(name.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Attaches a tag to an item; attaching one that is already present is a
/// no-op.
pub async fn tag_item(db: &DatabaseConnection, item: &ItemModel, tag: &TagModel) -> Result<()> {
    let already = item_tag::Entity::find_by_id((item.id, tag.id)).one(db).await?;
    if already.is_some() {
        return Ok(());
    }

    item_tag::ActiveModel {
        item_id: Set(item.id),
        tag_id: Set(tag.id),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Detaches a tag from an item if it was attached.
pub async fn untag_item(db: &DatabaseConnection, item: &ItemModel, tag: &TagModel) -> Result<()> {
    item_tag::Entity::delete_many()
        .filter(item_tag::Column::ItemId.eq(item.id))
        .filter(item_tag::Column::TagId.eq(tag.id))
        .exec(db)
        .await?;
    Ok(())
}

/// Returns the set of tags attached to an item.
pub async fn tags_for_item(db: &DatabaseConnection, item: &ItemModel) -> Result<Vec<TagModel>> {
    item.find_related(Tag).all(db).await.map_err(Into::into)
}
