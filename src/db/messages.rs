use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::auth::User;
use crate::db::resource;
use crate::error::AppError;
use crate::models::Message;

#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn get_conversation(
    pool: &Pool<Sqlite>,
    user: &User,
    other_user_id: i64,
) -> Result<Vec<Message>, AppError> {
    info!("Getting conversation");
    let messages = sqlx::query_as::<_, Message>(
        "SELECT id, sender_id, receiver_id, content, is_read, created_at FROM messages
         WHERE (sender_id = ?1 AND receiver_id = ?2)
            OR (sender_id = ?2 AND receiver_id = ?1)
         ORDER BY created_at ASC, id ASC",
    )
    .bind(user.id)
    .bind(other_user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Only the receiver may mark a message read. Repeating the call is harmless.
#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn mark_message_read(
    pool: &Pool<Sqlite>,
    user: &User,
    message_id: i64,
) -> Result<Message, AppError> {
    info!("Marking message as read");
    let message = resource::get::<Message>(pool, user, message_id).await?;

    if message.receiver_id != user.id {
        return Err(AppError::Authorization(
            "Only the receiver can mark a message as read".to_string(),
        ));
    }

    if !message.is_read {
        sqlx::query("UPDATE messages SET is_read = TRUE WHERE id = ?")
            .bind(message_id)
            .execute(pool)
            .await?;
    }

    resource::get::<Message>(pool, user, message_id).await
}
