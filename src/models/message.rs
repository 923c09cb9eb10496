use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, QueryBuilder, Sqlite};
use validator::Validate;

use crate::auth::User;
use crate::db::resource::{Reference, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewMessage {
    #[validate(range(min = 1, message = "receiver_id is required"))]
    pub receiver_id: i64,
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Message content must be 1 to 5000 characters"),
        length(max = 5000, message = "Message content must be 1 to 5000 characters")
    )]
    pub content: String,
}

#[rocket::async_trait]
impl Resource for Message {
    type Create = NewMessage;

    const NAME: &'static str = "Message";
    const TABLE: &'static str = "messages";
    const COLUMNS: &'static str = "id, sender_id, receiver_id, content, is_read, created_at";
    const ORDER_BY: &'static str = "created_at DESC, id DESC";

    fn push_scope(query: &mut QueryBuilder<'_, Sqlite>, user: &User) {
        query.push(" AND (sender_id = ");
        query.push_bind(user.id);
        query.push(" OR receiver_id = ");
        query.push_bind(user.id);
        query.push(")");
    }

    fn references(new: &NewMessage) -> Vec<Reference> {
        vec![Reference::new("receiver_id", "users", new.receiver_id)]
    }

    async fn insert(pool: &Pool<Sqlite>, user: &User, new: &NewMessage) -> Result<i64, AppError> {
        let res = sqlx::query(
            "INSERT INTO messages (sender_id, receiver_id, content, is_read, created_at)
             VALUES (?, ?, ?, FALSE, ?)",
        )
        .bind(user.id)
        .bind(new.receiver_id)
        .bind(&new.content)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(res.last_insert_rowid())
    }
}
