use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, QueryBuilder, Sqlite};
use validator::Validate;

use crate::auth::User;
use crate::db::resource::{Resource, Updatable};
use crate::error::AppError;

use super::required;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub date: DateTime<Utc>,
    pub user_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewCalendarEvent {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Event title is required"),
        length(max = 255, message = "Event title must be at most 255 characters")
    )]
    pub title: String,
    #[validate(required(message = "date is required"))]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CalendarEventChanges {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Event title cannot be empty"),
        length(max = 255, message = "Event title must be at most 255 characters")
    )]
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[rocket::async_trait]
impl Resource for CalendarEvent {
    type Create = NewCalendarEvent;

    const NAME: &'static str = "Calendar event";
    const TABLE: &'static str = "calendar_events";
    const COLUMNS: &'static str = "id, title, date, user_id";
    const ORDER_BY: &'static str = "date, id";

    fn push_scope(query: &mut QueryBuilder<'_, Sqlite>, user: &User) {
        query.push(" AND user_id = ");
        query.push_bind(user.id);
    }

    async fn insert(
        pool: &Pool<Sqlite>,
        user: &User,
        new: &NewCalendarEvent,
    ) -> Result<i64, AppError> {
        let date = required(&new.date, "date")?;

        let res = sqlx::query("INSERT INTO calendar_events (title, date, user_id) VALUES (?, ?, ?)")
            .bind(new.title.trim())
            .bind(date)
            .bind(user.id)
            .execute(pool)
            .await?;

        Ok(res.last_insert_rowid())
    }
}

#[rocket::async_trait]
impl Updatable for CalendarEvent {
    type Update = CalendarEventChanges;

    fn merge(self, changes: CalendarEventChanges) -> Self {
        Self {
            id: self.id,
            title: changes.title.map(|t| t.trim().to_string()).unwrap_or(self.title),
            date: changes.date.unwrap_or(self.date),
            user_id: self.user_id,
        }
    }

    async fn save(&self, pool: &Pool<Sqlite>) -> Result<(), AppError> {
        sqlx::query("UPDATE calendar_events SET title = ?, date = ? WHERE id = ?")
            .bind(&self.title)
            .bind(self.date)
            .bind(self.id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
