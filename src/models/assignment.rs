use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use validator::Validate;

use crate::auth::User;
use crate::db::resource::{Reference, Resource, Updatable};
use crate::error::AppError;

use super::required;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub subject_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewAssignment {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Assignment title is required"),
        length(max = 255, message = "Assignment title must be at most 255 characters")
    )]
    pub title: String,
    #[validate(required(message = "due_date is required"))]
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "subject_id is required"))]
    pub subject_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AssignmentChanges {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Assignment title cannot be empty"),
        length(max = 255, message = "Assignment title must be at most 255 characters")
    )]
    pub title: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub subject_id: Option<i64>,
}

#[rocket::async_trait]
impl Resource for Assignment {
    type Create = NewAssignment;

    const NAME: &'static str = "Assignment";
    const TABLE: &'static str = "assignments";
    const COLUMNS: &'static str = "id, title, due_date, subject_id";
    const ORDER_BY: &'static str = "due_date, id";

    fn references(new: &NewAssignment) -> Vec<Reference> {
        vec![Reference::new("subject_id", "subjects", new.subject_id)]
    }

    async fn insert(
        pool: &Pool<Sqlite>,
        _user: &User,
        new: &NewAssignment,
    ) -> Result<i64, AppError> {
        let due_date = required(&new.due_date, "due_date")?;

        let res = sqlx::query("INSERT INTO assignments (title, due_date, subject_id) VALUES (?, ?, ?)")
            .bind(new.title.trim())
            .bind(due_date)
            .bind(new.subject_id)
            .execute(pool)
            .await?;

        Ok(res.last_insert_rowid())
    }
}

#[rocket::async_trait]
impl Updatable for Assignment {
    type Update = AssignmentChanges;

    fn update_references(changes: &AssignmentChanges) -> Vec<Reference> {
        changes
            .subject_id
            .map(|id| vec![Reference::new("subject_id", "subjects", id)])
            .unwrap_or_default()
    }

    fn merge(self, changes: AssignmentChanges) -> Self {
        Self {
            id: self.id,
            title: changes.title.map(|t| t.trim().to_string()).unwrap_or(self.title),
            due_date: changes.due_date.unwrap_or(self.due_date),
            subject_id: changes.subject_id.unwrap_or(self.subject_id),
        }
    }

    async fn save(&self, pool: &Pool<Sqlite>) -> Result<(), AppError> {
        sqlx::query("UPDATE assignments SET title = ?, due_date = ?, subject_id = ? WHERE id = ?")
            .bind(&self.title)
            .bind(self.due_date)
            .bind(self.subject_id)
            .bind(self.id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
