use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use validator::Validate;

use crate::auth::User;
use crate::db::resource::{Reference, Resource, Updatable};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub course_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewSubject {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Subject name is required"),
        length(max = 255, message = "Subject name must be at most 255 characters")
    )]
    pub name: String,
    #[validate(range(min = 1, message = "course_id is required"))]
    pub course_id: i64,
    #[validate(range(min = 1, message = "teacher_id is required"))]
    pub teacher_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubjectChanges {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Subject name cannot be empty"),
        length(max = 255, message = "Subject name must be at most 255 characters")
    )]
    pub name: Option<String>,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[rocket::async_trait]
impl Resource for Subject {
    type Create = NewSubject;

    const NAME: &'static str = "Subject";
    const TABLE: &'static str = "subjects";
    const COLUMNS: &'static str = "id, name, course_id, teacher_id";
    const ORDER_BY: &'static str = "name, id";

    fn references(new: &NewSubject) -> Vec<Reference> {
        vec![
            Reference::new("course_id", "courses", new.course_id),
            Reference::new("teacher_id", "users", new.teacher_id),
        ]
    }

    async fn insert(pool: &Pool<Sqlite>, _user: &User, new: &NewSubject) -> Result<i64, AppError> {
        let res = sqlx::query("INSERT INTO subjects (name, course_id, teacher_id) VALUES (?, ?, ?)")
            .bind(new.name.trim())
            .bind(new.course_id)
            .bind(new.teacher_id)
            .execute(pool)
            .await?;

        Ok(res.last_insert_rowid())
    }
}

#[rocket::async_trait]
impl Updatable for Subject {
    type Update = SubjectChanges;

    fn update_references(changes: &SubjectChanges) -> Vec<Reference> {
        let mut references = Vec::new();
        if let Some(course_id) = changes.course_id {
            references.push(Reference::new("course_id", "courses", course_id));
        }
        if let Some(teacher_id) = changes.teacher_id {
            references.push(Reference::new("teacher_id", "users", teacher_id));
        }
        references
    }

    fn merge(self, changes: SubjectChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.map(|n| n.trim().to_string()).unwrap_or(self.name),
            course_id: changes.course_id.unwrap_or(self.course_id),
            teacher_id: changes.teacher_id.unwrap_or(self.teacher_id),
        }
    }

    async fn save(&self, pool: &Pool<Sqlite>) -> Result<(), AppError> {
        sqlx::query("UPDATE subjects SET name = ?, course_id = ?, teacher_id = ? WHERE id = ?")
            .bind(&self.name)
            .bind(self.course_id)
            .bind(self.teacher_id)
            .bind(self.id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
