use serde::{Deserialize, Serialize};
use sqlx::{Pool, QueryBuilder, Sqlite};
use validator::Validate;

use crate::auth::User;
use crate::db::resource::{Resource, Updatable};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewCourse {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Course name is required"),
        length(max = 255, message = "Course name must be at most 255 characters")
    )]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CourseChanges {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Course name cannot be empty"),
        length(max = 255, message = "Course name must be at most 255 characters")
    )]
    pub name: Option<String>,
    /// `null` clears the description.
    #[serde(deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
}

#[rocket::async_trait]
impl Resource for Course {
    type Create = NewCourse;

    const NAME: &'static str = "Course";
    const TABLE: &'static str = "courses";
    const COLUMNS: &'static str = "id, name, description";
    const ORDER_BY: &'static str = "name, id";

    /// Courses are visible to the users enrolled in them.
    fn push_scope(query: &mut QueryBuilder<'_, Sqlite>, user: &User) {
        query.push(" AND id IN (SELECT course_id FROM course_user WHERE user_id = ");
        query.push_bind(user.id);
        query.push(")");
    }

    async fn insert(pool: &Pool<Sqlite>, user: &User, new: &NewCourse) -> Result<i64, AppError> {
        let mut tx = pool.begin().await?;

        let res = sqlx::query("INSERT INTO courses (name, description) VALUES (?, ?)")
            .bind(new.name.trim())
            .bind(&new.description)
            .execute(&mut *tx)
            .await?;
        let course_id = res.last_insert_rowid();

        sqlx::query("INSERT INTO course_user (course_id, user_id) VALUES (?, ?)")
            .bind(course_id)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(course_id)
    }
}

#[rocket::async_trait]
impl Updatable for Course {
    type Update = CourseChanges;

    fn merge(self, changes: CourseChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.map(|n| n.trim().to_string()).unwrap_or(self.name),
            description: changes.description.unwrap_or(self.description),
        }
    }

    async fn save(&self, pool: &Pool<Sqlite>) -> Result<(), AppError> {
        sqlx::query("UPDATE courses SET name = ?, description = ? WHERE id = ?")
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
