use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, QueryBuilder, Sqlite};
use validator::Validate;

use crate::auth::{Permission, User};
use crate::db::resource::{Reference, Resource, Updatable};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<f64>,
}

/// The submitting user is always the caller; a `user_id` in the body is ignored.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewSubmission {
    #[validate(range(min = 1, message = "assignment_id is required"))]
    pub assignment_id: i64,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubmissionChanges {
    pub assignment_id: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0, max = 10.0, message = "grade must be between 0 and 10"))]
    #[serde(deserialize_with = "super::nullable")]
    pub grade: Option<Option<f64>>,
}

#[rocket::async_trait]
impl Resource for Submission {
    type Create = NewSubmission;

    const NAME: &'static str = "Submission";
    const TABLE: &'static str = "submissions";
    const COLUMNS: &'static str = "id, assignment_id, user_id, submitted_at, grade";
    const ORDER_BY: &'static str = "submitted_at, id";

    /// Graders see every submission, everyone else only their own.
    fn push_scope(query: &mut QueryBuilder<'_, Sqlite>, user: &User) {
        if !user.has_permission(Permission::ViewAllSubmissions) {
            query.push(" AND user_id = ");
            query.push_bind(user.id);
        }
    }

    fn references(new: &NewSubmission) -> Vec<Reference> {
        vec![Reference::new("assignment_id", "assignments", new.assignment_id)]
    }

    async fn insert(
        pool: &Pool<Sqlite>,
        user: &User,
        new: &NewSubmission,
    ) -> Result<i64, AppError> {
        let res = sqlx::query(
            "INSERT INTO submissions (assignment_id, user_id, submitted_at, grade) VALUES (?, ?, ?, NULL)",
        )
        .bind(new.assignment_id)
        .bind(user.id)
        .bind(new.submitted_at.unwrap_or_else(Utc::now))
        .execute(pool)
        .await?;

        Ok(res.last_insert_rowid())
    }
}

#[rocket::async_trait]
impl Updatable for Submission {
    type Update = SubmissionChanges;

    fn authorize_update(user: &User, changes: &SubmissionChanges) -> Result<(), AppError> {
        // Clearing a grade with `null` counts as grading too.
        if changes.grade.is_some() {
            user.require_permission(Permission::GradeSubmissions)?;
        }
        Ok(())
    }

    fn update_references(changes: &SubmissionChanges) -> Vec<Reference> {
        changes
            .assignment_id
            .map(|id| vec![Reference::new("assignment_id", "assignments", id)])
            .unwrap_or_default()
    }

    fn merge(self, changes: SubmissionChanges) -> Self {
        Self {
            id: self.id,
            assignment_id: changes.assignment_id.unwrap_or(self.assignment_id),
            user_id: self.user_id,
            submitted_at: changes.submitted_at.unwrap_or(self.submitted_at),
            grade: changes.grade.unwrap_or(self.grade),
        }
    }

    async fn save(&self, pool: &Pool<Sqlite>) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE submissions SET assignment_id = ?, submitted_at = ?, grade = ? WHERE id = ?",
        )
        .bind(self.assignment_id)
        .bind(self.submitted_at)
        .bind(self.grade)
        .bind(self.id)
        .execute(pool)
        .await?;

        Ok(())
    }
}
