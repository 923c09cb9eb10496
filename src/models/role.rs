use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use validator::Validate;

use crate::auth::User;
use crate::db::resource::Resource;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewRole {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Role name is required"),
        length(max = 64, message = "Role name must be at most 64 characters")
    )]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RoleAssignment {
    #[validate(range(min = 1, message = "role_id is required"))]
    pub role_id: i64,
}

#[rocket::async_trait]
impl Resource for Role {
    type Create = NewRole;

    const NAME: &'static str = "Role";
    const TABLE: &'static str = "roles";
    const COLUMNS: &'static str = "id, name";

    async fn insert(pool: &Pool<Sqlite>, _user: &User, new: &NewRole) -> Result<i64, AppError> {
        let res = sqlx::query("INSERT INTO roles (name) VALUES (?)")
            .bind(new.name.trim().to_lowercase())
            .execute(pool)
            .await?;

        Ok(res.last_insert_rowid())
    }
}
