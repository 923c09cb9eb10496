use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::api::auth::UserData;
use crate::auth::{Permission, User};
use crate::db::{assign_role_to_user, remove_role_from_user, resource};
use crate::error::AppError;
use crate::models::{NewRole, Role, RoleAssignment};
use crate::validation::JsonValidateExt;

#[get("/roles")]
pub async fn api_list_roles(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(resource::list::<Role>(db, &user).await?))
}

#[post("/roles", data = "<role>")]
pub async fn api_create_role(
    role: Json<NewRole>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Role>>, AppError> {
    user.require_permission(Permission::ManageRoles)?;

    let created = resource::create::<Role>(db, &user, role.into_inner()).await?;
    Ok(Custom(Status::Created, Json(created)))
}

#[post("/users/<user_id>/assign-role", data = "<assignment>")]
pub async fn api_assign_role(
    user_id: i64,
    assignment: Json<RoleAssignment>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<UserData>, AppError> {
    user.require_permission(Permission::ManageRoles)?;
    let assignment = assignment.validated()?;

    let updated = assign_role_to_user(db, user_id, assignment.role_id).await?;
    Ok(Json(UserData::from(updated)))
}

#[delete("/users/<user_id>/remove-role", data = "<assignment>")]
pub async fn api_remove_role(
    user_id: i64,
    assignment: Json<RoleAssignment>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<UserData>, AppError> {
    user.require_permission(Permission::ManageRoles)?;
    let assignment = assignment.validated()?;

    let updated = remove_role_from_user(db, user_id, assignment.role_id).await?;
    Ok(Json(UserData::from(updated)))
}
