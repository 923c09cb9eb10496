use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::auth::User;
use crate::db::resource;
use crate::error::AppError;
use crate::models::{Assignment, AssignmentChanges, NewAssignment};

#[get("/assignments")]
pub async fn api_list_assignments(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    Ok(Json(resource::list::<Assignment>(db, &user).await?))
}

#[post("/assignments", data = "<assignment>")]
pub async fn api_create_assignment(
    assignment: Json<NewAssignment>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Assignment>>, AppError> {
    let created = resource::create::<Assignment>(db, &user, assignment.into_inner()).await?;
    Ok(Custom(Status::Created, Json(created)))
}

#[get("/assignments/<id>")]
pub async fn api_get_assignment(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Assignment>, AppError> {
    Ok(Json(resource::get::<Assignment>(db, &user, id).await?))
}

#[put("/assignments/<id>", data = "<changes>")]
pub async fn api_update_assignment(
    id: i64,
    changes: Json<AssignmentChanges>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Assignment>, AppError> {
    let updated = resource::update::<Assignment>(db, &user, id, changes.into_inner()).await?;
    Ok(Json(updated))
}

#[delete("/assignments/<id>")]
pub async fn api_delete_assignment(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    resource::delete::<Assignment>(db, &user, id).await?;
    Ok(Status::NoContent)
}
