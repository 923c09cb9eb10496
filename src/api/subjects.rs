use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::auth::User;
use crate::db::resource;
use crate::error::AppError;
use crate::models::{Subject, SubjectChanges, NewSubject};

#[get("/subjects")]
pub async fn api_list_subjects(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(resource::list::<Subject>(db, &user).await?))
}

#[post("/subjects", data = "<subject>")]
pub async fn api_create_subject(
    subject: Json<NewSubject>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Subject>>, AppError> {
    let created = resource::create::<Subject>(db, &user, subject.into_inner()).await?;
    Ok(Custom(Status::Created, Json(created)))
}

#[get("/subjects/<id>")]
pub async fn api_get_subject(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Subject>, AppError> {
    Ok(Json(resource::get::<Subject>(db, &user, id).await?))
}

#[put("/subjects/<id>", data = "<changes>")]
pub async fn api_update_subject(
    id: i64,
    changes: Json<SubjectChanges>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Subject>, AppError> {
    let updated = resource::update::<Subject>(db, &user, id, changes.into_inner()).await?;
    Ok(Json(updated))
}

#[delete("/subjects/<id>")]
pub async fn api_delete_subject(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    resource::delete::<Subject>(db, &user, id).await?;
    Ok(Status::NoContent)
}
