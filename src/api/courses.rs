use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::auth::User;
use crate::db::resource;
use crate::error::AppError;
use crate::models::{Course, CourseChanges, NewCourse};

#[get("/courses")]
pub async fn api_list_courses(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(resource::list::<Course>(db, &user).await?))
}

#[post("/courses", data = "<course>")]
pub async fn api_create_course(
    course: Json<NewCourse>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Course>>, AppError> {
    let created = resource::create::<Course>(db, &user, course.into_inner()).await?;
    Ok(Custom(Status::Created, Json(created)))
}

#[get("/courses/<id>")]
pub async fn api_get_course(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(resource::get::<Course>(db, &user, id).await?))
}

#[put("/courses/<id>", data = "<changes>")]
pub async fn api_update_course(
    id: i64,
    changes: Json<CourseChanges>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Course>, AppError> {
    let updated = resource::update::<Course>(db, &user, id, changes.into_inner()).await?;
    Ok(Json(updated))
}

#[delete("/courses/<id>")]
pub async fn api_delete_course(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    resource::delete::<Course>(db, &user, id).await?;
    Ok(Status::NoContent)
}
