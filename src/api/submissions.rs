use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::auth::User;
use crate::db::resource;
use crate::error::AppError;
use crate::models::{NewSubmission, Submission, SubmissionChanges};

#[get("/submissions")]
pub async fn api_list_submissions(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Submission>>, AppError> {
    Ok(Json(resource::list::<Submission>(db, &user).await?))
}

#[post("/submissions", data = "<submission>")]
pub async fn api_create_submission(
    submission: Json<NewSubmission>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Submission>>, AppError> {
    let created = resource::create::<Submission>(db, &user, submission.into_inner()).await?;
    Ok(Custom(Status::Created, Json(created)))
}

#[get("/submissions/<id>")]
pub async fn api_get_submission(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Submission>, AppError> {
    Ok(Json(resource::get::<Submission>(db, &user, id).await?))
}

#[put("/submissions/<id>", data = "<changes>")]
pub async fn api_update_submission(
    id: i64,
    changes: Json<SubmissionChanges>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Submission>, AppError> {
    let updated = resource::update::<Submission>(db, &user, id, changes.into_inner()).await?;
    Ok(Json(updated))
}

#[delete("/submissions/<id>")]
pub async fn api_delete_submission(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    resource::delete::<Submission>(db, &user, id).await?;
    Ok(Status::NoContent)
}
