use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::auth::User;
use crate::db::resource;
use crate::error::AppError;
use crate::models::{CalendarEvent, CalendarEventChanges, NewCalendarEvent};

#[get("/calendar")]
pub async fn api_list_calendar_events(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    Ok(Json(resource::list::<CalendarEvent>(db, &user).await?))
}

#[post("/calendar", data = "<calendar_event>")]
pub async fn api_create_calendar_event(
    calendar_event: Json<NewCalendarEvent>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CalendarEvent>>, AppError> {
    let created = resource::create::<CalendarEvent>(db, &user, calendar_event.into_inner()).await?;
    Ok(Custom(Status::Created, Json(created)))
}

#[get("/calendar/<id>")]
pub async fn api_get_calendar_event(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<CalendarEvent>, AppError> {
    Ok(Json(resource::get::<CalendarEvent>(db, &user, id).await?))
}

#[put("/calendar/<id>", data = "<changes>")]
pub async fn api_update_calendar_event(
    id: i64,
    changes: Json<CalendarEventChanges>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<CalendarEvent>, AppError> {
    let updated = resource::update::<CalendarEvent>(db, &user, id, changes.into_inner()).await?;
    Ok(Json(updated))
}

#[delete("/calendar/<id>")]
pub async fn api_delete_calendar_event(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    resource::delete::<CalendarEvent>(db, &user, id).await?;
    Ok(Status::NoContent)
}
