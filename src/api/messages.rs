use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::auth::User;
use crate::db::{get_conversation, get_user, mark_message_read, resource};
use crate::error::AppError;
use crate::models::{Message, NewMessage};

#[get("/messages")]
pub async fn api_list_messages(
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(resource::list::<Message>(db, &user).await?))
}

#[post("/messages", data = "<message>")]
pub async fn api_send_message(
    message: Json<NewMessage>,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Message>>, AppError> {
    let sent = resource::create::<Message>(db, &user, message.into_inner()).await?;
    Ok(Custom(Status::Created, Json(sent)))
}

#[get("/messages/conversation/<user_id>")]
pub async fn api_get_conversation(
    user_id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Message>>, AppError> {
    get_user(db, user_id).await?;

    Ok(Json(get_conversation(db, &user, user_id).await?))
}

#[put("/messages/<id>/read")]
pub async fn api_mark_message_read(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(mark_message_read(db, &user, id).await?))
}

#[delete("/messages/<id>")]
pub async fn api_delete_message(
    id: i64,
    user: User,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    resource::delete::<Message>(db, &user, id).await?;
    Ok(Status::NoContent)
}
