use chrono::{DateTime, Utc};
use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::{Deserialize, Serialize, json::Json};
use sqlx::{Pool, Sqlite};
use validator::Validate;

use crate::auth::{SessionToken, User, UserSession};
use crate::db::{authenticate_user, create_user, create_user_session, get_user, invalidate_session};
use crate::env::AppConfig;
use crate::error::AppError;
use crate::models::Role;
use crate::validation::JsonValidateExt;

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Name is required"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    name: String,
    #[validate(email(message = "A valid email address is required"))]
    email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    password: String,
}

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            roles: user.roles,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub user: UserData,
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

async fn issue_session(
    db: &Pool<Sqlite>,
    config: &AppConfig,
    user: User,
) -> Result<AuthResponse, AppError> {
    let token = UserSession::generate_token();
    let ttl = chrono::Duration::try_hours(config.session_ttl_hours)
        .ok_or_else(|| AppError::Config("Session lifetime is out of range".to_string()))?;
    let expires_at = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Config("Session lifetime is out of range".to_string()))?;

    create_user_session(db, user.id, &token, expires_at).await?;

    Ok(AuthResponse {
        user: UserData::from(user),
        token,
        token_type: "Bearer".to_string(),
        expires_at,
    })
}

#[post("/register", data = "<registration>")]
pub async fn api_register(
    registration: Json<RegisterRequest>,
    db: &State<Pool<Sqlite>>,
    config: &State<AppConfig>,
) -> Result<Custom<Json<AuthResponse>>, AppError> {
    let validated = registration.validated()?;
    let email = validated.email.trim().to_lowercase();

    let user_id = create_user(db, validated.name.trim(), &email, &validated.password).await?;
    let user = get_user(db, user_id).await?;

    let response = issue_session(db, config, user).await?;

    Ok(Custom(Status::Created, Json(response)))
}

#[post("/login", data = "<login>")]
pub async fn api_login(
    login: Json<LoginRequest>,
    db: &State<Pool<Sqlite>>,
    config: &State<AppConfig>,
) -> Result<Json<AuthResponse>, AppError> {
    let validated = login.validated()?;
    let email = validated.email.trim().to_lowercase();

    match authenticate_user(db, &email, &validated.password).await? {
        Some(user) => Ok(Json(issue_session(db, config, user).await?)),
        None => Err(AppError::Authentication(
            "Invalid email or password".to_string(),
        )),
    }
}

#[post("/logout")]
pub async fn api_logout(
    _user: User,
    token: SessionToken,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    invalidate_session(db, &token.0).await?;

    Ok(Status::NoContent)
}

#[get("/me")]
pub async fn api_me(user: User) -> Json<UserData> {
    Json(UserData::from(user))
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
