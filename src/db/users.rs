use crate::{
    auth::{DbUser, DbUserSession, User, UserSession},
    error::AppError,
    models::Role,
};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

#[instrument(skip(pool))]
pub async fn get_user_roles(pool: &Pool<Sqlite>, user_id: i64) -> Result<Vec<Role>, AppError> {
    let roles = sqlx::query_as::<_, Role>(
        "SELECT r.id, r.name FROM roles r
         JOIN role_user ru ON ru.role_id = r.id
         WHERE ru.user_id = ?
         ORDER BY r.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(roles)
}

#[instrument(skip(pool))]
pub async fn get_user(pool: &Pool<Sqlite>, id: i64) -> Result<User, AppError> {
    info!("Fetching user by ID");
    let row = sqlx::query_as::<_, DbUser>("SELECT id, name, email FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(user) => {
            let roles = get_user_roles(pool, id).await?;
            Ok(user.with_roles(roles))
        }
        _ => Err(AppError::NotFound(format!(
            "User with id {} not found in database",
            id
        ))),
    }
}

#[instrument(skip(pool))]
pub async fn find_user_by_email(pool: &Pool<Sqlite>, email: &str) -> Result<Option<User>, AppError> {
    info!("Getting user by email");
    let row = sqlx::query_as::<_, DbUser>("SELECT id, name, email FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(db_user) => {
            let roles = get_user_roles(pool, db_user.id.unwrap_or_default()).await?;
            Ok(Some(db_user.with_roles(roles)))
        }
        None => Ok(None),
    }
}

#[instrument(skip_all, fields(email))]
pub async fn authenticate_user(
    pool: &Pool<Sqlite>,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    info!("Authenticating user");
    let row = sqlx::query_as::<_, (i64, String)>("SELECT id, password FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    match row {
        Some((id, hash)) => match bcrypt::verify(password, &hash) {
            Ok(true) => Ok(Some(get_user(pool, id).await?)),
            _ => Ok(None),
        },
        None => Ok(None),
    }
}

#[instrument(skip_all, fields(email))]
pub async fn create_user(
    pool: &Pool<Sqlite>,
    name: &str,
    email: &str,
    password: &str,
) -> Result<i64, AppError> {
    info!("Creating new user");

    if find_user_by_email(pool, email).await?.is_some() {
        return Err(AppError::Persistence(format!(
            "Email '{}' is already registered",
            email
        )));
    }

    let hashed_password = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let res = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .execute(pool)
        .await?;

    Ok(res.last_insert_rowid())
}

#[instrument(skip(pool))]
pub async fn find_role_by_name(pool: &Pool<Sqlite>, name: &str) -> Result<Option<Role>, AppError> {
    let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(role)
}

#[instrument(skip(pool))]
pub async fn get_role(pool: &Pool<Sqlite>, id: i64) -> Result<Role, AppError> {
    sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role with id {} not found", id)))
}

/// Adding a role the user already holds is a no-op.
#[instrument(skip(pool))]
pub async fn assign_role_to_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
    role_id: i64,
) -> Result<User, AppError> {
    info!("Assigning role to user");
    get_user(pool, user_id).await?;
    get_role(pool, role_id).await?;

    sqlx::query("INSERT OR IGNORE INTO role_user (user_id, role_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?;

    get_user(pool, user_id).await
}

#[instrument(skip(pool))]
pub async fn remove_role_from_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
    role_id: i64,
) -> Result<User, AppError> {
    info!("Removing role from user");
    get_user(pool, user_id).await?;
    get_role(pool, role_id).await?;

    let result = sqlx::query("DELETE FROM role_user WHERE user_id = ? AND role_id = ?")
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Role {} is not assigned to user {}",
            role_id, user_id
        )));
    }

    get_user(pool, user_id).await
}

/// Creates the configured administrator on first start. An existing account
/// with the same email keeps its password and only gains the admin role.
#[instrument(skip_all, fields(email))]
pub async fn ensure_admin_user(
    pool: &Pool<Sqlite>,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user_id = match find_user_by_email(pool, email).await? {
        Some(user) => user.id,
        None => create_user(pool, name, email, password).await?,
    };

    let admin = find_role_by_name(pool, "admin")
        .await?
        .ok_or_else(|| AppError::Internal("admin role missing from roles table".to_string()))?;

    assign_role_to_user(pool, user_id, admin.id).await
}

#[instrument(skip(pool, token))]
pub async fn create_user_session(
    pool: &Pool<Sqlite>,
    user_id: i64,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<i64, AppError> {
    info!("Creating user session");

    let res = sqlx::query(
        "INSERT INTO user_sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(token)
    .bind(Utc::now())
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(res.last_insert_rowid())
}

#[instrument(skip(pool, token))]
pub async fn get_session_by_token(
    pool: &Pool<Sqlite>,
    token: &str,
) -> Result<UserSession, AppError> {
    info!("Getting session by token");

    let session = sqlx::query_as::<_, DbUserSession>(
        "SELECT id, user_id, token, created_at, expires_at FROM user_sessions WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    match session {
        Some(session) => Ok(UserSession::from(session)),
        _ => Err(AppError::Authentication(
            "Invalid session token".to_string(),
        )),
    }
}

#[instrument(skip(pool, token))]
pub async fn invalidate_session(pool: &Pool<Sqlite>, token: &str) -> Result<(), AppError> {
    info!("Invalidating session");

    sqlx::query("DELETE FROM user_sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

#[instrument(skip(pool))]
pub async fn clean_expired_sessions(pool: &Pool<Sqlite>) -> Result<u64, AppError> {
    info!("Cleaning expired sessions");

    let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at < ?")
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
