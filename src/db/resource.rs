//! Generic CRUD over one table.
//!
//! Every entity exposed by the API implements [`Resource`] (and [`Updatable`]
//! when it accepts `PUT`). The free functions in this module then provide the
//! list/get/create/update/delete operations once, applying the entity's
//! visibility scope and foreign-key checks uniformly.

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};
use validator::Validate;

use crate::auth::User;
use crate::error::AppError;

/// A foreign key carried by an incoming payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub table: &'static str,
    pub id: i64,
}

impl Reference {
    pub fn new(field: &'static str, table: &'static str, id: i64) -> Self {
        Self { field, table, id }
    }
}

#[rocket::async_trait]
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + Sized {
    type Create: Validate + Send + Sync;

    /// Human readable name used in error messages.
    const NAME: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;
    const ORDER_BY: &'static str = "id";

    /// Appends `AND ...` conditions restricting rows to what `user` may see.
    fn push_scope(_query: &mut QueryBuilder<'_, Sqlite>, _user: &User) {}

    fn references(_new: &Self::Create) -> Vec<Reference> {
        Vec::new()
    }

    /// Inserts the row and returns its id. Ownership columns come from `user`.
    async fn insert(pool: &Pool<Sqlite>, user: &User, new: &Self::Create) -> Result<i64, AppError>;
}

#[rocket::async_trait]
pub trait Updatable: Resource {
    type Update: Validate + Send + Sync;

    fn authorize_update(_user: &User, _changes: &Self::Update) -> Result<(), AppError> {
        Ok(())
    }

    fn update_references(_changes: &Self::Update) -> Vec<Reference> {
        Vec::new()
    }

    /// Overwrites the fields present in `changes`, keeping the rest.
    fn merge(self, changes: Self::Update) -> Self;

    async fn save(&self, pool: &Pool<Sqlite>) -> Result<(), AppError>;
}

pub async fn ensure_references(
    pool: &Pool<Sqlite>,
    references: &[Reference],
) -> Result<(), AppError> {
    for reference in references {
        let sql = format!("SELECT id FROM {} WHERE id = ?", reference.table);
        let exists: Option<i64> = sqlx::query_scalar(&sql)
            .bind(reference.id)
            .fetch_optional(pool)
            .await?;

        if exists.is_none() {
            return Err(AppError::invalid_field(
                reference.field,
                format!("{} references a missing record ({})", reference.field, reference.id),
            ));
        }
    }

    Ok(())
}

#[instrument(skip_all, fields(resource = R::NAME, user_id = user.id))]
pub async fn list<R: Resource>(pool: &Pool<Sqlite>, user: &User) -> Result<Vec<R>, AppError> {
    info!("Listing resources");
    let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
        "SELECT {} FROM {} WHERE 1 = 1",
        R::COLUMNS,
        R::TABLE
    ));
    R::push_scope(&mut query, user);
    query.push(format!(" ORDER BY {}", R::ORDER_BY));

    let rows = query.build_query_as::<R>().fetch_all(pool).await?;

    Ok(rows)
}

#[instrument(skip_all, fields(resource = R::NAME, user_id = user.id, id = id))]
pub async fn get<R: Resource>(pool: &Pool<Sqlite>, user: &User, id: i64) -> Result<R, AppError> {
    info!("Fetching resource");
    let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
        "SELECT {} FROM {} WHERE id = ",
        R::COLUMNS,
        R::TABLE
    ));
    query.push_bind(id);
    R::push_scope(&mut query, user);

    query
        .build_query_as::<R>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", R::NAME, id)))
}

#[instrument(skip_all, fields(resource = R::NAME, user_id = user.id))]
pub async fn create<R: Resource>(
    pool: &Pool<Sqlite>,
    user: &User,
    new: R::Create,
) -> Result<R, AppError> {
    info!("Creating resource");
    new.validate()?;
    ensure_references(pool, &R::references(&new)).await?;

    let id = R::insert(pool, user, &new).await?;

    get::<R>(pool, user, id).await
}

#[instrument(skip_all, fields(resource = R::NAME, user_id = user.id, id = id))]
pub async fn update<R: Updatable>(
    pool: &Pool<Sqlite>,
    user: &User,
    id: i64,
    changes: R::Update,
) -> Result<R, AppError> {
    info!("Updating resource");
    changes.validate()?;

    let existing = get::<R>(pool, user, id).await?;
    R::authorize_update(user, &changes)?;
    ensure_references(pool, &R::update_references(&changes)).await?;

    existing.merge(changes).save(pool).await?;

    get::<R>(pool, user, id).await
}

#[instrument(skip_all, fields(resource = R::NAME, user_id = user.id, id = id))]
pub async fn delete<R: Resource>(pool: &Pool<Sqlite>, user: &User, id: i64) -> Result<(), AppError> {
    info!("Deleting resource");
    get::<R>(pool, user, id).await?;

    let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
    sqlx::query(&sql).bind(id).execute(pool).await?;

    Ok(())
}
