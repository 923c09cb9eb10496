#[macro_use]
extern crate rocket;

mod api;
mod auth;
mod db;
mod env;
mod error;
mod models;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;
mod view;

use std::time::Duration;

use anyhow::anyhow;
use auth::{default_api, unauthorized_api};
use db::{clean_expired_sessions, ensure_admin_user};
use env::{AppConfig, load_environment};
use error::AppError;
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket, tokio};
use sqlx::SqlitePool;
use telemetry::{TelemetryFairing, init_tracing, shutdown_telemetry};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Rocket(Box<rocket::Error>),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::Error> for Error {
    fn from(value: rocket::Error) -> Self {
        Error::Rocket(Box::new(value))
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    load_environment().map_err(|e| anyhow!("Failed to load environment: {}", e))?;

    let config = AppConfig::from_env()?;
    init_tracing(&config);

    let pool = SqlitePool::connect(&config.database_url).await?;

    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(AppError::from)?;
    info!("Migrations completed successfully");

    if let Some(admin) = &config.admin {
        let user = ensure_admin_user(&pool, &admin.name, &admin.email, &admin.password).await?;
        info!(user_id = user.id, "Administrator account ready");
    }

    spawn_session_cleanup(pool.clone(), config.session_cleanup_interval_secs);

    init_rocket(pool, config).await.launch().await?;

    Ok(())
}

fn spawn_session_cleanup(pool: SqlitePool, interval_secs: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;

        loop {
            match clean_expired_sessions(&pool).await {
                Ok(count) => {
                    if count > 0 {
                        info!("Cleaned up {} expired sessions", count);
                    }
                }
                Err(e) => {
                    error!("Failed to clean expired sessions: {}", e);
                }
            }

            tokio::time::sleep(Duration::from_secs(interval_secs.max(1))).await;
        }
    });
}

pub async fn init_rocket(pool: SqlitePool, config: AppConfig) -> Rocket<Build> {
    init_rocket_with(rocket::Config::figment(), pool, config).await
}

/// Like [`init_rocket`], with Rocket's own settings read from `figment`.
pub async fn init_rocket_with(
    figment: Figment,
    pool: SqlitePool,
    config: AppConfig,
) -> Rocket<Build> {
    info!("Starting Laredu CRM");

    rocket::custom(figment)
        .manage(pool)
        .manage(config)
        .mount("/api", api::routes())
        .register("/api", catchers![unauthorized_api, default_api])
        .attach(TelemetryFairing)
        .attach(AdHoc::on_shutdown("Telemetry shutdown", |_| {
            Box::pin(async move {
                shutdown_telemetry();
            })
        }))
}
