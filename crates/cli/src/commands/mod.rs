//! CLI subcommands.

pub mod migrate;
pub mod seed;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use pet_city_web::services::{AuthError, ServiceError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Input rejected before touching the database.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Account creation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Owner or dog operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Connect using `PETCITY_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PETCITY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("PETCITY_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(pet_city_web::db::create_pool(&database_url).await?)
}
