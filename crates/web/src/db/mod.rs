//! Persistence for users, pet owners and dogs.
//!
//! Handlers and services only see the storage traits below. Two backends
//! implement them:
//!
//! - [`PgStores`]: `PostgreSQL` repositories (schema `petcity`)
//! - [`InMemoryStore`]: process-local tables for tests and database-less runs
//!
//! ## Tables
//!
//! - `petcity.app_user` - Login accounts (email + Argon2 hash)
//! - `petcity.pet_owner` - Pet owners
//! - `petcity.dog` - Dogs (`owner_id` references `pet_owner`, `ON DELETE CASCADE`)
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p pet-city-cli -- migrate
//! ```

pub mod dogs;
pub mod memory;
pub mod owners;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use pet_city_core::{DogId, Email, PetOwnerId};

use crate::models::{Dog, NewDog, NewPetOwner, PetOwner, User};

pub use dogs::DogRepository;
pub use memory::InMemoryStore;
pub use owners::PetOwnerRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Login accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    async fn create(&self, email: &Email, password_hash: &str) -> Result<User, RepositoryError>;

    /// Whether an account with exactly this email exists.
    ///
    /// Takes raw form input, so it works before the email has been validated.
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;

    /// Look up a user together with their password hash.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;
}

/// Pet owner records.
#[async_trait]
pub trait PetOwnerStore: Send + Sync {
    async fn insert(&self, owner: &NewPetOwner) -> Result<PetOwner, RepositoryError>;

    async fn find_by_id(&self, id: PetOwnerId) -> Result<Option<PetOwner>, RepositoryError>;

    /// All owners ordered by id.
    async fn find_all(&self) -> Result<Vec<PetOwner>, RepositoryError>;

    /// Persist every mutable field of `owner` and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row no longer exists.
    async fn update(&self, owner: &PetOwner) -> Result<PetOwner, RepositoryError>;

    /// Delete an owner and, by cascade, all of their dogs.
    ///
    /// Returns `false` if no row matched.
    async fn delete_by_id(&self, id: PetOwnerId) -> Result<bool, RepositoryError>;
}

/// Dog records.
#[async_trait]
pub trait DogStore: Send + Sync {
    /// Insert a dog under `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the owner does not exist.
    async fn insert(&self, owner_id: PetOwnerId, dog: &NewDog) -> Result<Dog, RepositoryError>;

    async fn find_by_id(&self, id: DogId) -> Result<Option<Dog>, RepositoryError>;

    /// All dogs ordered by id.
    async fn find_all(&self) -> Result<Vec<Dog>, RepositoryError>;

    /// Dogs owned by `owner_id`, ordered by id.
    async fn find_by_owner(&self, owner_id: PetOwnerId) -> Result<Vec<Dog>, RepositoryError>;

    /// Persist name and age of `dog` and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row no longer exists.
    async fn update(&self, dog: &Dog) -> Result<Dog, RepositoryError>;

    /// Returns `false` if no row matched.
    async fn delete_by_id(&self, id: DogId) -> Result<bool, RepositoryError>;
}

/// The three `PostgreSQL` repositories sharing one pool.
#[derive(Clone)]
pub struct PgStores {
    pub users: UserRepository,
    pub owners: PetOwnerRepository,
    pub dogs: DogRepository,
}

impl PgStores {
    #[must_use]
    pub fn new(pool: &PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            owners: PetOwnerRepository::new(pool.clone()),
            dogs: DogRepository::new(pool.clone()),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique violation to `RepositoryError::Conflict`.
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
