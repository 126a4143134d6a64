//! Dog repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pet_city_core::{DogAge, DogId, DogName, PetOwnerId};

use super::{DogStore, RepositoryError};
use crate::models::{Dog, NewDog};

const COLUMNS: &str = "id, name, age, owner_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct DogRow {
    id: DogId,
    name: String,
    age: i32,
    owner_id: PetOwnerId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DogRow> for Dog {
    type Error = RepositoryError;

    fn try_from(row: DogRow) -> Result<Self, Self::Error> {
        let name = DogName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid name for dog {}: {e}", row.id))
        })?;
        let age = DogAge::new(row.age).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid age for dog {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name,
            age,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for dog database operations.
#[derive(Clone)]
pub struct DogRepository {
    pool: PgPool,
}

impl DogRepository {
    /// Create a new dog repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DogStore for DogRepository {
    async fn insert(&self, owner_id: PetOwnerId, dog: &NewDog) -> Result<Dog, RepositoryError> {
        let row: DogRow = sqlx::query_as(&format!(
            r"
            INSERT INTO petcity.dog (name, age, owner_id)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "
        ))
        .bind(dog.name.as_str())
        .bind(dog.age.years())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: DogId) -> Result<Option<Dog>, RepositoryError> {
        let row: Option<DogRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM petcity.dog WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Dog::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Dog>, RepositoryError> {
        let rows: Vec<DogRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM petcity.dog ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Dog::try_from).collect()
    }

    async fn find_by_owner(&self, owner_id: PetOwnerId) -> Result<Vec<Dog>, RepositoryError> {
        let rows: Vec<DogRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM petcity.dog WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Dog::try_from).collect()
    }

    async fn update(&self, dog: &Dog) -> Result<Dog, RepositoryError> {
        let row: Option<DogRow> = sqlx::query_as(&format!(
            r"
            UPDATE petcity.dog
            SET name = $2, age = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(dog.id)
        .bind(dog.name.as_str())
        .bind(dog.age.years())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn delete_by_id(&self, id: DogId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM petcity.dog WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
