//! Pet owner repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pet_city_core::{Email, PersonName, PetOwnerId, PhoneNumber};

use super::{PetOwnerStore, RepositoryError};
use crate::models::{NewPetOwner, PetOwner};

const COLUMNS: &str = "id, firstname, lastname, phone_number, email, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PetOwnerRow {
    id: PetOwnerId,
    firstname: String,
    lastname: String,
    phone_number: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PetOwnerRow> for PetOwner {
    type Error = RepositoryError;

    fn try_from(row: PetOwnerRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, e: &dyn std::fmt::Display| {
            RepositoryError::DataCorruption(format!(
                "invalid {field} for pet owner {}: {e}",
                row.id
            ))
        };

        Ok(Self {
            id: row.id,
            firstname: PersonName::parse(&row.firstname).map_err(|e| corrupt("firstname", &e))?,
            lastname: PersonName::parse(&row.lastname).map_err(|e| corrupt("lastname", &e))?,
            phone_number: PhoneNumber::parse(&row.phone_number)
                .map_err(|e| corrupt("phone number", &e))?,
            email: Email::parse(&row.email).map_err(|e| corrupt("email", &e))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for pet owner database operations.
#[derive(Clone)]
pub struct PetOwnerRepository {
    pool: PgPool,
}

impl PetOwnerRepository {
    /// Create a new pet owner repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetOwnerStore for PetOwnerRepository {
    async fn insert(&self, owner: &NewPetOwner) -> Result<PetOwner, RepositoryError> {
        let row: PetOwnerRow = sqlx::query_as(&format!(
            r"
            INSERT INTO petcity.pet_owner (firstname, lastname, phone_number, email)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "
        ))
        .bind(owner.firstname.as_str())
        .bind(owner.lastname.as_str())
        .bind(owner.phone_number.as_str())
        .bind(owner.email.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: PetOwnerId) -> Result<Option<PetOwner>, RepositoryError> {
        let row: Option<PetOwnerRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM petcity.pet_owner WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PetOwner::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<PetOwner>, RepositoryError> {
        let rows: Vec<PetOwnerRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM petcity.pet_owner ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PetOwner::try_from).collect()
    }

    async fn update(&self, owner: &PetOwner) -> Result<PetOwner, RepositoryError> {
        let row: Option<PetOwnerRow> = sqlx::query_as(&format!(
            r"
            UPDATE petcity.pet_owner
            SET firstname = $2, lastname = $3, phone_number = $4, email = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(owner.id)
        .bind(owner.firstname.as_str())
        .bind(owner.lastname.as_str())
        .bind(owner.phone_number.as_str())
        .bind(owner.email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn delete_by_id(&self, id: PetOwnerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM petcity.pet_owner WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
