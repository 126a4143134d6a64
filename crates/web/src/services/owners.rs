//! Pet owner service.
//!
//! Wraps [`PetOwnerStore`] calls with existence checks so callers get a typed
//! [`ServiceError::NotFound`] instead of an empty `Option`.

use tracing::info;

use pet_city_core::PetOwnerId;

use super::error::{EntityKind, ServiceError};
use crate::db::{PetOwnerStore, RepositoryError};
use crate::models::{NewPetOwner, PetOwner};

/// Pet owner operations.
pub struct PetOwnerService<'a> {
    owners: &'a dyn PetOwnerStore,
}

impl<'a> PetOwnerService<'a> {
    #[must_use]
    pub const fn new(owners: &'a dyn PetOwnerStore) -> Self {
        Self { owners }
    }

    /// Create a pet owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the insert fails.
    pub async fn create(&self, details: &NewPetOwner) -> Result<PetOwner, ServiceError> {
        let owner = self.owners.insert(details).await.inspect_err(|e| {
            info!(error = %e, "Failed to create pet owner");
        })?;
        info!(owner_id = %owner.id, "Pet owner created");
        Ok(owner)
    }

    /// Get a pet owner by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no owner has this id.
    pub async fn get_by_id(&self, id: PetOwnerId) -> Result<PetOwner, ServiceError> {
        self.owners.find_by_id(id).await?.ok_or_else(|| {
            info!(owner_id = %id, "Pet owner not found");
            ServiceError::not_found(EntityKind::PetOwner, id.as_i32())
        })
    }

    /// List every pet owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` (without an id) when there are none.
    pub async fn list(&self) -> Result<Vec<PetOwner>, ServiceError> {
        let owners = self.owners.find_all().await?;
        if owners.is_empty() {
            info!("No pet owners found");
            return Err(ServiceError::none_found(EntityKind::PetOwner));
        }
        Ok(owners)
    }

    /// Replace every mutable field of an existing owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no owner has this id.
    pub async fn update(
        &self,
        id: PetOwnerId,
        details: NewPetOwner,
    ) -> Result<PetOwner, ServiceError> {
        let mut owner = self.get_by_id(id).await?;
        owner.apply(details);

        match self.owners.update(&owner).await {
            Ok(updated) => {
                info!(owner_id = %id, "Pet owner updated");
                Ok(updated)
            }
            Err(RepositoryError::NotFound) => {
                info!(owner_id = %id, "Pet owner vanished during update");
                Err(ServiceError::not_found(EntityKind::PetOwner, id.as_i32()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an owner together with all of their dogs.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no owner has this id.
    pub async fn delete(&self, id: PetOwnerId) -> Result<(), ServiceError> {
        if !self.owners.delete_by_id(id).await? {
            info!(owner_id = %id, "Delete failed: pet owner not found");
            return Err(ServiceError::not_found(EntityKind::PetOwner, id.as_i32()));
        }
        info!(owner_id = %id, "Pet owner deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pet_city_core::{Email, PersonName, PhoneNumber};

    use super::*;
    use crate::db::InMemoryStore;

    fn details(first: &str, phone: &str) -> NewPetOwner {
        NewPetOwner {
            firstname: PersonName::parse(first).unwrap(),
            lastname: PersonName::parse("Georgiou").unwrap(),
            phone_number: PhoneNumber::parse(phone).unwrap(),
            email: Email::parse("georgiou@example.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_owner_is_not_found() {
        let store = InMemoryStore::new();
        let service = PetOwnerService::new(&store);

        let err = service.get_by_id(PetOwnerId::new(42)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                kind: EntityKind::PetOwner,
                id: Some(42)
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_list_is_not_found() {
        let store = InMemoryStore::new();
        let service = PetOwnerService::new(&store);

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { id: None, .. }));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = InMemoryStore::new();
        let service = PetOwnerService::new(&store);
        let created = service.create(&details("Maria", "2101111111")).await.unwrap();

        let updated = service
            .update(created.id, details("Marina", "2102222222"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.firstname.as_str(), "Marina");
        assert_eq!(updated.phone_number.as_str(), "2102222222");
        assert_eq!(
            service.get_by_id(created.id).await.unwrap().firstname.as_str(),
            "Marina"
        );
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = InMemoryStore::new();
        let service = PetOwnerService::new(&store);
        let created = service.create(&details("Maria", "2101111111")).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(
            service
                .delete(created.id)
                .await
                .unwrap_err()
                .is_not_found(EntityKind::PetOwner)
        );
    }
}
