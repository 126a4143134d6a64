//! Dog service.

use tracing::info;

use pet_city_core::{DogId, PetOwnerId};

use super::error::{EntityKind, ServiceError};
use super::owners::PetOwnerService;
use crate::db::{DogStore, PetOwnerStore, RepositoryError};
use crate::models::{Dog, NewDog};

/// Dog operations. Owner existence is checked through [`PetOwnerService`].
pub struct DogService<'a> {
    dogs: &'a dyn DogStore,
    owners: PetOwnerService<'a>,
}

impl<'a> DogService<'a> {
    #[must_use]
    pub const fn new(dogs: &'a dyn DogStore, owners: &'a dyn PetOwnerStore) -> Self {
        Self {
            dogs,
            owners: PetOwnerService::new(owners),
        }
    }

    /// Create a dog under an existing owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` (kind `PetOwner`) if the owner does not exist.
    pub async fn create(&self, owner_id: PetOwnerId, details: &NewDog) -> Result<Dog, ServiceError> {
        let owner = self.owners.get_by_id(owner_id).await?;

        match self.dogs.insert(owner.id, details).await {
            Ok(dog) => {
                info!(dog_id = %dog.id, owner_id = %owner_id, "Dog created");
                Ok(dog)
            }
            // Owner deleted between the check and the insert.
            Err(RepositoryError::NotFound) => {
                info!(owner_id = %owner_id, "Pet owner not found while creating dog");
                Err(ServiceError::not_found(EntityKind::PetOwner, owner_id.as_i32()))
            }
            Err(e) => {
                info!(error = %e, "Exception error in creating a dog");
                Err(e.into())
            }
        }
    }

    /// Get a dog by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no dog has this id.
    pub async fn get_by_id(&self, id: DogId) -> Result<Dog, ServiceError> {
        self.dogs.find_by_id(id).await?.ok_or_else(|| {
            info!(dog_id = %id, "Dog not found");
            ServiceError::not_found(EntityKind::Dog, id.as_i32())
        })
    }

    /// List the dogs of an owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` with kind `PetOwner` if the owner is
    /// missing, or kind `Dog` without an id if the owner has no dogs.
    pub async fn list_by_owner(&self, owner_id: PetOwnerId) -> Result<Vec<Dog>, ServiceError> {
        let owner = self.owners.get_by_id(owner_id).await?;

        let dogs = self.dogs.find_by_owner(owner.id).await?;
        if dogs.is_empty() {
            info!(owner_id = %owner_id, "Pet owner has no dogs");
            return Err(ServiceError::none_found(EntityKind::Dog));
        }
        Ok(dogs)
    }

    /// Replace a dog's name and age.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no dog has this id.
    pub async fn update(&self, id: DogId, details: NewDog) -> Result<Dog, ServiceError> {
        let mut dog = self.get_by_id(id).await?;
        dog.apply(details);

        match self.dogs.update(&dog).await {
            Ok(updated) => {
                info!(dog_id = %id, "Dog updated");
                Ok(updated)
            }
            Err(RepositoryError::NotFound) => {
                info!(dog_id = %id, "Update exception error: dog vanished");
                Err(ServiceError::not_found(EntityKind::Dog, id.as_i32()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a dog.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no dog has this id.
    pub async fn delete(&self, id: DogId) -> Result<(), ServiceError> {
        if !self.dogs.delete_by_id(id).await? {
            info!(dog_id = %id, "Delete failed: dog not found");
            return Err(ServiceError::not_found(EntityKind::Dog, id.as_i32()));
        }
        info!(dog_id = %id, "Dog deleted");
        Ok(())
    }
}
