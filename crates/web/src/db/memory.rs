//! Process-local storage backend.
//!
//! Implements every storage trait over `BTreeMap`s behind a single
//! `tokio::sync::RwLock`, with the same semantics as the `PostgreSQL`
//! schema: serial ids starting at 1, unique user emails, and dogs removed
//! together with their owner.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use pet_city_core::{DogId, Email, PetOwnerId, UserId};

use super::{DogStore, PetOwnerStore, RepositoryError, UserStore};
use crate::models::{Dog, NewDog, NewPetOwner, PetOwner, User};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, (User, String)>,
    owners: BTreeMap<i32, PetOwner>,
    dogs: BTreeMap<i32, Dog>,
    last_user_id: i32,
    last_owner_id: i32,
    last_dog_id: i32,
}

/// In-memory implementation of [`UserStore`], [`PetOwnerStore`] and [`DogStore`].
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, email: &Email, password_hash: &str) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|(u, _)| u.email == *email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        tables.last_user_id += 1;
        let user = User {
            id: UserId::new(tables.last_user_id),
            email: email.clone(),
            created_at: Utc::now(),
        };
        tables
            .users
            .insert(user.id.as_i32(), (user.clone(), password_hash.to_owned()));

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let email = email.trim();
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|(u, _)| u.email.as_str() == email))
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|(u, _)| u.email == *email)
            .cloned())
    }
}

#[async_trait]
impl PetOwnerStore for InMemoryStore {
    async fn insert(&self, owner: &NewPetOwner) -> Result<PetOwner, RepositoryError> {
        let mut tables = self.tables.write().await;

        tables.last_owner_id += 1;
        let now = Utc::now();
        let owner = PetOwner {
            id: PetOwnerId::new(tables.last_owner_id),
            firstname: owner.firstname.clone(),
            lastname: owner.lastname.clone(),
            phone_number: owner.phone_number.clone(),
            email: owner.email.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.owners.insert(owner.id.as_i32(), owner.clone());

        Ok(owner)
    }

    async fn find_by_id(&self, id: PetOwnerId) -> Result<Option<PetOwner>, RepositoryError> {
        Ok(self.tables.read().await.owners.get(&id.as_i32()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<PetOwner>, RepositoryError> {
        Ok(self.tables.read().await.owners.values().cloned().collect())
    }

    async fn update(&self, owner: &PetOwner) -> Result<PetOwner, RepositoryError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .owners
            .get_mut(&owner.id.as_i32())
            .ok_or(RepositoryError::NotFound)?;

        stored.firstname = owner.firstname.clone();
        stored.lastname = owner.lastname.clone();
        stored.phone_number = owner.phone_number.clone();
        stored.email = owner.email.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: PetOwnerId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.owners.remove(&id.as_i32()).is_none() {
            return Ok(false);
        }
        tables.dogs.retain(|_, dog| dog.owner_id != id);
        Ok(true)
    }
}

#[async_trait]
impl DogStore for InMemoryStore {
    async fn insert(&self, owner_id: PetOwnerId, dog: &NewDog) -> Result<Dog, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.owners.contains_key(&owner_id.as_i32()) {
            return Err(RepositoryError::NotFound);
        }

        tables.last_dog_id += 1;
        let now = Utc::now();
        let dog = Dog {
            id: DogId::new(tables.last_dog_id),
            name: dog.name.clone(),
            age: dog.age,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.dogs.insert(dog.id.as_i32(), dog.clone());

        Ok(dog)
    }

    async fn find_by_id(&self, id: DogId) -> Result<Option<Dog>, RepositoryError> {
        Ok(self.tables.read().await.dogs.get(&id.as_i32()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Dog>, RepositoryError> {
        Ok(self.tables.read().await.dogs.values().cloned().collect())
    }

    async fn find_by_owner(&self, owner_id: PetOwnerId) -> Result<Vec<Dog>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .dogs
            .values()
            .filter(|dog| dog.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, dog: &Dog) -> Result<Dog, RepositoryError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .dogs
            .get_mut(&dog.id.as_i32())
            .ok_or(RepositoryError::NotFound)?;

        stored.name = dog.name.clone();
        stored.age = dog.age;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: DogId) -> Result<bool, RepositoryError> {
        Ok(self.tables.write().await.dogs.remove(&id.as_i32()).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pet_city_core::{DogAge, DogName, PersonName, PhoneNumber};

    use super::*;

    fn owner(first: &str) -> NewPetOwner {
        NewPetOwner {
            firstname: PersonName::parse(first).unwrap(),
            lastname: PersonName::parse("Papadopoulos").unwrap(),
            phone_number: PhoneNumber::parse("6971234567").unwrap(),
            email: Email::parse("owner@example.com").unwrap(),
        }
    }

    fn dog(name: &str) -> NewDog {
        NewDog {
            name: DogName::parse(name).unwrap(),
            age: DogAge::new(3).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_serial_from_one() {
        let store = InMemoryStore::new();
        let a = PetOwnerStore::insert(&store, &owner("Anna")).await.unwrap();
        let b = PetOwnerStore::insert(&store, &owner("Babis")).await.unwrap();

        assert_eq!(a.id, PetOwnerId::new(1));
        assert_eq!(b.id, PetOwnerId::new(2));
    }

    #[tokio::test]
    async fn test_deleting_owner_cascades_to_dogs() {
        let store = InMemoryStore::new();
        let anna = PetOwnerStore::insert(&store, &owner("Anna")).await.unwrap();
        let babis = PetOwnerStore::insert(&store, &owner("Babis")).await.unwrap();
        DogStore::insert(&store, anna.id, &dog("Rex")).await.unwrap();
        DogStore::insert(&store, anna.id, &dog("Azor")).await.unwrap();
        let kept = DogStore::insert(&store, babis.id, &dog("Lucky")).await.unwrap();

        assert!(PetOwnerStore::delete_by_id(&store, anna.id).await.unwrap());

        let remaining: Vec<DogId> = DogStore::find_all(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(remaining, vec![kept.id]);
    }

    #[tokio::test]
    async fn test_dog_insert_requires_owner() {
        let store = InMemoryStore::new();
        let err = DogStore::insert(&store, PetOwnerId::new(9), &dog("Rex"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_duplicate_user_email_conflicts() {
        let store = InMemoryStore::new();
        let email = Email::parse("vet@example.com").unwrap();
        UserStore::create(&store, &email, "hash").await.unwrap();

        let err = UserStore::create(&store, &email, "hash").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(store.email_exists("vet@example.com").await.unwrap());
        assert!(!store.email_exists("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_owner_is_not_found() {
        let store = InMemoryStore::new();
        let mut ghost = PetOwnerStore::insert(&store, &owner("Anna")).await.unwrap();
        PetOwnerStore::delete_by_id(&store, ghost.id).await.unwrap();

        ghost.firstname = PersonName::parse("Eleni").unwrap();
        let err = PetOwnerStore::update(&store, &ghost).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
