//! Dog domain types.

use chrono::{DateTime, Utc};

use pet_city_core::{DogAge, DogId, DogName, PetOwnerId};

/// A dog, always belonging to exactly one owner.
#[derive(Debug, Clone)]
pub struct Dog {
    pub id: DogId,
    pub name: DogName,
    pub age: DogAge,
    pub owner_id: PetOwnerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dog {
    /// Overwrite name and age. The owner never changes.
    pub fn apply(&mut self, details: NewDog) {
        self.name = details.name;
        self.age = details.age;
    }
}

/// Validated input for creating or updating a dog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub name: DogName,
    pub age: DogAge,
}
