//! Pet owner domain types.

use chrono::{DateTime, Utc};

use pet_city_core::{Email, PersonName, PetOwnerId, PhoneNumber};

/// A person who owns zero or more dogs.
#[derive(Debug, Clone)]
pub struct PetOwner {
    pub id: PetOwnerId,
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub phone_number: PhoneNumber,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PetOwner {
    /// "Firstname Lastname", for page headings.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// Overwrite every mutable field with the values from `details`.
    ///
    /// Dogs are not part of the owner row, so they are untouched.
    pub fn apply(&mut self, details: NewPetOwner) {
        self.firstname = details.firstname;
        self.lastname = details.lastname;
        self.phone_number = details.phone_number;
        self.email = details.email;
    }
}

/// Validated input for creating or updating a pet owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPetOwner {
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub phone_number: PhoneNumber,
    pub email: Email,
}
