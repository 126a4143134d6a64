//! Sample data for local development.
//!
//! Inserts a handful of owners with dogs. Running it twice inserts the
//! records twice; owners have no natural key to deduplicate on.

use pet_city_core::{DogAge, DogName, Email, PersonName, PhoneNumber};
use pet_city_web::db::PgStores;
use pet_city_web::models::{NewDog, NewPetOwner};
use pet_city_web::services::{DogService, PetOwnerService};

use super::{CliError, connect};

/// `(firstname, lastname, phone, email, [(dog name, age)])`
type SampleOwner = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [(&'static str, i32)],
);

const SAMPLES: &[SampleOwner] = &[
    (
        "Eleni",
        "Papadaki",
        "6971234567",
        "eleni.papadaki@example.com",
        &[("Argos", 7), ("Luna", 2)],
    ),
    (
        "Nikos",
        "Georgiou",
        "6987654321",
        "nikos.georgiou@example.com",
        &[("Max", 4)],
    ),
    (
        "Maria",
        "Konstantinou",
        "2101234567",
        "maria.k@example.com",
        &[],
    ),
];

/// Insert the sample owners and dogs.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    let stores = PgStores::new(&pool);
    let owners = PetOwnerService::new(&stores.owners);
    let dogs = DogService::new(&stores.dogs, &stores.owners);

    let mut dog_count = 0usize;
    for (firstname, lastname, phone, email, pets) in SAMPLES {
        let owner = owners.create(&sample_owner(firstname, lastname, phone, email)?).await?;

        for (name, age) in *pets {
            dogs.create(owner.id, &sample_dog(name, *age)?).await?;
            dog_count += 1;
        }
    }

    tracing::info!(owners = SAMPLES.len(), dogs = dog_count, "Seed complete");
    Ok(())
}

fn sample_owner(
    firstname: &str,
    lastname: &str,
    phone: &str,
    email: &str,
) -> Result<NewPetOwner, CliError> {
    Ok(NewPetOwner {
        firstname: PersonName::parse(firstname).map_err(invalid)?,
        lastname: PersonName::parse(lastname).map_err(invalid)?,
        phone_number: PhoneNumber::parse(phone).map_err(invalid)?,
        email: Email::parse(email).map_err(invalid)?,
    })
}

fn sample_dog(name: &str, age: i32) -> Result<NewDog, CliError> {
    Ok(NewDog {
        name: DogName::parse(name).map_err(invalid)?,
        age: DogAge::new(age).map_err(invalid)?,
    })
}

#[allow(clippy::needless_pass_by_value)]
fn invalid(e: impl std::fmt::Display) -> CliError {
    CliError::Invalid(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_valid() {
        for (firstname, lastname, phone, email, pets) in SAMPLES {
            assert!(sample_owner(firstname, lastname, phone, email).is_ok());
            for (name, age) in *pets {
                assert!(sample_dog(name, *age).is_ok());
            }
        }
    }
}
