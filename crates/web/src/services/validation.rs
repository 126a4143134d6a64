//! Form input and validation.
//!
//! Every validator collects all violations instead of stopping at the first,
//! so a re-rendered form can show each field's problem at once.

use std::fmt;

use serde::Deserialize;

use pet_city_core::{DogAge, DogName, Email, NameError, PersonName, PhoneNumber};

use super::auth::{AuthError, AuthService};
use crate::models::{Dog, NewDog, NewPetOwner, PetOwner};

/// Inclusive bounds for registration email and password length.
const CREDENTIAL_LENGTH: std::ops::RangeInclusive<usize> = 3..=32;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name, as in the HTML `name` attribute.
    pub field: &'static str,
    /// Machine-readable reason, e.g. `size` or `duplicate`.
    pub code: &'static str,
    /// Message shown next to the field.
    pub message: String,
}

/// Per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejected field.
    pub fn reject(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            code,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All messages recorded for `field`, in order.
    #[must_use]
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// All codes recorded for `field`, in order.
    #[must_use]
    pub fn codes(&self, field: &str) -> Vec<&'static str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.code)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Registration form data.
#[derive(Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// Validates registration input, including the email uniqueness lookup.
pub struct RegistrationValidator<'a> {
    auth: &'a AuthService<'a>,
}

impl<'a> RegistrationValidator<'a> {
    #[must_use]
    pub const fn new(auth: &'a AuthService<'a>) -> Self {
        Self { auth }
    }

    /// Check a registration form.
    ///
    /// | field | codes |
    /// |---|---|
    /// | `email` | `empty`, `size`, `format`, `duplicate` |
    /// | `password` | `empty`, `size` |
    /// | `confirm_password` | `confirmation` |
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the uniqueness lookup fails. Field
    /// violations are not errors; they are returned in the `FieldErrors`.
    pub async fn validate(&self, form: &RegistrationForm) -> Result<FieldErrors, AuthError> {
        let mut errors = FieldErrors::new();

        let email = form.email.trim();
        if email.is_empty() {
            errors.reject("email", "empty", "Email is required");
        }
        if !CREDENTIAL_LENGTH.contains(&email.chars().count()) {
            errors.reject("email", "size", "Email must be between 3 and 32 characters");
        }
        if !email.is_empty() && Email::parse(email).is_err() {
            errors.reject("email", "format", "Email address is not valid");
        }
        if !email.is_empty() && self.auth.is_email_taken(email).await? {
            errors.reject("email", "duplicate", "Someone already has that email");
        }

        if form.password.trim().is_empty() {
            errors.reject("password", "empty", "Password is required");
        }
        if !CREDENTIAL_LENGTH.contains(&form.password.chars().count()) {
            errors.reject(
                "password",
                "size",
                "Password must be between 3 and 32 characters",
            );
        }

        if form.password != form.confirm_password {
            errors.reject("confirm_password", "confirmation", "Passwords do not match");
        }

        Ok(errors)
    }
}

// =============================================================================
// Pet owners
// =============================================================================

/// Pet owner form data, used for both insert and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetOwnerForm {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
}

impl PetOwnerForm {
    /// Prefill the form from a stored owner.
    #[must_use]
    pub fn from_owner(owner: &PetOwner) -> Self {
        Self {
            firstname: owner.firstname.to_string(),
            lastname: owner.lastname.to_string(),
            phone_number: owner.phone_number.to_string(),
            email: owner.email.to_string(),
        }
    }

    /// Parse every field.
    ///
    /// # Errors
    ///
    /// Returns all field violations if any field is invalid.
    pub fn validate(&self) -> Result<NewPetOwner, FieldErrors> {
        let mut errors = FieldErrors::new();

        let firstname = person_name(&mut errors, "firstname", "First name", &self.firstname);
        let lastname = person_name(&mut errors, "lastname", "Last name", &self.lastname);

        let phone_number = PhoneNumber::parse(&self.phone_number)
            .map_err(|_| {
                errors.reject(
                    "phone_number",
                    "format",
                    format!("Phone number must be {} digits", PhoneNumber::DIGITS),
                );
            })
            .ok();

        let email = match Email::parse(&self.email) {
            Ok(email) => Some(email),
            Err(pet_city_core::EmailError::Empty) => {
                errors.reject("email", "empty", "Email is required");
                None
            }
            Err(_) => {
                errors.reject("email", "format", "Email address is not valid");
                None
            }
        };

        match (firstname, lastname, phone_number, email) {
            (Some(firstname), Some(lastname), Some(phone_number), Some(email))
                if errors.is_empty() =>
            {
                Ok(NewPetOwner {
                    firstname,
                    lastname,
                    phone_number,
                    email,
                })
            }
            _ => Err(errors),
        }
    }
}

fn person_name(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
) -> Option<PersonName> {
    PersonName::parse(value)
        .map_err(|e| errors.reject(field, name_code(&e), format!("{label} {e}")))
        .ok()
}

const fn name_code(e: &NameError) -> &'static str {
    match e {
        NameError::Blank => "empty",
        NameError::Length { .. } => "size",
    }
}

// =============================================================================
// Dogs
// =============================================================================

/// Dog form data, used for both create and update.
///
/// `age` stays a string so non-numeric input becomes a field error rather
/// than a form rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DogForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
}

impl DogForm {
    /// Prefill the form from a stored dog.
    #[must_use]
    pub fn from_dog(dog: &Dog) -> Self {
        Self {
            name: dog.name.to_string(),
            age: dog.age.to_string(),
        }
    }

    /// Parse every field.
    ///
    /// # Errors
    ///
    /// Returns all field violations if any field is invalid.
    pub fn validate(&self) -> Result<NewDog, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = DogName::parse(&self.name)
            .map_err(|e| errors.reject("name", name_code(&e), format!("Name {e}")))
            .ok();
        let age = DogAge::parse(&self.age)
            .map_err(|e| errors.reject("age", "range", e.to_string()))
            .ok();

        match (name, age) {
            (Some(name), Some(age)) => Ok(NewDog { name, age }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    fn registration(email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            email: email.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_valid_registration_has_no_errors() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        let errors = RegistrationValidator::new(&auth)
            .validate(&registration("vet@example.com", "woof", "woof"))
            .await
            .unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_registration_collects_every_violation() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        let errors = RegistrationValidator::new(&auth)
            .validate(&registration("", "", "x"))
            .await
            .unwrap();

        assert_eq!(errors.codes("email"), vec!["empty", "size"]);
        assert_eq!(errors.codes("password"), vec!["empty", "size"]);
        assert_eq!(errors.codes("confirm_password"), vec!["confirmation"]);
    }

    #[tokio::test]
    async fn test_registration_rejects_taken_email() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(&Email::parse("vet@example.com").unwrap(), "woof")
            .await
            .unwrap();

        let errors = RegistrationValidator::new(&auth)
            .validate(&registration("vet@example.com", "woof", "woof"))
            .await
            .unwrap();
        assert_eq!(errors.codes("email"), vec!["duplicate"]);
        assert_eq!(errors.messages("email"), vec!["Someone already has that email"]);
    }

    #[tokio::test]
    async fn test_registration_length_bounds() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        let validator = RegistrationValidator::new(&auth);

        let long_email = format!("{}@example.com", "a".repeat(21));
        let errors = validator
            .validate(&registration(&long_email, "ab", "ab"))
            .await
            .unwrap();
        assert_eq!(errors.codes("email"), vec!["size"]);
        assert_eq!(errors.codes("password"), vec!["size"]);

        let errors = validator
            .validate(&registration("a@b", "abc", "abd"))
            .await
            .unwrap();
        assert!(errors.codes("email").is_empty());
        assert!(errors.codes("password").is_empty());
        assert_eq!(errors.codes("confirm_password"), vec!["confirmation"]);
    }

    #[tokio::test]
    async fn test_registration_email_format() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        let validator = RegistrationValidator::new(&auth);

        let errors = validator
            .validate(&registration("abc", "woof", "woof"))
            .await
            .unwrap();
        assert_eq!(errors.codes("email"), vec!["format"]);

        let errors = validator
            .validate(&registration("a@", "woof", "woof"))
            .await
            .unwrap();
        assert_eq!(errors.codes("email"), vec!["size", "format"]);
        assert_eq!(
            errors.messages("email"),
            vec![
                "Email must be between 3 and 32 characters",
                "Email address is not valid"
            ]
        );
    }

    #[test]
    fn test_registration_form_debug_hides_passwords() {
        let form = registration("vet@example.com", "hunter22", "hunter22");
        assert!(!format!("{form:?}").contains("hunter22"));
    }

    #[test]
    fn test_owner_form_collects_errors() {
        let form = PetOwnerForm {
            firstname: "Al".to_owned(),
            lastname: "   ".to_owned(),
            phone_number: "123".to_owned(),
            email: "nope".to_owned(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.codes("firstname"), vec!["size"]);
        assert_eq!(errors.codes("lastname"), vec!["empty"]);
        assert_eq!(
            errors.messages("phone_number"),
            vec!["Phone number must be 10 digits"]
        );
        assert_eq!(errors.codes("email"), vec!["format"]);
        assert_eq!(errors.iter().count(), 4);
    }

    #[test]
    fn test_owner_form_valid() {
        let form = PetOwnerForm {
            firstname: " Eleni ".to_owned(),
            lastname: "Dimou".to_owned(),
            phone_number: "2310123456".to_owned(),
            email: "eleni@example.com".to_owned(),
        };

        let owner = form.validate().unwrap();
        assert_eq!(owner.firstname.as_str(), "Eleni");
    }

    #[test]
    fn test_dog_form_age_errors() {
        let form = DogForm {
            name: "Rex".to_owned(),
            age: "old".to_owned(),
        };
        assert_eq!(
            form.validate().unwrap_err().messages("age"),
            vec!["Age must be a whole number"]
        );

        let form = DogForm {
            name: "R".to_owned(),
            age: "33".to_owned(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.messages("age"), vec!["Age must not exceed 32"]);
        assert_eq!(errors.codes("name"), vec!["size"]);
    }
}
