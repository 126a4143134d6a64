//! Authentication service.
//!
//! Password registration and login against the user store. Passwords are
//! stored as Argon2id PHC strings.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use pet_city_core::Email;

use crate::db::{RepositoryError, UserStore};
use crate::models::User;

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Register a new user with email and password.
    ///
    /// Input is expected to have passed [`RegistrationValidator`](super::validation::RegistrationValidator).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, email: &Email, password: &str) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check a username (email) and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed or
    /// unknown, or the password does not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Whether an account already uses this email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn is_email_taken(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.users.email_exists(email).await?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        let email = Email::parse("vet@example.com").unwrap();
        let user = auth.register(&email, "woof").await.unwrap();

        let logged_in = auth.authenticate("vet@example.com", "woof").await.unwrap();
        assert_eq!(logged_in.id, user.id);

        for (email, password) in [
            ("vet@example.com", "meow"),
            ("nobody@example.com", "woof"),
            ("not-an-email", "woof"),
        ] {
            assert!(matches!(
                auth.authenticate(email, password).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let store = InMemoryStore::new();
        let auth = AuthService::new(&store);
        let email = Email::parse("vet@example.com").unwrap();
        auth.register(&email, "woof").await.unwrap();

        assert!(auth.is_email_taken("vet@example.com").await.unwrap());
        assert!(matches!(
            auth.register(&email, "bark").await,
            Err(AuthError::UserAlreadyExists)
        ));
    }
}
