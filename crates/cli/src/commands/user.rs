//! Login account management.
//!
//! Accounts created here obey the same rules as the registration form.

use pet_city_core::Email;
use pet_city_web::db::UserRepository;
use pet_city_web::services::{AuthService, RegistrationForm, RegistrationValidator};

use super::{CliError, connect};

/// Create a login account.
///
/// # Errors
///
/// Returns `CliError::Invalid` listing every rule the email or password
/// breaks (including an email that is already registered).
pub async fn create(email: &str, password: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    let users = UserRepository::new(pool);
    let auth = AuthService::new(&users);

    let form = RegistrationForm {
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: password.to_owned(),
    };
    let errors = RegistrationValidator::new(&auth).validate(&form).await?;
    if !errors.is_empty() {
        let reasons: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        return Err(CliError::Invalid(reasons.join("; ")));
    }

    let email = Email::parse(email).map_err(|e| CliError::Invalid(format!("email: {e}")))?;
    let user = auth.register(&email, password).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "User created");
    Ok(())
}
