//! User domain types.

use chrono::{DateTime, Utc};

use pet_city_core::{Email, UserId};

/// A registered account (domain type).
///
/// The password hash never leaves the store layer except through
/// `UserStore::get_password_hash`.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
