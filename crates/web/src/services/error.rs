//! Service-layer error types.

use std::fmt;

use thiserror::Error;

use crate::db::RepositoryError;

/// The kind of record a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    PetOwner,
    Dog,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PetOwner => "Pet owner",
            Self::Dog => "Dog",
        })
    }
}

/// Errors returned by the owner and dog services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No row matched. `id` is `None` when a listing came back empty.
    #[error("{}", not_found_message(.kind, .id))]
    NotFound { kind: EntityKind, id: Option<i32> },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub(crate) const fn not_found(kind: EntityKind, id: i32) -> Self {
        Self::NotFound { kind, id: Some(id) }
    }

    pub(crate) const fn none_found(kind: EntityKind) -> Self {
        Self::NotFound { kind, id: None }
    }

    /// Whether this is a not-found error for `kind`.
    #[must_use]
    pub fn is_not_found(&self, kind: EntityKind) -> bool {
        matches!(self, Self::NotFound { kind: k, .. } if *k == kind)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn not_found_message(kind: &EntityKind, id: &Option<i32>) -> String {
    match (*kind, *id) {
        (kind, Some(id)) => format!("{kind} with id {id} does not exist"),
        (EntityKind::PetOwner, None) => "No pet owners found".to_owned(),
        (EntityKind::Dog, None) => "No dogs found".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            ServiceError::not_found(EntityKind::PetOwner, 4).to_string(),
            "Pet owner with id 4 does not exist"
        );
        assert_eq!(
            ServiceError::none_found(EntityKind::PetOwner).to_string(),
            "No pet owners found"
        );
        assert_eq!(
            ServiceError::none_found(EntityKind::Dog).to_string(),
            "No dogs found"
        );
    }

    #[test]
    fn test_is_not_found_checks_kind() {
        let err = ServiceError::not_found(EntityKind::Dog, 1);
        assert!(err.is_not_found(EntityKind::Dog));
        assert!(!err.is_not_found(EntityKind::PetOwner));
    }
}
