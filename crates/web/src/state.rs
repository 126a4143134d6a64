//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db::{DogStore, InMemoryStore, PetOwnerStore, PgStores, UserStore};
use crate::services::AuthService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the storage backends.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    users: Arc<dyn UserStore>,
    owners: Arc<dyn PetOwnerStore>,
    dogs: Arc<dyn DogStore>,
    pool: Option<PgPool>,
}

impl AppState {
    /// State backed by `PostgreSQL` repositories.
    #[must_use]
    pub fn with_postgres(config: AppConfig, pool: PgPool) -> Self {
        let stores = PgStores::new(&pool);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users: Arc::new(stores.users),
                owners: Arc::new(stores.owners),
                dogs: Arc::new(stores.dogs),
                pool: Some(pool),
            }),
        }
    }

    /// State backed by a fresh [`InMemoryStore`].
    #[must_use]
    pub fn with_memory(config: AppConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users: store.clone(),
                owners: store.clone(),
                dogs: store,
                pool: None,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    #[must_use]
    pub fn owners(&self) -> &dyn PetOwnerStore {
        self.inner.owners.as_ref()
    }

    #[must_use]
    pub fn dogs(&self) -> &dyn DogStore {
        self.inner.dogs.as_ref()
    }

    /// The database pool, if the postgres backend is in use.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Authentication service over the user store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.users())
    }
}
