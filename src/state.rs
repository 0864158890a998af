//! Shared application state for all routes.

use crate::auth::CredentialStore;
use crate::config::{Settings, StorageBackend};
use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::repository::Repositories;
use crate::service::Services;
use crate::store;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub credentials: Arc<CredentialStore>,
    /// Present for the PostgreSQL backend; used by the readiness probe.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// State over the in-memory backend with the accounts from `settings`.
    pub fn in_memory(settings: &Settings) -> Self {
        AppState {
            services: Services::new(&Repositories::in_memory()),
            credentials: Arc::new(CredentialStore::new(&settings.accounts)),
            pool: None,
        }
    }

    /// State over PostgreSQL. Migrations must already be applied to `pool`.
    pub fn postgres(pool: PgPool, settings: &Settings) -> Self {
        AppState {
            services: Services::new(&Repositories::postgres(pool.clone(), &settings.schema)),
            credentials: Arc::new(CredentialStore::new(&settings.accounts)),
            pool: Some(pool),
        }
    }

    /// Build state for the configured backend, connecting and migrating when needed.
    pub async fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        match settings.storage {
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage; data is lost on restart");
                Ok(Self::in_memory(settings))
            }
            StorageBackend::Postgres => {
                let pool = store::connect(settings).await?;
                apply_migrations(&pool, &settings.schema).await?;
                Ok(Self::postgres(pool, settings))
            }
        }
    }
}
