//! School administration backend: REST API for teachers, students and courses.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{from_env, Settings, StorageBackend};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use repository::Repositories;
pub use routes::{app, common_routes, school_routes};
pub use service::Services;
pub use state::AppState;
pub use store::ensure_database_exists;
