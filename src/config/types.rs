//! Settings types. Values come from the environment; see `loader`.

use crate::auth::Role;
use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/school";
pub const DEFAULT_SCHEMA: &str = "school";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Where entities are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: "STORAGE_BACKEND",
                reason: format!("'{}' (expected postgres or memory)", s),
            }),
        }
    }
}

/// One login account. The password is plaintext only until `auth::CredentialStore` hashes it.
#[derive(Clone)]
pub struct AccountConfig {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub storage: StorageBackend,
    pub database_url: String,
    /// PostgreSQL schema holding the teachers/students/courses tables.
    pub schema: String,
    pub max_connections: u32,
    pub body_limit: usize,
    pub accounts: Vec<AccountConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            storage: StorageBackend::Postgres,
            database_url: DEFAULT_DATABASE_URL.into(),
            schema: DEFAULT_SCHEMA.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
            accounts: vec![
                AccountConfig {
                    username: "admin".into(),
                    password: "admin123".into(),
                    role: Role::Admin,
                },
                AccountConfig {
                    username: "user".into(),
                    password: "user123".into(),
                    role: Role::User,
                },
            ],
        }
    }
}
