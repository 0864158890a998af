//! Load settings from environment variables (after `.env`, if the binary loaded one).

use crate::auth::Role;
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::collections::HashMap;

/// Read settings from the process environment and validate them.
pub fn from_env() -> Result<Settings, ConfigError> {
    from_vars(&std::env::vars().collect())
}

/// Build settings from a variable map. Unset keys fall back to `Settings::default()`.
pub fn from_vars(vars: &HashMap<String, String>) -> Result<Settings, ConfigError> {
    let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
    let defaults = Settings::default();

    let storage = match get("STORAGE_BACKEND") {
        Some(v) => v.parse()?,
        None => defaults.storage,
    };
    let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
            key: "DATABASE_MAX_CONNECTIONS",
            reason: format!("'{}' is not a number", v),
        })?,
        None => defaults.max_connections,
    };
    let body_limit = match get("REQUEST_BODY_LIMIT") {
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
            key: "REQUEST_BODY_LIMIT",
            reason: format!("'{}' is not a number", v),
        })?,
        None => defaults.body_limit,
    };

    let account = |prefix: &str, role: Role, fallback: &AccountConfig| AccountConfig {
        username: get(&format!("{}_USERNAME", prefix))
            .map(str::to_string)
            .unwrap_or_else(|| fallback.username.clone()),
        password: vars
            .get(&format!("{}_PASSWORD", prefix))
            .cloned()
            .unwrap_or_else(|| fallback.password.clone()),
        role,
    };
    let default_admin = defaults.accounts.iter().find(|a| a.role == Role::Admin);
    let default_user = defaults.accounts.iter().find(|a| a.role == Role::User);
    let mut accounts = Vec::new();
    if let Some(a) = default_admin {
        accounts.push(account("ADMIN", Role::Admin, a));
    }
    if let Some(u) = default_user {
        accounts.push(account("USER", Role::User, u));
    }

    let settings = Settings {
        bind_addr: get("BIND_ADDR").map(str::to_string).unwrap_or(defaults.bind_addr),
        storage,
        database_url: get("DATABASE_URL").map(str::to_string).unwrap_or(defaults.database_url),
        schema: get("SCHOOL_SCHEMA").map(str::to_string).unwrap_or(defaults.schema),
        max_connections,
        body_limit,
        accounts,
    };
    validate(&settings)?;
    Ok(settings)
}
