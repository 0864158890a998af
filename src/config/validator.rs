//! Validate settings before the server starts.

use crate::config::types::Settings;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// Reject settings that would fail later at runtime (bad schema identifier, empty
/// credentials, duplicate usernames, zero-sized pool).
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$")
        .map_err(|e| ConfigError::Validation(format!("identifier pattern: {}", e)))?;
    if !ident.is_match(&settings.schema) {
        return Err(ConfigError::InvalidValue {
            key: "SCHOOL_SCHEMA",
            reason: format!("'{}' is not a valid identifier", settings.schema),
        });
    }
    if settings.max_connections == 0 {
        return Err(ConfigError::InvalidValue {
            key: "DATABASE_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    if settings.body_limit == 0 {
        return Err(ConfigError::InvalidValue {
            key: "REQUEST_BODY_LIMIT",
            reason: "must be at least 1".into(),
        });
    }
    if settings.accounts.is_empty() {
        return Err(ConfigError::Validation("at least one account is required".into()));
    }

    let mut seen = HashSet::new();
    for account in &settings.accounts {
        if account.username.is_empty() || account.username.contains(':') {
            return Err(ConfigError::Validation(format!(
                "{:?} username must be non-empty and contain no ':'",
                account.role
            )));
        }
        if account.password.is_empty() {
            return Err(ConfigError::Validation(format!(
                "password for '{}' must not be empty",
                account.username
            )));
        }
        if !seen.insert(account.username.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate username '{}'",
                account.username
            )));
        }
    }
    Ok(())
}
