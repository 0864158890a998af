//! Database bootstrap: create the target database if missing and open the pool.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Schema-qualified table name, e.g. `"school"."teachers"`.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Connection options for the database named in `database_url`.
fn parse_url(database_url: &str) -> Result<PgConnectOptions, ConfigError> {
    PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::InvalidValue {
        key: "DATABASE_URL",
        reason: e.to_string(),
    })
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// target database name when it is one that may need creating.
fn maintenance_target(options: &PgConnectOptions) -> Option<(PgConnectOptions, String)> {
    let name = options.get_database()?.trim();
    if name.is_empty() || name == "postgres" {
        return None;
    }
    Some((options.clone().database("postgres"), name.to_string()))
}

/// Create the database named in `database_url` if it does not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let options = parse_url(database_url)?;
    let Some((maintenance, name)) = maintenance_target(&options) else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = maintenance.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Open the connection pool described by `settings`, creating the database first if needed.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    ensure_database_exists(&settings.database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(parse_url(&settings.database_url)?)
        .await?;
    Ok(pool)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
