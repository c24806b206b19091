//! Startup DDL: target database, schema and `person` table. Every step is idempotent.

use crate::error::{AppError, ConfigError};
use crate::mapping::PersonTable;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Options for the `postgres` maintenance database on the same server, and the target database name
/// (`None` when the URL names no database).
pub fn maintenance_target(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = maintenance_target(database_url)?;
    let db_name = match db_name {
        Some(name) if !name.is_empty() && name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn = admin.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Create the schema (unless `public`) and the `person` table if missing.
pub async fn ensure_person_table(pool: &PgPool, table: &PersonTable) -> Result<(), AppError> {
    if table.schema() != "public" {
        sqlx::query(&table.create_schema_sql()).execute(pool).await?;
    }
    sqlx::query(&table.create_table_sql()).execute(pool).await?;
    tracing::info!(table = %table.qualified(), "person table ready");
    Ok(())
}
