//! Explicit mapping between `Person` and the `person` table: identifiers, statements, row decoding.

use crate::config::validate_identifier;
use crate::error::ConfigError;
use crate::model::Person;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

pub const TABLE: &str = "person";
pub const ID: &str = "id";

/// Every column in declaration order; `id` first.
pub const COLUMNS: [&str; 6] = [ID, "firstname", "lastname", "email", "password", "tutor"];

/// Columns written on insert and update, in bind order.
pub const WRITABLE_COLUMNS: [&str; 5] = ["firstname", "lastname", "email", "password", "tutor"];

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list(cols: &[&str]) -> String {
    cols.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// The `person` table inside one schema. Owns the text of every statement the gateway runs.
#[derive(Clone, Debug)]
pub struct PersonTable {
    schema: String,
}

impl PersonTable {
    pub fn new(schema: &str) -> Result<Self, ConfigError> {
        validate_identifier(schema)?;
        Ok(PersonTable {
            schema: schema.to_string(),
        })
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Full qualified table name.
    pub fn qualified(&self) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(TABLE))
    }

    pub fn create_schema_sql(&self) -> String {
        format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&self.schema))
    }

    pub fn create_table_sql(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                "id" SERIAL PRIMARY KEY,
                "firstname" TEXT,
                "lastname" TEXT,
                "email" TEXT,
                "password" TEXT,
                "tutor" BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
            self.qualified()
        )
    }

    pub fn select_all_sql(&self) -> String {
        format!("SELECT {} FROM {}", column_list(&COLUMNS), self.qualified())
    }

    /// Binds: firstname, lastname, email, password, tutor.
    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=WRITABLE_COLUMNS.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.qualified(),
            column_list(&WRITABLE_COLUMNS),
            placeholders,
            column_list(&COLUMNS)
        )
    }

    /// Binds: firstname, lastname, email, password, tutor, then id.
    pub fn update_sql(&self) -> String {
        let sets = WRITABLE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", quoted(c), i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.qualified(),
            sets,
            quoted(ID),
            WRITABLE_COLUMNS.len() + 1,
            column_list(&COLUMNS)
        )
    }
}

impl<'r> FromRow<'r, PgRow> for Person {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Person {
            id: Some(row.try_get::<i32, _>(ID)?),
            firstname: row.try_get::<Option<String>, _>("firstname")?,
            lastname: row.try_get::<Option<String>, _>("lastname")?,
            email: row.try_get::<Option<String>, _>("email")?,
            password: row.try_get::<Option<String>, _>("password")?,
            tutor: row.try_get::<bool, _>("tutor")?,
        })
    }
}
