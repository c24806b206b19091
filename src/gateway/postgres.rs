//! PostgreSQL gateway over a `PgPool`.

use crate::error::AppError;
use crate::gateway::PersonGateway;
use crate::mapping::PersonTable;
use crate::model::Person;
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::PgPool;

pub struct PgPersonGateway {
    pool: PgPool,
    select_all_sql: String,
    insert_sql: String,
    update_sql: String,
}

impl PgPersonGateway {
    /// Statement text is rendered once here from the table mapping.
    pub fn new(pool: PgPool, table: &PersonTable) -> Self {
        PgPersonGateway {
            select_all_sql: table.select_all_sql(),
            insert_sql: table.insert_sql(),
            update_sql: table.update_sql(),
            pool,
        }
    }

    async fn insert(&self, conn: &mut sqlx::PgConnection, person: &Person) -> Result<Person, AppError> {
        tracing::debug!(sql = %self.insert_sql, "query");
        let row = bind_writable(sqlx::query_as(&self.insert_sql), person)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }
}

/// Bind the writable columns in `WRITABLE_COLUMNS` order.
fn bind_writable<'q>(
    q: QueryAs<'q, Postgres, Person, PgArguments>,
    person: &'q Person,
) -> QueryAs<'q, Postgres, Person, PgArguments> {
    q.bind(person.firstname.as_deref())
        .bind(person.lastname.as_deref())
        .bind(person.email.as_deref())
        .bind(person.password.as_deref())
        .bind(person.tutor)
}

#[async_trait]
impl PersonGateway for PgPersonGateway {
    async fn list_all(&self) -> Result<Vec<Person>, AppError> {
        tracing::debug!(sql = %self.select_all_sql, "query");
        let rows = sqlx::query_as::<_, Person>(&self.select_all_sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn save(&self, person: Person) -> Result<Person, AppError> {
        let mut tx = self.pool.begin().await?;
        let saved = match person.id {
            None => self.insert(&mut tx, &person).await?,
            Some(id) => {
                tracing::debug!(sql = %self.update_sql, id, "query (tx)");
                let updated = bind_writable(sqlx::query_as(&self.update_sql), &person)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
                match updated {
                    Some(row) => row,
                    None => {
                        tracing::warn!(id, "no person with this id; inserting under a new id");
                        self.insert(&mut tx, &person).await?
                    }
                }
            }
        };
        tx.commit().await?;
        Ok(saved)
    }
}
