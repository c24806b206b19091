//! Persistence gateway: the only data access the HTTP surface performs.

pub mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgPersonGateway;

use crate::error::AppError;
use crate::model::Person;
use async_trait::async_trait;

#[async_trait]
pub trait PersonGateway: Send + Sync {
    /// Every stored person, in storage order.
    async fn list_all(&self) -> Result<Vec<Person>, AppError>;

    /// Insert when `person.id` is absent, otherwise overwrite the row with that id.
    /// Returns the stored row, including the assigned id.
    async fn save(&self, person: Person) -> Result<Person, AppError>;
}
