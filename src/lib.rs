//! People API: a person persistence service with a two-route REST surface over PostgreSQL.

pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod mapping;
pub mod migration;
pub mod model;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use gateway::{PersonGateway, PgPersonGateway};
pub use mapping::PersonTable;
pub use migration::{ensure_database_exists, ensure_person_table};
pub use model::Person;
pub use routes::{app, person_routes};
pub use state::AppState;
