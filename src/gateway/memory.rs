//! In-process gateway for router tests. Mirrors the PostgreSQL save semantics.

use crate::error::AppError;
use crate::gateway::PersonGateway;
use crate::model::Person;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct MemoryGateway {
    rows: Mutex<Vec<Person>>,
    offline: AtomicBool,
}

impl MemoryGateway {
    /// Make every call fail as if the database were unreachable.
    pub(crate) fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::from(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl PersonGateway for MemoryGateway {
    async fn list_all(&self) -> Result<Vec<Person>, AppError> {
        self.check_online()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn save(&self, person: Person) -> Result<Person, AppError> {
        self.check_online()?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|r| r.id.is_some() && r.id == person.id) {
            *existing = person.clone();
            return Ok(person);
        }
        let next = rows.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        let saved = person.with_id(next);
        rows.push(saved.clone());
        Ok(saved)
    }
}
