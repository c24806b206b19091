//! The `Person` entity.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the `person` table.
///
/// Identity is the storage-assigned `id`: two persons are equal only when both
/// carry the same id. A person that has not been saved yet (`id == None`) is
/// equal to nothing, itself included, so `Person` is not `Eq`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Absent or `null` on input reads as `false`.
    #[serde(default, deserialize_with = "null_as_false")]
    pub tutor: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Person {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Same field values under a storage-assigned id.
    pub fn with_id(self, id: i32) -> Self {
        Person { id: Some(id), ..self }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
