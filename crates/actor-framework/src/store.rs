//! # Entity Stores
//!
//! The persistence seam behind every [`ResourceActor`](crate::ResourceActor). The actor
//! owns its store exclusively, so implementations need no locking; they only have to
//! report whether a write went through.

use crate::entity::ActorEntity;
use std::collections::HashMap;

/// A storage write that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("save rejected for {0}")]
    SaveRejected(String),
    #[error("remove rejected for {0}")]
    RemoveRejected(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Backing storage for one record family.
///
/// Reads are infallible views over whatever was last written successfully.
/// Writes either apply completely or return an error and leave the store as it was.
pub trait EntityStore<T: ActorEntity>: Send + 'static {
    /// Returns a copy of the stored record.
    fn load(&self, id: &T::Id) -> Option<T>;

    fn contains(&self, id: &T::Id) -> bool {
        self.load(id).is_some()
    }

    /// Inserts or replaces the record stored under `id`.
    fn save(&mut self, id: T::Id, entity: T) -> Result<(), StoreError>;

    /// Removes the record stored under `id`. Removing a missing record is not an error.
    fn remove(&mut self, id: &T::Id) -> Result<(), StoreError>;

    /// Copies of every stored record, in no particular order.
    fn all(&self) -> Vec<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store backed by a `HashMap`. Writes never fail.
#[derive(Debug)]
pub struct MemoryStore<T: ActorEntity> {
    items: HashMap<T::Id, T>,
}

impl<T: ActorEntity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<T: ActorEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> EntityStore<T> for MemoryStore<T> {
    fn load(&self, id: &T::Id) -> Option<T> {
        self.items.get(id).cloned()
    }

    fn contains(&self, id: &T::Id) -> bool {
        self.items.contains_key(id)
    }

    fn save(&mut self, id: T::Id, entity: T) -> Result<(), StoreError> {
        self.items.insert(id, entity);
        Ok(())
    }

    fn remove(&mut self, id: &T::Id) -> Result<(), StoreError> {
        self.items.remove(id);
        Ok(())
    }

    fn all(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
