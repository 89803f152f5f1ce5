//! In-process store backed by an ordered map.

use super::{DataStore, Entity, ReadinessProbe};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Rows<M> {
    by_id: BTreeMap<i64, M>,
    /// `None` once the id space is used up.
    next_id: Option<i64>,
}

pub struct MemoryStore<M> {
    rows: RwLock<Rows<M>>,
}

impl<M: Entity> MemoryStore<M> {
    pub fn new() -> Self {
        Self::with_seed(Vec::new())
    }

    /// Start with `seed` stored under its own ids. New ids continue after the largest seeded id.
    pub fn with_seed(seed: impl IntoIterator<Item = M>) -> Self {
        let by_id: BTreeMap<i64, M> = seed.into_iter().map(|m| (m.id(), m)).collect();
        let next_id = match by_id.keys().next_back() {
            Some(last) => last.checked_add(1).map(|id| id.max(1)),
            None => Some(1),
        };
        MemoryStore {
            rows: RwLock::new(Rows { by_id, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.by_id.is_empty()
    }
}

impl<M: Entity> Default for MemoryStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: Entity> DataStore<M> for MemoryStore<M> {
    async fn all(&self) -> Result<Vec<M>, StoreError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn insert(&self, mut model: M) -> Result<M, StoreError> {
        let mut rows = self.rows.write().await;
        let id = rows
            .next_id
            .ok_or_else(|| StoreError::Backend("memory store ids exhausted".into()))?;
        rows.next_id = id.checked_add(1);
        model.set_id(id);
        rows.by_id.insert(id, model.clone());
        tracing::debug!(id, "memory store insert");
        Ok(model)
    }

    async fn save(&self, model: &M) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .by_id
            .get_mut(&model.id())
            .ok_or(StoreError::Missing(model.id()))?;
        *slot = model.clone();
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<(), StoreError> {
        self.rows
            .write()
            .await
            .by_id
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::Missing(id))
    }
}

#[async_trait]
impl<M: Entity> ReadinessProbe for MemoryStore<M> {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
