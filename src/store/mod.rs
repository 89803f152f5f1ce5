//! Data-store abstraction: all instances of a model, insert, save and remove.
//!
//! Each mutating call commits on its own. Lookup-then-mutate sequences built on top of this
//! trait (delete, update, uniqueness checks) are not atomic against concurrent requests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::StoreError;
use async_trait::async_trait;

/// A persisted model with a store-assigned integer identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);
}

#[async_trait]
pub trait DataStore<M: Entity>: Send + Sync {
    /// Every persisted instance, in id order.
    async fn all(&self) -> Result<Vec<M>, StoreError>;

    /// Persist a new instance. The store assigns the id; the returned value carries it.
    async fn insert(&self, model: M) -> Result<M, StoreError>;

    /// Persist an existing instance modified in place.
    async fn save(&self, model: &M) -> Result<(), StoreError>;

    async fn remove(&self, id: i64) -> Result<(), StoreError>;
}

/// Backend health check used by the readiness route.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Probe for backends with nothing to check.
pub struct AlwaysReady;

#[async_trait]
impl ReadinessProbe for AlwaysReady {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl ReadinessProbe for sqlx::PgPool {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(self).await?;
        Ok(())
    }
}
