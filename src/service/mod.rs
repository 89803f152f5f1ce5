//! Generic CRUD service: the operation contract shared by the server-side service and the HTTP client.

mod crud;
pub use crud::{CrudService, ServiceOptions};

use crate::response::ServiceResponse;
use async_trait::async_trait;

/// CRUD operations over one model, expressed through its read (`G`), add (`A`) and update (`U`) shapes.
///
/// Every operation answers with an envelope; failures never surface as `Err`.
#[async_trait]
pub trait GenericService<G, A, U>: Send + Sync {
    async fn get_all(&self) -> ServiceResponse<Vec<G>>;

    async fn get(&self, id: i64) -> ServiceResponse<G>;

    /// Returns the remaining instances.
    async fn delete(&self, id: i64) -> ServiceResponse<Vec<G>>;

    async fn add(&self, dto: A) -> ServiceResponse<G>;

    /// Like [`GenericService::add`], but answers `AlreadyExists` when an instance already holds the
    /// DTO's value of `unique_field`.
    async fn add_unique(&self, dto: A, unique_field: &str) -> ServiceResponse<G>;

    async fn update(&self, dto: U, id: i64) -> ServiceResponse<G>;

    /// Like [`GenericService::update`], but answers `AlreadyExists` when a different instance
    /// already holds the DTO's value of `unique_field`.
    async fn update_unique(&self, dto: U, id: i64, unique_field: &str) -> ServiceResponse<G>;
}
