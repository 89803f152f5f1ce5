//! Generic CRUD execution against a [`DataStore`].

use super::GenericService;
use crate::error::{AppError, FieldError};
use crate::field::{property, FieldValue, Fields};
use crate::mapper::{map_all, MergeInto};
use crate::response::{ServiceResponse, ServiceResponseCode};
use crate::store::{DataStore, Entity};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceOptions {
    /// Replace the message of `UnknownError` envelopes with a fixed text. The error is still logged.
    pub redact_errors: bool,
}

/// Server-side [`GenericService`] for model `M` with read, add and update shapes `G`, `A`, `U`.
pub struct CrudService<M, G, A, U> {
    store: Arc<dyn DataStore<M>>,
    options: ServiceOptions,
    _dtos: PhantomData<fn() -> (G, A, U)>,
}

impl<M, G, A, U> CrudService<M, G, A, U>
where
    M: Entity + Fields + From<A>,
    G: for<'a> From<&'a M> + Send + 'static,
    A: Fields + Send + 'static,
    U: Fields + MergeInto<M> + Send + 'static,
{
    pub fn new(store: Arc<dyn DataStore<M>>) -> Self {
        CrudService {
            store,
            options: ServiceOptions::default(),
            _dtos: PhantomData,
        }
    }

    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    async fn try_get_all(&self) -> Result<Vec<G>, AppError> {
        let models = self.store.all().await?;
        Ok(map_all(&models))
    }

    async fn try_get(&self, id: i64) -> Result<G, AppError> {
        let models = self.store.all().await?;
        let model = take_by_id(models, id)?;
        Ok(G::from(&model))
    }

    async fn try_delete(&self, id: i64) -> Result<Vec<G>, AppError> {
        let models = self.store.all().await?;
        let model = take_by_id(models, id)?;
        self.store.remove(model.id()).await?;
        self.try_get_all().await
    }

    async fn try_add(&self, dto: A) -> Result<G, AppError> {
        let stored = self.store.insert(M::from(dto)).await?;
        Ok(G::from(&stored))
    }

    async fn try_add_unique(&self, dto: A, unique_field: &str) -> Result<G, AppError> {
        let value = property(&dto, unique_field)?;
        let models = self.store.all().await?;
        if let Some(holder) = find_unique_holder(&models, unique_field, &value)? {
            return Err(AppError::Conflict(format!(
                "{} already held by id {}",
                unique_field, holder
            )));
        }
        self.try_add(dto).await
    }

    async fn try_update(&self, dto: U, id: i64) -> Result<G, AppError> {
        let models = self.store.all().await?;
        let model = take_by_id(models, id)?;
        self.merge_and_save(dto, model).await
    }

    async fn try_update_unique(&self, dto: U, id: i64, unique_field: &str) -> Result<G, AppError> {
        let value = property(&dto, unique_field)?;
        let models = self.store.all().await?;
        let holder = find_unique_holder(&models, unique_field, &value)?;
        let model = take_by_id(models, id)?;
        match holder {
            Some(holder) if holder != model.id() => Err(AppError::Conflict(format!(
                "{} already held by id {}",
                unique_field, holder
            ))),
            _ => self.merge_and_save(dto, model).await,
        }
    }

    async fn merge_and_save(&self, dto: U, mut model: M) -> Result<G, AppError> {
        dto.merge_into(&mut model);
        self.store.save(&model).await?;
        Ok(G::from(&model))
    }

    fn respond<T>(
        &self,
        operation: &'static str,
        code: ServiceResponseCode,
        result: Result<T, AppError>,
    ) -> ServiceResponse<T> {
        match result {
            Ok(data) => ServiceResponse::with_data(code, data),
            Err(err) => {
                if err.is_expected() {
                    tracing::debug!(operation, error = %err, "crud request refused");
                } else {
                    tracing::error!(operation, error = %err, "crud request failed");
                }
                err.into_envelope(self.options.redact_errors)
            }
        }
    }
}

fn take_by_id<M: Entity>(models: Vec<M>, id: i64) -> Result<M, AppError> {
    models
        .into_iter()
        .find(|m| m.id() == id)
        .ok_or_else(|| AppError::NotFound(format!("id {}", id)))
}

/// Id of the first instance whose `field` equals `value`. Instances are read in order up to the
/// first match, so a null `field` on an earlier instance fails the lookup.
fn find_unique_holder<M: Entity + Fields>(
    models: &[M],
    field: &str,
    value: &FieldValue,
) -> Result<Option<i64>, FieldError> {
    for model in models {
        if property(model, field)? == *value {
            return Ok(Some(model.id()));
        }
    }
    Ok(None)
}

#[async_trait]
impl<M, G, A, U> GenericService<G, A, U> for CrudService<M, G, A, U>
where
    M: Entity + Fields + From<A>,
    G: for<'a> From<&'a M> + Send + 'static,
    A: Fields + Send + 'static,
    U: Fields + MergeInto<M> + Send + 'static,
{
    async fn get_all(&self) -> ServiceResponse<Vec<G>> {
        let result = self.try_get_all().await;
        self.respond("get_all", ServiceResponseCode::GetSuccess, result)
    }

    async fn get(&self, id: i64) -> ServiceResponse<G> {
        let result = self.try_get(id).await;
        self.respond("get", ServiceResponseCode::GetSuccess, result)
    }

    async fn delete(&self, id: i64) -> ServiceResponse<Vec<G>> {
        let result = self.try_delete(id).await;
        self.respond("delete", ServiceResponseCode::DeleteSuccess, result)
    }

    async fn add(&self, dto: A) -> ServiceResponse<G> {
        let result = self.try_add(dto).await;
        self.respond("add", ServiceResponseCode::AddSuccess, result)
    }

    async fn add_unique(&self, dto: A, unique_field: &str) -> ServiceResponse<G> {
        let result = self.try_add_unique(dto, unique_field).await;
        self.respond("add_unique", ServiceResponseCode::AddSuccess, result)
    }

    async fn update(&self, dto: U, id: i64) -> ServiceResponse<G> {
        let result = self.try_update(dto, id).await;
        self.respond("update", ServiceResponseCode::UpdateSuccess, result)
    }

    async fn update_unique(&self, dto: U, id: i64, unique_field: &str) -> ServiceResponse<G> {
        let result = self.try_update_unique(dto, id, unique_field).await;
        self.respond("update_unique", ServiceResponseCode::UpdateSuccess, result)
    }
}
