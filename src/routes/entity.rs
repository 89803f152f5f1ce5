//! Model CRUD routes, registered explicitly per model and nested under the route prefix.

use crate::config::validate_segment;
use crate::error::ConfigError;
use crate::handlers::entity::{
    create, create_unique, create_unique_all, list, not_an_id, read, remove, update,
    update_unique, InputShape, ReadShape,
};
use crate::service::{GenericService, ServiceOptions};
use crate::state::CrudState;
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, routing::put, Router};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Routes for one model under `/{model_name}`:
///
/// * `GET /{model_name}/all`
/// * `GET|PUT|DELETE /{model_name}/:id`, `POST /{model_name}/:unique_field` (including `all`)
/// * `POST /{model_name}`
/// * `PUT /{model_name}/:id/:unique_field`
///
/// The id and the unique-field segment share one parameter so the routes do not conflict;
/// the handlers tell them apart.
///
/// `options` applies to envelopes the routes build before reaching the service.
pub fn crud_routes<G, A, U>(
    model_name: &str,
    service: Arc<dyn GenericService<G, A, U>>,
    options: ServiceOptions,
) -> Router
where
    G: ReadShape,
    A: InputShape,
    U: InputShape,
{
    let base = format!("/{}", model_name);
    Router::new()
        .route(
            &format!("{}/all", base),
            get(list::<G, A, U>)
                .post(create_unique_all::<G, A, U>)
                .put(not_an_id)
                .delete(not_an_id),
        )
        .route(&base, post(create::<G, A, U>))
        .route(
            &format!("{}/:key", base),
            get(read::<G, A, U>)
                .delete(remove::<G, A, U>)
                .put(update::<G, A, U>)
                .post(create_unique::<G, A, U>),
        )
        .route(
            &format!("{}/:key/:unique_field", base),
            put(update_unique::<G, A, U>),
        )
        .with_state(CrudState::new(service).with_options(options))
}

/// Builder collecting per-model routes under one prefix.
///
/// ```rust,ignore
/// let router = CrudApi::new("api")
///     .register("Book", book_service)?
///     .register("Author", author_service)?
///     .into_router();
/// ```
pub struct CrudApi {
    prefix: String,
    models: Vec<String>,
    seen: HashSet<String>,
    router: Router,
    body_limit: Option<usize>,
    options: ServiceOptions,
}

impl CrudApi {
    /// `prefix` may carry leading or trailing slashes; an empty prefix mounts models at the root.
    pub fn new(prefix: &str) -> Self {
        CrudApi {
            prefix: prefix.trim_matches('/').to_string(),
            models: Vec::new(),
            seen: HashSet::new(),
            router: Router::new(),
            body_limit: None,
            options: ServiceOptions::default(),
        }
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = Some(bytes);
        self
    }

    /// Options for models registered after this call. Pass the same options the services use.
    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn register<G, A, U>(
        mut self,
        model_name: &str,
        service: Arc<dyn GenericService<G, A, U>>,
    ) -> Result<Self, ConfigError>
    where
        G: ReadShape,
        A: InputShape,
        U: InputShape,
    {
        validate_segment("model name", model_name)?;
        if !self.seen.insert(model_name.to_string()) {
            return Err(ConfigError::DuplicateModel(model_name.to_string()));
        }
        tracing::info!(model = model_name, prefix = %self.prefix, "registering crud routes");
        self.models.push(model_name.to_string());
        self.router = self.router.merge(crud_routes(model_name, service, self.options));
        Ok(self)
    }

    pub fn model_names(&self) -> &[String] {
        &self.models
    }

    pub fn route_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn into_router(self) -> Router {
        let router = if self.prefix.is_empty() {
            self.router
        } else {
            Router::new().nest(&format!("/{}", self.prefix), self.router)
        };
        match self.body_limit {
            Some(bytes) => router
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(bytes)),
            None => router,
        }
    }
}
