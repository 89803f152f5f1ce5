//! Shared state for the routes: one service handle per registered model, one readiness probe per app.

use crate::service::{GenericService, ServiceOptions};
use crate::store::ReadinessProbe;
use std::sync::Arc;

/// Router state for one model's CRUD routes.
pub struct CrudState<G, A, U> {
    pub service: Arc<dyn GenericService<G, A, U>>,
    /// Redact the message of envelopes built by the routes themselves (rejected bodies).
    pub redact_errors: bool,
}

// Manual impl: a derive would demand `G: Clone` and friends.
impl<G, A, U> Clone for CrudState<G, A, U> {
    fn clone(&self) -> Self {
        CrudState {
            service: Arc::clone(&self.service),
            redact_errors: self.redact_errors,
        }
    }
}

impl<G, A, U> CrudState<G, A, U> {
    pub fn new(service: Arc<dyn GenericService<G, A, U>>) -> Self {
        CrudState {
            service,
            redact_errors: false,
        }
    }

    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.redact_errors = options.redact_errors;
        self
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Checked by `GET /ready`.
    pub probe: Arc<dyn ReadinessProbe>,
}
